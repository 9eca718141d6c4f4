use crate::infra::{build_sources, parse_sort_key, sample_permits, sample_rental, StaticListingSource};
use chrono::Local;
use clap::Args;
use propsight::error::AppError;
use propsight::markets::baseline;
use propsight::markets::listing::{ListingRecord, PropertyType, RecordSource};
use propsight::markets::predictions::{
    DataSourceLabel, PredictionReport, PredictionRequest, PredictionService, SortKey,
};
use propsight::markets::scoring::{CompositeScoreSet, CompositeScoringEngine};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct PredictArgs {
    /// Target market as "City, ST" shorthand
    #[arg(long, conflicts_with_all = ["city", "state"])]
    pub(crate) region: Option<String>,
    /// Target city (paired with --state)
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Target state abbreviation
    #[arg(long)]
    pub(crate) state: Option<String>,
    /// Number of ranked predictions to return
    #[arg(long)]
    pub(crate) limit: Option<i64>,
    /// Projection horizon in months
    #[arg(long)]
    pub(crate) timeframe: Option<i64>,
    /// Ranking key: appreciation, relevance, or future_score
    #[arg(long, value_parser = parse_sort_key)]
    pub(crate) sort: Option<SortKey>,
    /// Listing feed CSV consulted ahead of synthetic generation
    #[arg(long)]
    pub(crate) listing_feed: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Market to walk through, as "City, ST"
    #[arg(long, default_value = "Austin, TX")]
    pub(crate) region: String,
    /// Number of ranked predictions to show
    #[arg(long, default_value_t = 5)]
    pub(crate) limit: i64,
    /// Listing feed CSV consulted ahead of the built-in demo listings
    #[arg(long)]
    pub(crate) listing_feed: Option<PathBuf>,
    /// Skip the composite market scorecard portion of the demo
    #[arg(long)]
    pub(crate) skip_scorecard: bool,
}

pub(crate) fn run_market_predictions(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        region,
        city,
        state,
        limit,
        timeframe,
        sort,
        listing_feed,
    } = args;

    let (city, state) = match city {
        Some(city) => (city, state.unwrap_or_default()),
        None => split_region(region.as_deref().unwrap_or_default()),
    };

    let service = PredictionService::new(build_sources(listing_feed));
    let request = PredictionRequest {
        city,
        state,
        limit,
        horizon_months: timeframe,
        sort: sort.unwrap_or_default(),
    };

    let report = service.predict(&request)?;
    render_prediction_report(&report);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        region,
        limit,
        listing_feed,
        skip_scorecard,
    } = args;

    let (city, state) = split_region(&region);
    println!("Market intelligence demo ({})", Local::now().date_naive());

    let mut sources = build_sources(listing_feed);
    let seeded = StaticListingSource::default();
    seeded.seed(demo_listings(&city, &state));
    sources.push(Arc::new(seeded));

    let service = PredictionService::new(sources);
    let request = PredictionRequest {
        city: city.clone(),
        state: state.clone(),
        limit: Some(limit),
        horizon_months: None,
        sort: SortKey::Appreciation,
    };
    let report = service.predict(&request)?;
    render_prediction_report(&report);

    if skip_scorecard {
        return Ok(());
    }

    let market_baseline = baseline::resolve(
        &baseline::normalize_key(&city),
        &baseline::normalize_key(&state),
    );
    let engine = CompositeScoringEngine::default();
    let permits = sample_permits();
    let rental = sample_rental();
    let scores = engine.score_market(&market_baseline, &permits, Some(&rental));

    println!("\nComposite scorecard for {}", market_baseline.market);
    println!("(permit and rental context: representative sample data)");
    render_scorecard(&scores);

    Ok(())
}

fn split_region(region: &str) -> (String, String) {
    let mut parts = region.splitn(2, ',');
    let city = parts.next().unwrap_or_default().trim().to_string();
    let state = parts.next().unwrap_or_default().trim().to_string();
    (city, state)
}

fn source_label(source: DataSourceLabel) -> &'static str {
    match source {
        DataSourceLabel::Live => "live listings",
        DataSourceLabel::Synthetic => "synthetic market model",
        DataSourceLabel::Mixed => "live listings + synthetic top-up",
    }
}

pub(crate) fn render_prediction_report(report: &PredictionReport) {
    println!("\nAppreciation forecast: {}", report.market);
    println!(
        "Horizon {} months | data source: {} | generated {}",
        report.horizon_months,
        source_label(report.data_source),
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "Candidates {} | mean appreciation {:.2}% | {} high-confidence",
        report.stats.total_count, report.stats.mean_appreciation, report.stats.high_confidence_count
    );

    println!("\nRanked properties");
    for (rank, item) in report.items.iter().enumerate() {
        println!(
            "{:>3}. {} | ${:.0} | {} sqft | {:.2}% appreciation | confidence {:.0} | risk {:.0}",
            rank + 1,
            item.listing.address,
            item.listing.price,
            item.listing.square_feet,
            item.appreciation,
            item.confidence,
            item.risk_score
        );
        if item.price_per_sqft > 0.0 {
            println!("     ${:.2}/sqft", item.price_per_sqft);
        }
    }
}

pub(crate) fn render_scorecard(scores: &CompositeScoreSet) {
    println!("- Investment score: {:.2}", scores.investment_score);
    println!("- Future value outlook: {:.2}", scores.future_value_score);
    println!("- Market momentum: {:.2}", scores.market_momentum);
    println!("- Gentrification risk: {:.2}", scores.gentrification_risk);
    println!(
        "- Risk: {:.2} ({})",
        scores.risk.overall,
        scores.risk.level.label()
    );
    println!(
        "  market {:.1} | development {:.1} | economic {:.1} | climate {:.1} | affordability {:.1}",
        scores.risk.market,
        scores.risk.development,
        scores.risk.economic,
        scores.risk.climate,
        scores.risk.affordability
    );
    println!(
        "- ROI projection: {:.2}% (1y) / {:.2}% (3y) / {:.2}% (5y)",
        scores.roi.one_year, scores.roi.three_year, scores.roi.five_year
    );
}

fn demo_listings(city: &str, state: &str) -> Vec<ListingRecord> {
    let specs: [(&str, f64, u32, u8, f32, u16, PropertyType); 4] = [
        ("1200 Barton Springs Rd", 352_000.0, 1_780, 3, 2.0, 1998, PropertyType::SingleFamily),
        ("415 Red River St #204", 298_500.0, 1_040, 2, 2.0, 2011, PropertyType::Condo),
        ("7802 Shoal Creek Blvd", 512_000.0, 2_240, 4, 2.5, 1987, PropertyType::SingleFamily),
        ("2101 S Lamar Blvd #7", 389_900.0, 1_460, 3, 2.5, 2016, PropertyType::Townhouse),
    ];

    specs
        .into_iter()
        .map(
            |(address, price, square_feet, bedrooms, bathrooms, year_built, property_type)| {
                ListingRecord {
                    address: address.to_string(),
                    city: city.to_string(),
                    state: state.to_string(),
                    latitude: 30.2672,
                    longitude: -97.7431,
                    price,
                    square_feet,
                    bedrooms,
                    bathrooms,
                    year_built,
                    property_type,
                    source: RecordSource::Live,
                }
            },
        )
        .collect()
}
