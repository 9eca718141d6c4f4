//! Integration specifications for the prediction pipeline: source
//! chain fallback, synthetic top-up, ranking, and the HTTP surface.

mod common {
    use std::sync::Arc;

    use propsight::markets::listing::{ListingRecord, PropertyType, RecordSource};
    use propsight::markets::predictions::{
        ListingSource, MarketState, PredictionRequest, PredictionService, SortKey, SourceError,
    };
    use propsight::markets::scoring::CompositeScoringEngine;

    pub(super) struct CannedSource {
        pub(super) records: Vec<ListingRecord>,
    }

    impl ListingSource for CannedSource {
        fn label(&self) -> &'static str {
            "canned"
        }

        fn fetch(
            &self,
            city: &str,
            _state: &str,
            _limit: usize,
        ) -> Result<Vec<ListingRecord>, SourceError> {
            Ok(self
                .records
                .iter()
                .filter(|record| record.city.eq_ignore_ascii_case(city))
                .cloned()
                .collect())
        }
    }

    pub(super) fn listing(address: &str, price: f64, square_feet: u32) -> ListingRecord {
        ListingRecord {
            address: address.to_string(),
            city: "austin".to_string(),
            state: "tx".to_string(),
            latitude: 30.2672,
            longitude: -97.7431,
            price,
            square_feet,
            bedrooms: 3,
            bathrooms: 2.0,
            year_built: 2004,
            property_type: PropertyType::SingleFamily,
            source: RecordSource::Live,
        }
    }

    pub(super) fn request(city: &str, state: &str, limit: i64) -> PredictionRequest {
        PredictionRequest {
            city: city.to_string(),
            state: state.to_string(),
            limit: Some(limit),
            horizon_months: Some(12),
            sort: SortKey::Appreciation,
        }
    }

    pub(super) fn empty_service() -> PredictionService {
        PredictionService::new(Vec::new())
    }

    pub(super) fn service_with(records: Vec<ListingRecord>) -> PredictionService {
        PredictionService::new(vec![Arc::new(CannedSource { records })])
    }

    pub(super) fn market_state(service: PredictionService) -> MarketState {
        MarketState {
            predictions: Arc::new(service),
            scoring: Arc::new(CompositeScoringEngine::default()),
        }
    }
}

mod fallback {
    use super::common::*;
    use propsight::markets::baseline::resolve;
    use propsight::markets::listing::RecordSource;
    use propsight::markets::predictions::DataSourceLabel;
    use propsight::markets::synthetic;

    #[test]
    fn zero_live_candidates_synthesize_exactly_the_requested_count() {
        let service = empty_service();
        let report = service
            .predict(&request("Austin", "TX", 10))
            .expect("report");

        assert_eq!(report.items.len(), 10);
        assert_eq!(report.data_source, DataSourceLabel::Synthetic);
        for item in &report.items {
            assert_eq!(item.listing.source, RecordSource::Synthetic);
            assert!(item.confidence <= 85.0);
        }
    }

    #[test]
    fn synthetic_generation_is_deterministic_per_offset() {
        let baseline = resolve("Austin", "TX");
        let first = synthetic::generate(&baseline, "austin", "tx", 8, 2);
        let second = synthetic::generate(&baseline, "austin", "tx", 8, 2);
        assert_eq!(first, second);

        let other_offset = synthetic::generate(&baseline, "austin", "tx", 8, 3);
        assert_ne!(first, other_offset);
    }

    #[test]
    fn unknown_city_resolves_to_default_baseline_without_error() {
        let service = empty_service();
        let report = service
            .predict(&request("Timbuktu", "ML", 5))
            .expect("unknown market still produces a report");

        assert_eq!(report.market, "Unmapped Market");
        assert_eq!(report.items.len(), 5);
    }

    #[test]
    fn live_records_flow_through_with_live_label() {
        let service = service_with(vec![
            listing("1 Congress Ave", 380_000.0, 1_750),
            listing("2 Congress Ave", 405_000.0, 1_900),
        ]);
        let report = service.predict(&request("Austin", "TX", 2)).expect("report");

        assert_eq!(report.data_source, DataSourceLabel::Live);
        assert!(report
            .items
            .iter()
            .all(|item| item.listing.source == RecordSource::Live));
    }

    #[test]
    fn partial_live_supply_is_labelled_mixed() {
        let service = service_with(vec![listing("1 Congress Ave", 380_000.0, 1_750)]);
        let report = service.predict(&request("Austin", "TX", 4)).expect("report");
        assert_eq!(report.data_source, DataSourceLabel::Mixed);
        assert_eq!(report.items.len(), 4);
    }
}

mod scenarios {
    use super::common::*;
    use propsight::markets::appreciation::{estimate, MAX_NOISE};
    use propsight::markets::baseline::resolve;

    #[test]
    fn austin_property_matches_the_documented_expectations() {
        let baseline = resolve("Austin", "TX");
        assert_eq!(baseline.median_home_price, 485_000.0);

        let subject = listing("1200 Barton Springs Rd", 350_000.0, 1_800);
        let noiseless = estimate(&subject, &baseline, 12, 0.0);

        // Cheap-home multiplier only: 6.5 * 1.2.
        assert_eq!(noiseless.appreciation, 7.8);
        assert!(noiseless.confidence >= 80.0);
        assert!(noiseless.risk_score <= 45.0);

        // The noise band brackets the projection symmetrically.
        let low = estimate(&subject, &baseline, 12, -MAX_NOISE);
        let high = estimate(&subject, &baseline, 12, MAX_NOISE);
        assert!(low.appreciation < noiseless.appreciation);
        assert!(high.appreciation > noiseless.appreciation);
        assert!((6.8..=8.8).contains(&high.appreciation));
    }

    #[test]
    fn pipeline_projections_stay_inside_the_noise_band() {
        let service = service_with(vec![listing("1200 Barton Springs Rd", 350_000.0, 1_800)]);
        let report = service.predict(&request("Austin", "TX", 1)).expect("report");

        let item = &report.items[0];
        // 6.5 * (1.2 +/- 0.15) over twelve months.
        assert!(item.appreciation >= 6.82 && item.appreciation <= 8.78);
        assert!(item.confidence >= 80.0);
        assert!(item.risk_score <= 45.0);
    }

    #[test]
    fn selection_stats_cover_the_full_candidate_set() {
        let records: Vec<_> = (0..12)
            .map(|index| {
                listing(
                    &format!("{} Test St", index + 1),
                    330_000.0 + index as f64 * 10_000.0,
                    1_700,
                )
            })
            .collect();
        let service = service_with(records);
        let report = service.predict(&request("Austin", "TX", 12)).expect("report");

        assert_eq!(report.stats.total_count, 12);
        assert!(report.stats.mean_appreciation > 0.0);
        assert!(report.stats.high_confidence_count <= 12);
    }

    #[test]
    fn limit_is_clamped_to_the_documented_ceiling() {
        let service = empty_service();
        let report = service
            .predict(&request("Austin", "TX", 9_999))
            .expect("report");
        assert_eq!(report.items.len(), 500);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use propsight::markets::predictions::market_router;
    use serde_json::{json, Value};

    use tower::ServiceExt;

    async fn dispatch(body: Value, service: propsight::markets::predictions::PredictionService) -> (StatusCode, Value) {
        let router = market_router(market_state(service));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/markets/predictions")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn predictions_endpoint_returns_the_output_envelope() {
        let (status, payload) = dispatch(
            json!({ "region": "Austin, TX", "limit": 5, "timeframe": 12 }),
            empty_service(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["data_source"], json!("synthetic"));
        assert_eq!(payload["items"].as_array().expect("items").len(), 5);
        assert_eq!(payload["stats"]["total_count"], json!(5));
        assert!(payload["stats"]["mean_appreciation"].is_number());
    }

    #[tokio::test]
    async fn unresolvable_region_returns_data_not_a_4xx() {
        let (status, payload) = dispatch(
            json!({ "region": "Timbuktu", "limit": 3 }),
            empty_service(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["market"], json!("Unmapped Market"));
        assert_eq!(payload["items"].as_array().expect("items").len(), 3);
    }

    #[tokio::test]
    async fn blank_query_is_rejected_as_a_bad_request() {
        let (status, payload) = dispatch(json!({ "region": "  ,  " }), empty_service()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"]
            .as_str()
            .expect("message")
            .contains("city or region"));
    }

    #[tokio::test]
    async fn posted_listing_csv_seeds_the_live_path() {
        let csv = "Address,City,State,Latitude,Longitude,Price,Square Feet,Bedrooms,Bathrooms,Year Built,Property Type\n\
                   1200 Barton Springs Rd,austin,tx,30.2638,-97.7632,350000,1800,3,2,1998,single_family\n";
        let (status, payload) = dispatch(
            json!({ "city": "Austin", "state": "TX", "limit": 1, "listings_csv": csv }),
            empty_service(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["data_source"], json!("live"));
        assert_eq!(payload["items"][0]["source"], json!("live"));
        assert_eq!(payload["items"][0]["address"], json!("1200 Barton Springs Rd"));
    }

    #[tokio::test]
    async fn malformed_listing_csv_is_rejected_as_unprocessable() {
        let csv = "Address,Price\n\"unterminated,500000\n";
        let (status, payload) = dispatch(
            json!({ "city": "Austin", "state": "TX", "listings_csv": csv }),
            empty_service(),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(payload["error"].as_str().expect("message").contains("CSV"));
    }
}
