pub mod ranking;
mod router;
mod service;

pub use ranking::{Selection, SelectionStats, SortKey, DEFAULT_LIMIT, MAX_LIMIT};
pub use router::{market_router, MarketState};
pub use service::{
    DataSourceLabel, ListingSource, PredictionError, PredictionReport, PredictionRequest,
    PredictionService, SourceError,
};
