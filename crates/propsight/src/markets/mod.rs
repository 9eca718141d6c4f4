//! Market intelligence engine.
//!
//! Everything in this tree is a pure, stateless function of its inputs:
//! baseline resolution, metric normalization, appreciation modelling,
//! synthetic fallback generation, composite market scoring, and ranked
//! prediction assembly. The single sanctioned source of non-determinism
//! is the appreciation noise draw in [`appreciation::market_noise`].

pub mod appreciation;
pub mod baseline;
pub mod feed;
pub mod listing;
pub mod normalize;
pub mod predictions;
pub mod scoring;
pub mod signals;
pub mod synthetic;
