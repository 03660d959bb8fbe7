//! SneakerFit - shoe fit compatibility service
//!
//! This library scores how well a user's foot measurements match the size
//! variants of a shoe catalog and ranks models by their best-fitting size.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{FitMatcher, RankResult, calculate_fit_score};
pub use models::{Catalog, FitWeights, ModelFit, RankingLimits, ShoeModel, ShoeSizeVariant, UserMeasurement};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = FitMatcher::default();
        let result = matcher.rank_catalog(&UserMeasurement::default(), &Catalog::default());
        assert!(result.recommendations.is_empty());
    }
}
