// Core algorithm exports
pub mod matcher;
pub mod scoring;

pub use matcher::{FitMatcher, RankResult};
pub use scoring::{calculate_fit_breakdown, calculate_fit_score};
