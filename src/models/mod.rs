// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    parse_decimal, Catalog, FitBreakdown, FitGrade, FitWeights, FootType, ModelFit, RankingLimits,
    ShoeModel, ShoeSizeVariant, SizeFit, UserMeasurement,
};
pub use requests::MeasurementForm;
pub use responses::{CatalogEntry, ErrorResponse, HealthResponse, RecommendationsResponse};
