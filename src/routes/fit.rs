use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::FitMatcher;
use crate::models::{
    CatalogEntry, ErrorResponse, HealthResponse, MeasurementForm, RecommendationsResponse,
    UserMeasurement,
};
use crate::services::{CatalogError, CatalogStore, VerificationStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub matcher: FitMatcher,
    pub verification: VerificationStore,
}

/// Configure all fit-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/catalog", web::get().to(list_catalog))
        .route("/catalog/random", web::get().to(random_model))
        .route("/fit/recommendations", web::post().to(recommendations))
        .route("/fit/models/{model}", web::post().to(model_fit))
        .route("/measurements/validate", web::post().to(validate_measurements));
}

fn catalog_unavailable(err: &CatalogError) -> HttpResponse {
    tracing::error!("Failed to load catalog: {}", err);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Catalog unavailable".to_string(),
        message: err.to_string(),
        status_code: 500,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let models = match state.catalog.get().await {
        Ok(catalog) => Some(catalog.len()),
        Err(e) => {
            tracing::warn!("Health check could not load catalog: {}", e);
            None
        }
    };

    let status = if models.is_some() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        models,
    })
}

/// List catalog models
///
/// GET /api/v1/catalog
async fn list_catalog(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.get().await {
        Ok(catalog) => {
            let entries: Vec<CatalogEntry> = catalog.iter().map(CatalogEntry::from).collect();
            HttpResponse::Ok().json(entries)
        }
        Err(e) => catalog_unavailable(&e),
    }
}

/// One catalog model picked at random, for the landing page
///
/// GET /api/v1/catalog/random
async fn random_model(state: web::Data<AppState>) -> impl Responder {
    let catalog = match state.catalog.get().await {
        Ok(catalog) => catalog,
        Err(e) => return catalog_unavailable(&e),
    };

    if catalog.is_empty() {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Catalog empty".to_string(),
            message: "No models to pick from".to_string(),
            status_code: 404,
        });
    }

    let index = (uuid::Uuid::new_v4().as_u128() % catalog.len() as u128) as usize;
    match catalog.models.get(index) {
        Some(model) => HttpResponse::Ok().json(CatalogEntry::from(model)),
        None => HttpResponse::InternalServerError().finish(),
    }
}

/// Ranked recommendations endpoint
///
/// POST /api/v1/fit/recommendations
///
/// Request body:
/// ```json
/// {
///   "foot_length": "25.5",
///   "foot_width": "9.8",
///   "oblique_circumference": "34",
///   "foot_type": "Плоскостопие"
/// }
/// ```
async fn recommendations(
    state: web::Data<AppState>,
    req: web::Json<UserMeasurement>,
) -> impl Responder {
    let user = req.into_inner();

    if !user.has_fit_data() {
        tracing::info!("Recommendations requested without usable measurements");
    }

    let catalog = match state.catalog.get().await {
        Ok(catalog) => catalog,
        Err(e) => return catalog_unavailable(&e),
    };

    let result = state.matcher.rank_catalog(&user, &catalog);

    tracing::info!(
        "Returning {} recommendations (from {} models)",
        result.recommendations.len(),
        result.total_models
    );

    HttpResponse::Ok().json(RecommendationsResponse {
        recommendations: result.recommendations,
        total_models: result.total_models,
    })
}

/// Size breakdown for a single model
///
/// POST /api/v1/fit/models/{model}
async fn model_fit(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UserMeasurement>,
) -> impl Responder {
    let model_name = path.into_inner();

    let catalog = match state.catalog.get().await {
        Ok(catalog) => catalog,
        Err(e) => return catalog_unavailable(&e),
    };

    let Some(model) = catalog.find_model(&model_name) else {
        tracing::debug!("Unknown model requested: {}", model_name);
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Model not found".to_string(),
            message: format!("No model named '{}' in the catalog", model_name),
            status_code: 404,
        });
    };

    let fit = state.matcher.score_model(&req, model);

    tracing::debug!(
        "Model {} best compatibility {} over {} sizes",
        fit.model,
        fit.compatibility,
        fit.all_sizes.len()
    );

    HttpResponse::Ok().json(fit)
}

/// Measurement form validation endpoint
///
/// POST /api/v1/measurements/validate
///
/// Returns the normalized measurement record on success.
async fn validate_measurements(req: web::Json<MeasurementForm>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Measurement form rejected: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    HttpResponse::Ok().json(UserMeasurement::from(req.into_inner()))
}
