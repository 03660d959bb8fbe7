use crate::models::{
    Catalog, FitBreakdown, FitGrade, FitWeights, ModelFit, RankingLimits, ShoeModel,
    ShoeSizeVariant, SizeFit, UserMeasurement,
};
use crate::core::scoring::{calculate_fit_breakdown, calculate_fit_score};

/// Result of ranking a catalog
#[derive(Debug)]
pub struct RankResult {
    pub recommendations: Vec<ModelFit>,
    pub total_models: usize,
}

/// Fit orchestrator - scores size runs and ranks models
///
/// # Pipeline Stages
/// 1. Score every size variant of every model
/// 2. Pick the best size per model (first one wins on ties)
/// 3. Drop models below the compatibility cutoff
/// 4. Stable sort by score and cap the result
#[derive(Debug, Clone)]
pub struct FitMatcher {
    weights: FitWeights,
    limits: RankingLimits,
}

impl FitMatcher {
    pub fn new(weights: FitWeights, limits: RankingLimits) -> Self {
        Self { weights, limits }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: FitWeights::default(),
            limits: RankingLimits::default(),
        }
    }

    pub fn weights(&self) -> &FitWeights {
        &self.weights
    }

    pub fn limits(&self) -> &RankingLimits {
        &self.limits
    }

    /// Compatibility (0-100) of one size variant
    pub fn score(&self, user: &UserMeasurement, size: &ShoeSizeVariant, is_sport: bool) -> u32 {
        calculate_fit_score(user, size, is_sport, &self.weights)
    }

    pub fn score_breakdown(
        &self,
        user: &UserMeasurement,
        size: &ShoeSizeVariant,
        is_sport: bool,
    ) -> FitBreakdown {
        calculate_fit_breakdown(user, size, is_sport, &self.weights)
    }

    /// Score every size of a model and pick the best one
    ///
    /// No cutoff is applied here. A model without sizes gets compatibility 0
    /// and no best size.
    pub fn score_model(&self, user: &UserMeasurement, model: &ShoeModel) -> ModelFit {
        let is_sport = model.is_sport();

        let all_sizes: Vec<SizeFit> = model
            .sizes
            .iter()
            .map(|size| SizeFit {
                size: size.clone(),
                compatibility: self.score(user, size, is_sport),
            })
            .collect();

        // The current best stays unless a later size scores strictly higher
        let best = all_sizes.iter().fold(None::<&SizeFit>, |best, candidate| match best {
            Some(current) if current.compatibility >= candidate.compatibility => Some(current),
            _ => Some(candidate),
        });

        let compatibility = best.map(|b| b.compatibility).unwrap_or(0);
        let best_size = best.map(|b| b.size.clone());

        ModelFit {
            model: model.model.clone(),
            sport: is_sport,
            compatibility,
            grade: FitGrade::from_score(compatibility),
            best_size,
            all_sizes,
        }
    }

    /// Rank catalog models by their best-size compatibility for a user
    ///
    /// # Arguments
    /// * `user` - The user's foot measurements
    /// * `catalog` - All shoe models
    ///
    /// # Returns
    /// RankResult with at most `max_results` models, best first
    pub fn rank_catalog(&self, user: &UserMeasurement, catalog: &Catalog) -> RankResult {
        let total_models = catalog.len();

        let mut recommendations: Vec<ModelFit> = catalog
            .iter()
            .map(|model| self.score_model(user, model))
            .filter(|fit| fit.best_size.is_some())
            .filter(|fit| fit.compatibility >= self.limits.min_compatibility)
            .collect();

        // sort_by is stable, so catalog order survives among equal scores
        recommendations.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));

        recommendations.truncate(self.limits.max_results);

        RankResult {
            recommendations,
            total_models,
        }
    }
}

impl Default for FitMatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
