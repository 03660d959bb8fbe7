// Unit tests for the SneakerFit scoring engine

use sneaker_fit::core::{
    matcher::FitMatcher,
    scoring::{calculate_fit_breakdown, calculate_fit_score},
};
use sneaker_fit::models::{Catalog, FitWeights, ShoeModel, ShoeSizeVariant, UserMeasurement};

fn size(length: f64, midfoot: f64) -> ShoeSizeVariant {
    ShoeSizeVariant {
        eu: None,
        length,
        midfoot_circumference: midfoot,
        oblique_circumference: 340.0,
        ankle_circumference: 250.0,
        toe_circumference: 230.0,
        instep_height: 60.0,
    }
}

fn full_user() -> UserMeasurement {
    UserMeasurement {
        foot_length: Some("25".to_string()),
        foot_width: Some("10".to_string()),
        oblique_circumference: Some("33".to_string()),
        foot_type: Some("Плоскостопие".to_string()),
    }
}

#[test]
fn test_score_example_length_only() {
    let user = UserMeasurement {
        foot_length: Some("25".to_string()),
        ..Default::default()
    };

    let score = calculate_fit_score(&user, &size(260.0, 230.0), true, &FitWeights::default());

    assert_eq!(score, 97);
}

#[test]
fn test_score_example_flat_foot_only() {
    let user = UserMeasurement {
        foot_type: Some("Flat".to_string()),
        ..Default::default()
    };

    let score = calculate_fit_score(&user, &size(260.0, 230.0), false, &FitWeights::default());

    assert_eq!(score, 62);
}

#[test]
fn test_score_zero_without_measurements() {
    let unparsable = UserMeasurement {
        foot_length: Some("n/a".to_string()),
        foot_width: Some("".to_string()),
        oblique_circumference: Some("thirty".to_string()),
        foot_type: Some("   ".to_string()),
    };

    for length in [220.0, 260.0, 300.0] {
        for sport in [true, false] {
            let variant = size(length, 230.0);
            assert_eq!(calculate_fit_score(&UserMeasurement::default(), &variant, sport, &FitWeights::default()), 0);
            assert_eq!(calculate_fit_score(&unparsable, &variant, sport, &FitWeights::default()), 0);
        }
    }
}

#[test]
fn test_score_always_in_range() {
    let user = full_user();

    for length in (200..=320).step_by(3) {
        for midfoot in (180..=300).step_by(10) {
            for sport in [true, false] {
                let variant = size(length as f64, midfoot as f64);
                let breakdown = calculate_fit_breakdown(&user, &variant, sport, &FitWeights::default());
                assert!(breakdown.score <= 100, "score {} out of range", breakdown.score);
                assert!(breakdown.raw <= 98);
                assert_eq!(breakdown.factors, 100);
            }
        }
    }
}

#[test]
fn test_score_non_increasing_with_length_difference() {
    let user = UserMeasurement {
        foot_length: Some("25".to_string()),
        foot_width: Some("10".to_string()),
        ..Default::default()
    };

    // user length is 260 for sport models; the bonus window sits far below
    let mut previous = u32::MAX;
    for length in 260..=300 {
        let score = calculate_fit_score(&user, &size(length as f64, 270.0), true, &FitWeights::default());
        assert!(score <= previous, "score rose at length {}", length);
        previous = score;
    }
}

#[test]
fn test_missing_fields_leave_denominator() {
    let user = UserMeasurement {
        foot_length: Some("25".to_string()),
        oblique_circumference: Some("invalid".to_string()),
        ..Default::default()
    };

    let breakdown = calculate_fit_breakdown(&user, &size(260.0, 230.0), true, &FitWeights::default());

    assert_eq!(breakdown.oblique, None);
    assert_eq!(breakdown.factors, 46);
}

#[test]
fn test_best_size_of_two_variants() {
    // user: 260mm sport length, 270mm estimated midfoot girth
    let user = UserMeasurement {
        foot_length: Some("25".to_string()),
        foot_width: Some("10".to_string()),
        ..Default::default()
    };
    // length diff 15 -> 25, girth diff 70 -> 5: 30 * 100 / 75 = 40
    let variant_a = size(275.0, 200.0);
    // length diff 10 -> 35, girth diff 40 -> 18: 53 * 100 / 75 = 70
    let variant_b = size(270.0, 230.0);

    let matcher = FitMatcher::with_defaults();
    assert_eq!(matcher.score(&user, &variant_a, true), 40);
    assert_eq!(matcher.score(&user, &variant_b, true), 70);

    let catalog = Catalog::new(vec![ShoeModel {
        model: "Trail Runner".to_string(),
        sport: 1,
        sizes: vec![variant_a, variant_b.clone()],
    }]);

    let result = matcher.rank_catalog(&user, &catalog);

    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].compatibility, 70);
    assert_eq!(result.recommendations[0].best_size, Some(variant_b));
}

#[test]
fn test_empty_catalog_yields_empty_ranking() {
    let matcher = FitMatcher::with_defaults();
    let result = matcher.rank_catalog(&full_user(), &Catalog::default());

    assert!(result.recommendations.is_empty());
    assert_eq!(result.total_models, 0);
}

#[test]
fn test_custom_weights_change_normalization() {
    let user = UserMeasurement {
        foot_type: Some("Нормальная".to_string()),
        ..Default::default()
    };
    let weights = FitWeights {
        foot_type: 10,
        ..FitWeights::default()
    };

    // 4 * 100 / 10
    assert_eq!(calculate_fit_score(&user, &size(260.0, 230.0), true, &weights), 40);
}
