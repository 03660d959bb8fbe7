use crate::models::{FitBreakdown, FitWeights, FootType, ShoeSizeVariant, UserMeasurement};

/// Fit allowance added to user measurements before comparison
const SPORT_ALLOWANCE_MM: f64 = 10.0;
const CASUAL_ALLOWANCE_MM: f64 = 15.0;

/// Allowance used only by the near-perfect-length bonus check
const SPORT_BONUS_ALLOWANCE_MM: f64 = 4.0;
const CASUAL_BONUS_ALLOWANCE_MM: f64 = 6.0;
const LENGTH_BONUS_TOLERANCE_MM: f64 = 2.0;
const LENGTH_BONUS: u32 = 5;

/// Stand-in foot height for the midfoot girth estimate
const FOOT_HEIGHT_PROXY_MM: f64 = 50.0;
const MIDFOOT_GIRTH_FACTOR: f64 = 0.9;

/// The weighted score never exceeds this before the bonus
const RAW_SCORE_CAP: u32 = 98;
const MAX_SCORE: u32 = 100;

// (max difference in mm, score); first matching row wins
const LENGTH_TABLE: &[(f64, u32)] = &[(3.0, 45), (7.0, 40), (12.0, 35), (17.0, 25), (22.0, 15)];
const LENGTH_FLOOR: u32 = 5;

const WIDTH_TABLE: &[(f64, u32)] = &[(15.0, 35), (25.0, 30), (35.0, 25), (45.0, 18), (55.0, 10)];
const WIDTH_FLOOR: u32 = 5;

const OBLIQUE_TABLE: &[(f64, u32)] = &[(10.0, 15), (20.0, 12), (30.0, 8), (40.0, 5)];
const OBLIQUE_FLOOR: u32 = 2;

/// Calculate a compatibility score (0-100) of a size variant for a user
///
/// Scoring formula:
/// score = min(98, sum(sub_scores) * 100 / sum(weights of evaluated sub-scores))
///         + 5 if the shoe length is within 2mm of the foot (capped at 100)
///
/// Sub-scores whose measurement is missing or unparsable are skipped along
/// with their weight. A user without any usable measurement scores 0.
pub fn calculate_fit_score(
    user: &UserMeasurement,
    size: &ShoeSizeVariant,
    is_sport: bool,
    weights: &FitWeights,
) -> u32 {
    calculate_fit_breakdown(user, size, is_sport, weights).score
}

/// Same calculation as [`calculate_fit_score`], keeping every intermediate value
pub fn calculate_fit_breakdown(
    user: &UserMeasurement,
    size: &ShoeSizeVariant,
    is_sport: bool,
    weights: &FitWeights,
) -> FitBreakdown {
    let length_mm = user.foot_length_cm().map(cm_to_mm);

    let length = length_mm.map(|mm| length_score(mm, size, is_sport));
    let width = user
        .foot_width_cm()
        .map(|cm| width_score(cm_to_mm(cm), size));
    let oblique = user
        .oblique_circumference_cm()
        .map(|cm| oblique_score(cm_to_mm(cm), size, is_sport));
    let foot_type = user.foot_type().map(|ft| foot_type_score(ft, size));

    let (total, factors) = [
        (length, weights.length),
        (width, weights.width),
        (oblique, weights.oblique),
        (foot_type, weights.foot_type),
    ]
    .into_iter()
    .fold((0u32, 0u32), |(total, factors), (score, weight)| match score {
        Some(score) => (total + score, factors.saturating_add(weight)),
        None => (total, factors),
    });

    if factors == 0 {
        return FitBreakdown {
            length,
            width,
            oblique,
            foot_type,
            factors,
            raw: 0,
            length_bonus: false,
            score: 0,
        };
    }

    let raw = (total * 100 / factors).min(RAW_SCORE_CAP);

    let length_bonus = length_mm.is_some_and(|mm| is_near_perfect_length(mm, size, is_sport));
    let score = if length_bonus {
        (raw + LENGTH_BONUS).min(MAX_SCORE)
    } else {
        raw
    };

    FitBreakdown {
        length,
        width,
        oblique,
        foot_type,
        factors,
        raw,
        length_bonus,
        score,
    }
}

#[inline]
fn cm_to_mm(cm: f64) -> f64 {
    cm * 10.0
}

#[inline]
fn fit_allowance(is_sport: bool) -> f64 {
    if is_sport {
        SPORT_ALLOWANCE_MM
    } else {
        CASUAL_ALLOWANCE_MM
    }
}

#[inline]
fn lookup(diff: f64, table: &[(f64, u32)], floor: u32) -> u32 {
    table
        .iter()
        .find(|(limit, _)| diff <= *limit)
        .map(|(_, score)| *score)
        .unwrap_or(floor)
}

/// Length score (max 45): foot length plus allowance against shoe length
#[inline]
fn length_score(length_mm: f64, size: &ShoeSizeVariant, is_sport: bool) -> u32 {
    let user_length = length_mm + fit_allowance(is_sport);
    lookup((user_length - size.length).abs(), LENGTH_TABLE, LENGTH_FLOOR)
}

/// Width score (max 35): estimated midfoot girth against the shoe's
///
/// The fit allowance is not applied to the girth estimate.
#[inline]
fn width_score(width_mm: f64, size: &ShoeSizeVariant) -> u32 {
    let estimated = 2.0 * (width_mm + FOOT_HEIGHT_PROXY_MM) * MIDFOOT_GIRTH_FACTOR;
    lookup(
        (estimated - size.midfoot_circumference).abs(),
        WIDTH_TABLE,
        WIDTH_FLOOR,
    )
}

/// Oblique circumference score (max 15)
#[inline]
fn oblique_score(oblique_mm: f64, size: &ShoeSizeVariant, is_sport: bool) -> u32 {
    let user_oblique = oblique_mm + fit_allowance(is_sport);
    lookup(
        (user_oblique - size.oblique_circumference).abs(),
        OBLIQUE_TABLE,
        OBLIQUE_FLOOR,
    )
}

/// Foot type score (max 5): roomier lasts suit flat and supinated feet
#[inline]
fn foot_type_score(foot_type: FootType, size: &ShoeSizeVariant) -> u32 {
    match foot_type {
        FootType::Flat => {
            if size.ankle_circumference > 240.0 && size.midfoot_circumference > 220.0 {
                5
            } else if size.ankle_circumference > 230.0 && size.midfoot_circumference > 210.0 {
                3
            } else {
                1
            }
        }
        FootType::Supination => {
            if size.toe_circumference > 240.0 {
                5
            } else if size.toe_circumference > 220.0 {
                3
            } else {
                1
            }
        }
        FootType::Normal => 4,
    }
}

/// Secondary length check with its own, smaller allowance
#[inline]
fn is_near_perfect_length(length_mm: f64, size: &ShoeSizeVariant, is_sport: bool) -> bool {
    let allowance = if is_sport {
        SPORT_BONUS_ALLOWANCE_MM
    } else {
        CASUAL_BONUS_ALLOWANCE_MM
    };
    ((size.length + allowance) - length_mm).abs() <= LENGTH_BONUS_TOLERANCE_MM
}
