use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Foot measurements as handed over by the user store
///
/// Values arrive as strings, numbers or nulls and are kept raw. They are parsed
/// only when scoring, so a malformed field only disables its own sub-score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMeasurement {
    /// Foot length in centimeters
    #[serde(alias = "footLength", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub foot_length: Option<String>,
    /// Foot width in centimeters
    #[serde(alias = "footWidth", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub foot_width: Option<String>,
    /// Oblique (diagonal) circumference in centimeters, 20-50 on valid records
    #[serde(alias = "obliqueCircumference", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub oblique_circumference: Option<String>,
    #[serde(alias = "footType", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub foot_type: Option<String>,
}

impl UserMeasurement {
    /// Build a record from already-numeric values
    pub fn from_cm(
        foot_length: Option<f64>,
        foot_width: Option<f64>,
        oblique_circumference: Option<f64>,
        foot_type: Option<&str>,
    ) -> Self {
        Self {
            foot_length: foot_length.map(|v| v.to_string()),
            foot_width: foot_width.map(|v| v.to_string()),
            oblique_circumference: oblique_circumference.map(|v| v.to_string()),
            foot_type: foot_type.map(str::to_string),
        }
    }

    pub fn foot_length_cm(&self) -> Option<f64> {
        parse_decimal(self.foot_length.as_deref())
    }

    pub fn foot_width_cm(&self) -> Option<f64> {
        parse_decimal(self.foot_width.as_deref())
    }

    pub fn oblique_circumference_cm(&self) -> Option<f64> {
        parse_decimal(self.oblique_circumference.as_deref())
    }

    pub fn foot_type(&self) -> Option<FootType> {
        self.foot_type.as_deref().and_then(FootType::from_raw)
    }

    /// True when at least one field would take part in scoring
    pub fn has_fit_data(&self) -> bool {
        self.foot_length_cm().is_some()
            || self.foot_width_cm().is_some()
            || self.oblique_circumference_cm().is_some()
            || self.foot_type().is_some()
    }
}

/// Parse a raw decimal, treating blanks, garbage and non-finite values as absent
pub fn parse_decimal(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Accept a string, number or null and keep it as an optional string
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Foot shape category recorded on the measurement form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FootType {
    Normal,
    Flat,
    Supination,
}

impl FootType {
    /// Russian labels stored by the measurement form
    pub const FLAT_LABEL: &'static str = "Плоскостопие";
    pub const SUPINATION_LABEL: &'static str = "Супинация";

    /// Map a stored label onto a category
    ///
    /// Empty values mean "not recorded". Any non-empty value that is neither
    /// flat nor supination counts as a normal foot, whitespace included.
    pub fn from_raw(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        let raw = raw.trim();
        if raw == Self::FLAT_LABEL || raw.eq_ignore_ascii_case("flat") {
            Some(FootType::Flat)
        } else if raw == Self::SUPINATION_LABEL || raw.eq_ignore_ascii_case("supination") {
            Some(FootType::Supination)
        } else {
            Some(FootType::Normal)
        }
    }
}

/// One manufactured size of a shoe model, measurements in millimeters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoeSizeVariant {
    /// EU size label, display only
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub eu: Option<String>,
    pub length: f64,
    pub midfoot_circumference: f64,
    pub oblique_circumference: f64,
    pub ankle_circumference: f64,
    pub toe_circumference: f64,
    pub instep_height: f64,
}

/// Shoe model with its size run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeModel {
    pub model: String,
    /// 1 for athletic lasts, 0 for casual
    #[serde(default)]
    pub sport: u8,
    #[serde(default)]
    pub sizes: Vec<ShoeSizeVariant>,
}

impl ShoeModel {
    /// Helper to get the sport flag as a bool
    pub fn is_sport(&self) -> bool {
        self.sport != 0
    }
}

/// Ordered list of shoe models
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub models: Vec<ShoeModel>,
}

impl Catalog {
    pub fn new(models: Vec<ShoeModel>) -> Self {
        Self { models }
    }

    pub fn find_model(&self, name: &str) -> Option<&ShoeModel> {
        self.models.iter().find(|m| m.model == name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShoeModel> {
        self.models.iter()
    }
}

/// Presentation band of a compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitGrade {
    Good,
    Fair,
    Poor,
}

impl FitGrade {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            FitGrade::Good
        } else if score >= 60 {
            FitGrade::Fair
        } else {
            FitGrade::Poor
        }
    }
}

/// Per-dimension view of a single compatibility calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitBreakdown {
    pub length: Option<u32>,
    pub width: Option<u32>,
    pub oblique: Option<u32>,
    pub foot_type: Option<u32>,
    /// Sum of the weights of the evaluated sub-scores
    pub factors: u32,
    pub raw: u32,
    pub length_bonus: bool,
    pub score: u32,
}

/// A size variant together with its compatibility for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeFit {
    #[serde(flatten)]
    pub size: ShoeSizeVariant,
    pub compatibility: u32,
}

/// Best size of one model for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFit {
    pub model: String,
    pub sport: bool,
    pub compatibility: u32,
    pub grade: FitGrade,
    pub best_size: Option<ShoeSizeVariant>,
    pub all_sizes: Vec<SizeFit>,
}

/// Weights of the four sub-scores, used as the normalization denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitWeights {
    pub length: u32,
    pub width: u32,
    pub oblique: u32,
    pub foot_type: u32,
}

impl Default for FitWeights {
    fn default() -> Self {
        Self {
            length: 46,
            width: 29,
            oblique: 17,
            foot_type: 8,
        }
    }
}

/// Cutoff and cap applied when ranking a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingLimits {
    /// Models whose best score is below this are dropped
    pub min_compatibility: u32,
    pub max_results: usize,
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            min_compatibility: 30,
            max_results: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(Some("25.5")), Some(25.5));
        assert_eq!(parse_decimal(Some(" 26 ")), Some(26.0));
        assert_eq!(parse_decimal(Some("")), None);
        assert_eq!(parse_decimal(Some("abc")), None);
        assert_eq!(parse_decimal(Some("NaN")), None);
        assert_eq!(parse_decimal(None), None);
    }

    #[test]
    fn test_foot_type_labels() {
        assert_eq!(FootType::from_raw("Плоскостопие"), Some(FootType::Flat));
        assert_eq!(FootType::from_raw("Супинация"), Some(FootType::Supination));
        assert_eq!(FootType::from_raw("flat"), Some(FootType::Flat));
        assert_eq!(FootType::from_raw("Нормальная"), Some(FootType::Normal));
        assert_eq!(FootType::from_raw(" Flat "), Some(FootType::Flat));
        assert_eq!(FootType::from_raw(""), None);
    }

    #[test]
    fn test_whitespace_foot_type_is_normal() {
        assert_eq!(FootType::from_raw("  "), Some(FootType::Normal));

        let user = UserMeasurement {
            foot_type: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(user.foot_type(), Some(FootType::Normal));
        assert!(user.has_fit_data());
    }

    #[test]
    fn test_measurement_accepts_numbers_and_strings() {
        let json = r#"{"foot_length": 25, "footWidth": "9.8", "oblique_circumference": null}"#;
        let user: UserMeasurement = serde_json::from_str(json).unwrap();

        assert_eq!(user.foot_length_cm(), Some(25.0));
        assert_eq!(user.foot_width_cm(), Some(9.8));
        assert_eq!(user.oblique_circumference_cm(), None);
        assert_eq!(user.foot_type(), None);
        assert!(user.has_fit_data());
    }

    #[test]
    fn test_empty_measurement_has_no_fit_data() {
        assert!(!UserMeasurement::default().has_fit_data());

        let garbage = UserMeasurement {
            foot_length: Some("long".to_string()),
            foot_type: Some(String::new()),
            ..Default::default()
        };
        assert!(!garbage.has_fit_data());
    }

    #[test]
    fn test_fit_grade_bands() {
        assert_eq!(FitGrade::from_score(100), FitGrade::Good);
        assert_eq!(FitGrade::from_score(80), FitGrade::Good);
        assert_eq!(FitGrade::from_score(79), FitGrade::Fair);
        assert_eq!(FitGrade::from_score(60), FitGrade::Fair);
        assert_eq!(FitGrade::from_score(59), FitGrade::Poor);
    }

    #[test]
    fn test_model_sport_flag() {
        let json = r#"{"model": "Runner", "sport": 1, "sizes": []}"#;
        let model: ShoeModel = serde_json::from_str(json).unwrap();
        assert!(model.is_sport());
    }
}
