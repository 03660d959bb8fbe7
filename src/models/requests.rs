use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::UserMeasurement;

/// Measurement form submitted from the measure page
///
/// Ranges follow what the form accepts: length 15-40 cm, width 5-15 cm,
/// oblique circumference 20-50 cm.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MeasurementForm {
    #[validate(range(min = 15.0, max = 40.0))]
    #[serde(alias = "footLength", alias = "length")]
    pub foot_length: f64,
    #[validate(range(min = 5.0, max = 15.0))]
    #[serde(alias = "footWidth", alias = "width")]
    pub foot_width: f64,
    #[validate(range(min = 20.0, max = 50.0))]
    #[serde(alias = "obliqueCircumference", default)]
    pub oblique_circumference: Option<f64>,
    #[validate(length(min = 1))]
    #[serde(alias = "footType")]
    pub foot_type: String,
}

impl From<MeasurementForm> for UserMeasurement {
    fn from(form: MeasurementForm) -> Self {
        UserMeasurement::from_cm(
            Some(form.foot_length),
            Some(form.foot_width),
            form.oblique_circumference,
            Some(form.foot_type.trim()),
        )
    }
}
