use serde::{Deserialize, Serialize};

pub const STATIC_THRESHOLD: &str = "staticThreshold";
pub const ADAPTIVE_BASELINE: &str = "adaptiveBaseline";
pub const HISTORIC_BASELINE: &str = "historicBaseline";

/// One severity's threshold. `threshold_type` selects which of the optional
/// fields are meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRule {
    #[serde(rename = "type")]
    pub threshold_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deviation_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Vec<Vec<f64>>>,
}

impl ThresholdRule {
    pub fn static_value(value: f64) -> Self {
        Self {
            threshold_type: STATIC_THRESHOLD.to_string(),
            value: Some(value),
            ..Default::default()
        }
    }
}
