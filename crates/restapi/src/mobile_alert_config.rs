//! Mobile smart-alert configuration payload.

use std::collections::BTreeMap;
use std::fmt;

use instana_tagfilter::TagFilter;
use serde::{Deserialize, Serialize};

use crate::custom_payload::CustomPayloadField;
use crate::resource::InstanaDataObject;
use crate::threshold::ThresholdRule;

pub const MOBILE_ALERT_CONFIGS_PATH: &str = "/api/events/settings/mobile-app-alert-configs";

pub const VIOLATIONS_IN_SEQUENCE: &str = "violationsInSequence";
pub const VIOLATIONS_IN_PERIOD: &str = "violationsInPeriod";
pub const USER_IMPACT_OF_VIOLATIONS_IN_SEQUENCE: &str = "userImpactOfViolationsInSequence";

/// Severity key used by alert-channel and threshold maps.
///
/// The API also reports severities by numeric code (5 and 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertSeverity {
    #[serde(rename = "WARNING", alias = "5")]
    Warning,
    #[serde(rename = "CRITICAL", alias = "10")]
    Critical,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 2] = [AlertSeverity::Warning, AlertSeverity::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::Warning => "WARNING",
            AlertSeverity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileAlertConfig {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub mobile_app_id: String,
    #[serde(default)]
    pub triggering: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub tag_filter_expression: Option<TagFilter>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alert_channels: BTreeMap<AlertSeverity, Vec<String>>,
    pub granularity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period: Option<i64>,
    #[serde(default)]
    pub custom_payload_fields: Vec<CustomPayloadField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<MobileAppAlertRuleWithThresholds>,
    pub time_threshold: MobileAppTimeThreshold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileAppAlertRule {
    pub alert_type: String,
    pub metric_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_event_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileAppAlertRuleWithThresholds {
    pub rule: MobileAppAlertRule,
    pub threshold_operator: String,
    #[serde(default)]
    pub thresholds: BTreeMap<AlertSeverity, ThresholdRule>,
}

/// Temporal escalation condition; `threshold_type` selects the meaningful fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileAppTimeThreshold {
    #[serde(rename = "type")]
    pub threshold_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_measurement_method: Option<String>,
}

impl InstanaDataObject for MobileAlertConfig {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_in_period_wire_shape() {
        let threshold = MobileAppTimeThreshold {
            threshold_type: VIOLATIONS_IN_PERIOD.into(),
            time_window: Some(600_000),
            violations: Some(5),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&threshold).unwrap(),
            serde_json::json!({"type": "violationsInPeriod", "timeWindow": 600000, "violations": 5})
        );
    }

    #[test]
    fn severity_keys_serialize_uppercase() {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(AlertSeverity::Warning, ThresholdRule::static_value(100.0));
        thresholds.insert(AlertSeverity::Critical, ThresholdRule::static_value(200.0));
        let json = serde_json::to_value(&thresholds).unwrap();
        assert_eq!(json["WARNING"]["type"], "staticThreshold");
        assert_eq!(json["CRITICAL"]["value"], 200.0);
    }

    #[test]
    fn numeric_severity_codes_are_accepted() {
        let channels: BTreeMap<AlertSeverity, Vec<String>> =
            serde_json::from_str(r#"{"5": ["a"], "10": ["b"]}"#).unwrap();
        assert_eq!(channels[&AlertSeverity::Warning], vec!["a".to_string()]);
        assert_eq!(channels[&AlertSeverity::Critical], vec!["b".to_string()]);
    }

    #[test]
    fn deserializes_minimal_payload() {
        let config: MobileAlertConfig = serde_json::from_str(
            r#"{
                "id": "m1",
                "name": "crashes",
                "mobileAppId": "app",
                "granularity": 600000,
                "tagFilterExpression": null,
                "timeThreshold": {"type": "violationsInSequence", "timeWindow": 600000}
            }"#,
        )
        .unwrap();
        assert_eq!(config.id, "m1");
        assert!(config.tag_filter_expression.is_none());
        assert!(config.alert_channels.is_empty());
        assert!(config.rules.is_empty());
        assert_eq!(config.time_threshold.threshold_type, VIOLATIONS_IN_SEQUENCE);
    }

    #[test]
    fn enabled_is_omitted_when_unset() {
        let config = MobileAlertConfig {
            id: String::new(),
            name: "n".into(),
            description: String::new(),
            mobile_app_id: "app".into(),
            triggering: false,
            enabled: None,
            tag_filter_expression: Some(TagFilter::empty()),
            alert_channels: BTreeMap::new(),
            granularity: 600_000,
            grace_period: None,
            custom_payload_fields: Vec::new(),
            rules: Vec::new(),
            time_threshold: MobileAppTimeThreshold::default(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("enabled").is_none());
        assert!(json.get("gracePeriod").is_none());
        assert!(json.get("alertChannels").is_none());
        assert_eq!(json["tagFilterExpression"]["logicalOperator"], "AND");
    }
}
