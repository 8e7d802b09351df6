use instana_core::Cell;
use serde::{Deserialize, Serialize};

use crate::handle::ResourceModel;
use crate::shared::alert_channels::AlertChannelsModel;
use crate::shared::custom_payload::CustomPayloadFieldModel;
use crate::shared::threshold::ThresholdBundleModel;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobileAlertConfigModel {
    pub id: Cell<String>,
    pub name: Cell<String>,
    pub description: Cell<String>,
    pub mobile_app_id: Cell<String>,
    pub triggering: Cell<bool>,
    /// Tag-filter expression text, stored in canonical form after a read.
    pub tag_filter: Cell<String>,
    pub alert_channels: Cell<AlertChannelsModel>,
    pub granularity: Cell<i64>,
    pub grace_period: Cell<i64>,
    pub custom_payload_fields: Cell<Vec<CustomPayloadFieldModel>>,
    pub rules: Cell<Vec<RuleWithThresholdsModel>>,
    pub time_threshold: Cell<TimeThresholdModel>,
}

impl ResourceModel for MobileAlertConfigModel {
    fn resource_id(&self) -> Option<&str> {
        self.id.as_option().map(String::as_str).filter(|id| !id.is_empty())
    }

    fn set_resource_id(&mut self, id: String) {
        self.id = Cell::Present(id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWithThresholdsModel {
    pub rule: Cell<RuleModel>,
    pub threshold_operator: Cell<String>,
    pub threshold: Cell<ThresholdBundleModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleModel {
    pub alert_type: Cell<String>,
    pub metric_name: Cell<String>,
    pub aggregation: Cell<String>,
    pub operator: Cell<String>,
    pub value: Cell<String>,
    pub custom_event_name: Cell<String>,
}

/// Exactly one of the three kinds must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeThresholdModel {
    pub user_impact_of_violations_in_sequence: Cell<UserImpactOfViolationsInSequenceModel>,
    pub violations_in_period: Cell<ViolationsInPeriodModel>,
    pub violations_in_sequence: Cell<ViolationsInSequenceModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserImpactOfViolationsInSequenceModel {
    pub time_window: Cell<i64>,
    pub users: Cell<i64>,
    pub percentage: Cell<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViolationsInPeriodModel {
    pub time_window: Cell<i64>,
    pub violations: Cell<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViolationsInSequenceModel {
    pub time_window: Cell<i64>,
}
