use instana_core::schema::{Attribute, AttributeKind, DefaultValue, ResourceSchema};

use super::constants::*;
use crate::shared::alert_channels::FIELD_ALERT_CHANNELS;
use crate::shared::custom_payload::custom_payload_fields_attribute;
use crate::shared::threshold::threshold_bundle_attribute;

pub const SCHEMA_VERSION: i64 = 1;

fn time_window() -> Attribute {
    Attribute::optional_computed(FIELD_TIME_WINDOW, AttributeKind::Int64, "The time window of the time threshold.")
}

fn rule_attributes() -> Vec<Attribute> {
    vec![
        Attribute::required(FIELD_ALERT_TYPE, AttributeKind::String, "The type of alert rule."),
        Attribute::required(FIELD_METRIC_NAME, AttributeKind::String, "The metric name of the mobile alert rule."),
        Attribute::optional_computed(
            FIELD_AGGREGATION,
            AttributeKind::String,
            "The aggregation function of the mobile alert rule.",
        )
        .one_of(AGGREGATIONS),
        Attribute::optional_computed(
            FIELD_OPERATOR,
            AttributeKind::String,
            "The operator for the rule. Valid values are STARTS_WITH and EQUALS.",
        )
        .one_of(RULE_OPERATORS),
        Attribute::optional_computed(FIELD_VALUE, AttributeKind::String, "The value to compare against."),
        Attribute::optional(
            FIELD_CUSTOM_EVENT_NAME,
            AttributeKind::String,
            "The name of the custom event to monitor. Required when alert_type is 'customEvent'.",
        ),
    ]
}

fn time_threshold_attribute() -> Attribute {
    Attribute::required(
        FIELD_TIME_THRESHOLD,
        AttributeKind::Object(vec![
            Attribute::optional(
                FIELD_USER_IMPACT_OF_VIOLATIONS_IN_SEQUENCE,
                AttributeKind::Object(vec![
                    time_window(),
                    Attribute::optional_computed(FIELD_USERS, AttributeKind::Int64, "The number of impacted users."),
                    Attribute::optional_computed(FIELD_PERCENTAGE, AttributeKind::Float64, "The percentage of impacted users."),
                ]),
                "Time threshold based on user impact of violations in sequence.",
            ),
            Attribute::optional(
                FIELD_VIOLATIONS_IN_PERIOD,
                AttributeKind::Object(vec![
                    time_window(),
                    Attribute::required(FIELD_VIOLATIONS, AttributeKind::Int64, "The violations appeared in the period."),
                ]),
                "Time threshold based on violations in period.",
            ),
            Attribute::optional(
                FIELD_VIOLATIONS_IN_SEQUENCE,
                AttributeKind::Object(vec![time_window().with_default(DefaultValue::Int64(DEFAULT_TIME_WINDOW))]),
                "Time threshold based on violations in sequence.",
            ),
        ]),
        DESC_TIME_THRESHOLD,
    )
}

pub fn mobile_alert_config_schema() -> ResourceSchema {
    ResourceSchema {
        type_name: RESOURCE_MOBILE_ALERT_CONFIG.to_string(),
        description: DESC_RESOURCE.to_string(),
        version: SCHEMA_VERSION,
        attributes: vec![
            Attribute::computed(FIELD_ID, AttributeKind::String, DESC_ID),
            Attribute::required(FIELD_NAME, AttributeKind::String, DESC_NAME).length_between(0, MAX_NAME_LENGTH),
            Attribute::required(FIELD_DESCRIPTION, AttributeKind::String, DESC_DESCRIPTION)
                .length_between(0, MAX_DESCRIPTION_LENGTH),
            Attribute::required(FIELD_MOBILE_APP_ID, AttributeKind::String, DESC_MOBILE_APP_ID)
                .length_between(0, MAX_MOBILE_APP_ID_LENGTH),
            Attribute::optional_computed(FIELD_TRIGGERING, AttributeKind::Bool, DESC_TRIGGERING)
                .with_default(DefaultValue::Bool(DEFAULT_TRIGGERING)),
            Attribute::optional(FIELD_TAG_FILTER, AttributeKind::String, DESC_TAG_FILTER),
            Attribute::optional(
                FIELD_ALERT_CHANNELS,
                AttributeKind::Map(Box::new(AttributeKind::Set(Box::new(AttributeKind::String)))),
                DESC_ALERT_CHANNELS,
            ),
            Attribute::optional_computed(FIELD_GRANULARITY, AttributeKind::Int64, DESC_GRANULARITY)
                .with_default(DefaultValue::Int64(DEFAULT_GRANULARITY)),
            Attribute::optional_computed(FIELD_GRACE_PERIOD, AttributeKind::Int64, DESC_GRACE_PERIOD),
            custom_payload_fields_attribute(),
            Attribute::optional_computed(
                FIELD_RULES,
                AttributeKind::ObjectList(vec![
                    Attribute::optional_computed(
                        FIELD_RULE,
                        AttributeKind::Object(rule_attributes()),
                        "The mobile app alert rule configuration.",
                    ),
                    Attribute::optional_computed(
                        FIELD_THRESHOLD_OPERATOR,
                        AttributeKind::String,
                        "The operator to apply for threshold comparison.",
                    )
                    .one_of(THRESHOLD_OPERATORS),
                    threshold_bundle_attribute(FIELD_THRESHOLD, "Threshold configuration for different severity levels."),
                ]),
                DESC_RULES,
            ),
            time_threshold_attribute(),
        ],
    }
}
