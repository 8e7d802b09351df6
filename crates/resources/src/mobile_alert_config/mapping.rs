//! Declarative model ↔ REST payload for mobile smart-alert configs.

use instana_core::diagnostics::CANCELED_SUMMARY;
use instana_core::schema::ResourceSchema;
use instana_core::{cell_to_optional, optional_to_cell, CancellationToken, Cell, Diagnostics};
use instana_restapi::mobile_alert_config::{
    USER_IMPACT_OF_VIOLATIONS_IN_SEQUENCE, VIOLATIONS_IN_PERIOD, VIOLATIONS_IN_SEQUENCE,
};
use instana_restapi::{
    MobileAlertConfig, MobileAppAlertRule, MobileAppAlertRuleWithThresholds, MobileAppTimeThreshold,
};

use super::constants::*;
use super::model::*;
use crate::handle::ResourceModel;
use crate::shared::alert_channels::{alert_channels_to_rest, alert_channels_to_state};
use crate::shared::custom_payload::{custom_payload_fields_to_rest, custom_payload_fields_to_state};
use crate::shared::tag_filter::{tag_filter_to_rest, tag_filter_to_state};
use crate::shared::threshold::{thresholds_to_rest, thresholds_to_state};
use crate::validation::{check_at_least, check_optional_string, check_required, INVALID_ATTRIBUTE_VALUE};

/// Fill schema defaults the user left out.
pub fn apply_defaults(plan: &mut MobileAlertConfigModel) {
    if plan.triggering.is_absent() {
        plan.triggering = Cell::Present(DEFAULT_TRIGGERING);
    }
    if plan.granularity.is_absent() {
        plan.granularity = Cell::Present(DEFAULT_GRANULARITY);
    }
    if let Some(sequence) = plan
        .time_threshold
        .as_option_mut()
        .and_then(|t| t.violations_in_sequence.as_option_mut())
    {
        if sequence.time_window.is_absent() {
            sequence.time_window = Cell::Present(DEFAULT_TIME_WINDOW);
        }
    }
}

fn check_field(diags: &mut Diagnostics, schema: &ResourceSchema, schema_path: &str, path: &str, value: &Cell<String>) {
    if let Some(attr) = schema.resolve(schema_path) {
        check_optional_string(diags, attr, path, value.as_option().map(String::as_str));
    }
}

fn to_i32(value: &Cell<i64>, path: &str, diags: &mut Diagnostics) -> Option<i32> {
    let value = cell_to_optional(value)?;
    match i32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            diags.add_attribute_error(
                path,
                INVALID_ATTRIBUTE_VALUE,
                format!("Attribute {path} must fit into a 32-bit integer, got: {value}"),
            );
            None
        }
    }
}

/// Required attributes of the top level, of the configured time threshold
/// kind and of every rule block.
fn check_required_fields(schema: &ResourceSchema, model: &MobileAlertConfigModel, diags: &mut Diagnostics) {
    let document = match serde_json::to_value(model) {
        Ok(document) => document,
        Err(err) => {
            diags.add_error(INVALID_ATTRIBUTE_VALUE, err.to_string());
            return;
        }
    };
    check_required(diags, &schema.attributes, &document, "", &[FIELD_TIME_THRESHOLD]);

    if let (Some(threshold), Some(attr)) = (document.get(FIELD_TIME_THRESHOLD), schema.attribute(FIELD_TIME_THRESHOLD)) {
        for kind in attr.children() {
            if let Some(block) = threshold.get(&kind.name).filter(|b| !b.is_null()) {
                let prefix = format!("{FIELD_TIME_THRESHOLD}.{}", kind.name);
                check_required(diags, kind.children(), block, &prefix, &[]);
            }
        }
    }

    let rules = document.get(FIELD_RULES).and_then(|r| r.as_array());
    if let (Some(rules), Some(attr)) = (rules, schema.resolve(&format!("{FIELD_RULES}.{FIELD_RULE}"))) {
        for (i, entry) in rules.iter().enumerate() {
            if let Some(rule) = entry.get(FIELD_RULE).filter(|r| !r.is_null()) {
                check_required(diags, attr.children(), rule, &format!("{FIELD_RULES}[{i}].{FIELD_RULE}"), &[]);
            }
        }
    }
}

// ── state → REST ────────────────────────────────────────────────────

/// Map a model to the payload sent on create and update.
pub fn config_to_rest(
    cancel: &CancellationToken,
    schema: &ResourceSchema,
    model: &MobileAlertConfigModel,
) -> Result<MobileAlertConfig, Diagnostics> {
    let mut diags = Diagnostics::new();
    check_required_fields(schema, model, &mut diags);

    for (field, value) in [
        (FIELD_NAME, &model.name),
        (FIELD_DESCRIPTION, &model.description),
        (FIELD_MOBILE_APP_ID, &model.mobile_app_id),
    ] {
        check_field(&mut diags, schema, field, field, value);
    }

    let tag_filter = match tag_filter_to_rest(cancel, &model.tag_filter, FIELD_TAG_FILTER) {
        Ok(filter) => Some(filter),
        Err(errors) if errors.contains_summary(CANCELED_SUMMARY) => return Err(errors),
        Err(errors) => {
            diags.append(errors);
            None
        }
    };

    check_at_least(&mut diags, FIELD_GRANULARITY, cell_to_optional(&model.granularity), 1);

    let alert_channels = alert_channels_to_rest(&model.alert_channels, &mut diags);
    let custom_payload_fields = custom_payload_fields_to_rest(&model.custom_payload_fields, &mut diags);
    let rules = rules_to_rest(schema, &model.rules, &mut diags);
    let time_threshold = time_threshold_to_rest(&model.time_threshold, &mut diags);

    let config = MobileAlertConfig {
        id: model.resource_id().unwrap_or_default().to_string(),
        name: cell_to_optional(&model.name).unwrap_or_default(),
        description: cell_to_optional(&model.description).unwrap_or_default(),
        mobile_app_id: cell_to_optional(&model.mobile_app_id).unwrap_or_default(),
        triggering: cell_to_optional(&model.triggering).unwrap_or(DEFAULT_TRIGGERING),
        enabled: None,
        tag_filter_expression: tag_filter,
        alert_channels,
        granularity: cell_to_optional(&model.granularity).unwrap_or(DEFAULT_GRANULARITY),
        grace_period: cell_to_optional(&model.grace_period),
        custom_payload_fields,
        rules,
        time_threshold: time_threshold.unwrap_or_default(),
    };
    diags.into_result(config)
}

/// Entries without a `rule` block are skipped.
fn rules_to_rest(
    schema: &ResourceSchema,
    rules: &Cell<Vec<RuleWithThresholdsModel>>,
    diags: &mut Diagnostics,
) -> Vec<MobileAppAlertRuleWithThresholds> {
    let mut out = Vec::new();
    for (i, entry) in rules.as_option().into_iter().flatten().enumerate() {
        let Some(rule) = entry.rule.as_option() else {
            tracing::debug!(index = i, "skipping rules entry without a rule block");
            continue;
        };
        let path = format!("{FIELD_RULES}[{i}]");

        check_field(
            diags,
            schema,
            &format!("{FIELD_RULES}.{FIELD_RULE}.{FIELD_AGGREGATION}"),
            &format!("{path}.{FIELD_RULE}.{FIELD_AGGREGATION}"),
            &rule.aggregation,
        );
        check_field(
            diags,
            schema,
            &format!("{FIELD_RULES}.{FIELD_RULE}.{FIELD_OPERATOR}"),
            &format!("{path}.{FIELD_RULE}.{FIELD_OPERATOR}"),
            &rule.operator,
        );
        check_field(
            diags,
            schema,
            &format!("{FIELD_RULES}.{FIELD_THRESHOLD_OPERATOR}"),
            &format!("{path}.{FIELD_THRESHOLD_OPERATOR}"),
            &entry.threshold_operator,
        );

        let thresholds = thresholds_to_rest(&entry.threshold, &format!("{path}.{FIELD_THRESHOLD}"), diags);
        out.push(MobileAppAlertRuleWithThresholds {
            rule: MobileAppAlertRule {
                alert_type: cell_to_optional(&rule.alert_type).unwrap_or_default(),
                metric_name: cell_to_optional(&rule.metric_name).unwrap_or_default(),
                aggregation: cell_to_optional(&rule.aggregation),
                operator: cell_to_optional(&rule.operator),
                value: cell_to_optional(&rule.value),
                custom_event_name: cell_to_optional(&rule.custom_event_name),
            },
            threshold_operator: cell_to_optional(&entry.threshold_operator).unwrap_or_default(),
            thresholds,
        });
    }
    out
}

fn time_threshold_to_rest(
    threshold: &Cell<TimeThresholdModel>,
    diags: &mut Diagnostics,
) -> Option<MobileAppTimeThreshold> {
    let Some(threshold) = threshold.as_option() else {
        diags.add_attribute_error(FIELD_TIME_THRESHOLD, ERR_TIME_THRESHOLD_REQUIRED, ERR_TIME_THRESHOLD_REQUIRED_MSG);
        return None;
    };

    let configured = [
        threshold.user_impact_of_violations_in_sequence.is_present(),
        threshold.violations_in_period.is_present(),
        threshold.violations_in_sequence.is_present(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();
    if configured != 1 {
        diags.add_attribute_error(FIELD_TIME_THRESHOLD, ERR_INVALID_TIME_THRESHOLD, ERR_INVALID_TIME_THRESHOLD_MSG);
        return None;
    }

    let window_path = |kind: &str| format!("{FIELD_TIME_THRESHOLD}.{kind}.{FIELD_TIME_WINDOW}");

    if let Some(impact) = threshold.user_impact_of_violations_in_sequence.as_option() {
        let time_window = cell_to_optional(&impact.time_window);
        check_at_least(diags, &window_path(FIELD_USER_IMPACT_OF_VIOLATIONS_IN_SEQUENCE), time_window, 1);
        let path = format!("{FIELD_TIME_THRESHOLD}.{FIELD_USER_IMPACT_OF_VIOLATIONS_IN_SEQUENCE}.{FIELD_USERS}");
        return Some(MobileAppTimeThreshold {
            threshold_type: USER_IMPACT_OF_VIOLATIONS_IN_SEQUENCE.to_string(),
            time_window,
            users: to_i32(&impact.users, &path, diags),
            user_percentage: cell_to_optional(&impact.percentage),
            ..Default::default()
        });
    }
    if let Some(period) = threshold.violations_in_period.as_option() {
        let time_window = cell_to_optional(&period.time_window);
        check_at_least(diags, &window_path(FIELD_VIOLATIONS_IN_PERIOD), time_window, 1);
        let path = format!("{FIELD_TIME_THRESHOLD}.{FIELD_VIOLATIONS_IN_PERIOD}.{FIELD_VIOLATIONS}");
        return Some(MobileAppTimeThreshold {
            threshold_type: VIOLATIONS_IN_PERIOD.to_string(),
            time_window,
            violations: to_i32(&period.violations, &path, diags),
            ..Default::default()
        });
    }
    threshold.violations_in_sequence.as_option().map(|sequence| {
        let time_window = cell_to_optional(&sequence.time_window);
        check_at_least(diags, &window_path(FIELD_VIOLATIONS_IN_SEQUENCE), time_window, 1);
        MobileAppTimeThreshold {
            threshold_type: VIOLATIONS_IN_SEQUENCE.to_string(),
            time_window,
            ..Default::default()
        }
    })
}

// ── REST → state ────────────────────────────────────────────────────

/// Project a REST payload onto `prior` (plan or state).
///
/// Scalars, tag filter, channels, payload fields and the time threshold
/// are taken from the payload. Rules are taken from it only when `prior`
/// has none, so the configured order survives re-reads.
pub fn config_to_state(
    payload: &MobileAlertConfig,
    prior: Option<&MobileAlertConfigModel>,
) -> Result<MobileAlertConfigModel, Diagnostics> {
    let mut model = prior.cloned().unwrap_or_default();

    model.id = Cell::Present(payload.id.clone());
    model.name = Cell::Present(payload.name.clone());
    model.description = Cell::Present(payload.description.clone());
    model.mobile_app_id = Cell::Present(payload.mobile_app_id.clone());
    model.triggering = Cell::Present(payload.triggering);
    model.granularity = Cell::Present(payload.granularity);
    model.grace_period = optional_to_cell(payload.grace_period);

    model.tag_filter = tag_filter_to_state(payload.tag_filter_expression.as_ref(), FIELD_TAG_FILTER)?;
    model.alert_channels = alert_channels_to_state(&payload.alert_channels);

    if model.rules.as_option().map_or(true, Vec::is_empty) {
        model.rules = rules_to_state(&payload.rules);
    }

    model.custom_payload_fields = custom_payload_fields_to_state(&payload.custom_payload_fields);
    model.time_threshold = Cell::Present(time_threshold_to_state(&payload.time_threshold));
    Ok(model)
}

fn rules_to_state(rules: &[MobileAppAlertRuleWithThresholds]) -> Cell<Vec<RuleWithThresholdsModel>> {
    if rules.is_empty() {
        return Cell::Null;
    }
    Cell::Present(
        rules
            .iter()
            .map(|entry| RuleWithThresholdsModel {
                rule: Cell::Present(RuleModel {
                    alert_type: Cell::Present(entry.rule.alert_type.clone()),
                    metric_name: Cell::Present(entry.rule.metric_name.clone()),
                    aggregation: optional_to_cell(entry.rule.aggregation.clone()),
                    operator: optional_to_cell(entry.rule.operator.clone()),
                    value: optional_to_cell(entry.rule.value.clone()),
                    custom_event_name: optional_to_cell(entry.rule.custom_event_name.clone()),
                }),
                threshold_operator: Cell::Present(entry.threshold_operator.clone()),
                threshold: Cell::Present(thresholds_to_state(&entry.thresholds)),
            })
            .collect(),
    )
}

/// An unrecognized type yields a block with no kind set.
fn time_threshold_to_state(threshold: &MobileAppTimeThreshold) -> TimeThresholdModel {
    let widen = |v: Option<i32>| optional_to_cell(v.map(i64::from));
    match threshold.threshold_type.as_str() {
        VIOLATIONS_IN_SEQUENCE => TimeThresholdModel {
            violations_in_sequence: Cell::Present(ViolationsInSequenceModel {
                time_window: optional_to_cell(threshold.time_window),
            }),
            ..Default::default()
        },
        VIOLATIONS_IN_PERIOD => TimeThresholdModel {
            violations_in_period: Cell::Present(ViolationsInPeriodModel {
                time_window: optional_to_cell(threshold.time_window),
                violations: widen(threshold.violations),
            }),
            ..Default::default()
        },
        USER_IMPACT_OF_VIOLATIONS_IN_SEQUENCE => TimeThresholdModel {
            user_impact_of_violations_in_sequence: Cell::Present(UserImpactOfViolationsInSequenceModel {
                time_window: optional_to_cell(threshold.time_window),
                users: widen(threshold.users),
                percentage: optional_to_cell(threshold.user_percentage),
            }),
            ..Default::default()
        },
        other => {
            tracing::warn!(threshold_type = other, "unrecognized time threshold type");
            TimeThresholdModel::default()
        }
    }
}
