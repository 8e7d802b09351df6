//! Severity-bundled thresholds: static, adaptive baseline, historic baseline.
//!
//! Values are normalized on the way in and on the way out (2 decimals,
//! 4 for baseline cells) so re-applying a read-back model is a no-op. The
//! baseline matrix itself is sent as configured.

use std::collections::BTreeMap;

use instana_core::numeric::{round_baseline_matrix, round_threshold};
use instana_core::schema::{Attribute, AttributeKind};
use instana_core::{cell_to_optional, optional_to_cell, Cell, Diagnostics};
use instana_restapi::threshold::{ADAPTIVE_BASELINE, HISTORIC_BASELINE, STATIC_THRESHOLD};
use instana_restapi::{AlertSeverity, ThresholdRule};
use serde::{Deserialize, Serialize};

use crate::validation::INVALID_ATTRIBUTE_VALUE;

pub const FIELD_WARNING: &str = "warning";
pub const FIELD_CRITICAL: &str = "critical";
pub const FIELD_STATIC: &str = "static";
pub const FIELD_ADAPTIVE_BASELINE: &str = "adaptive_baseline";
pub const FIELD_HISTORIC_BASELINE: &str = "historic_baseline";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdBundleModel {
    pub warning: Cell<ThresholdModel>,
    pub critical: Cell<ThresholdModel>,
}

/// Exactly one of the three kinds is expected to be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdModel {
    #[serde(rename = "static")]
    pub static_threshold: Cell<StaticThresholdModel>,
    pub adaptive_baseline: Cell<AdaptiveBaselineModel>,
    pub historic_baseline: Cell<HistoricBaselineModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticThresholdModel {
    pub value: Cell<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveBaselineModel {
    pub seasonality: Cell<String>,
    pub deviation_factor: Cell<f64>,
    pub adaptability: Cell<f64>,
    pub operator: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricBaselineModel {
    pub seasonality: Cell<String>,
    pub deviation_factor: Cell<f64>,
    pub baseline: Cell<Vec<Vec<f64>>>,
}

impl ThresholdModel {
    pub fn static_value(value: f64) -> Self {
        Self {
            static_threshold: Cell::Present(StaticThresholdModel {
                value: Cell::Present(value),
            }),
            ..Default::default()
        }
    }
}

// ── state → REST ────────────────────────────────────────────────────

fn rounded(cell: &Cell<f64>) -> Option<f64> {
    cell_to_optional(cell).map(round_threshold)
}

/// Map a bundle to the REST severity map. Absent severities are omitted.
pub fn thresholds_to_rest(
    bundle: &Cell<ThresholdBundleModel>,
    path: &str,
    diags: &mut Diagnostics,
) -> BTreeMap<AlertSeverity, ThresholdRule> {
    let mut map = BTreeMap::new();
    let Some(bundle) = bundle.as_option() else {
        return map;
    };
    for (severity, field, slot) in [
        (AlertSeverity::Warning, FIELD_WARNING, &bundle.warning),
        (AlertSeverity::Critical, FIELD_CRITICAL, &bundle.critical),
    ] {
        if let Some(threshold) = slot.as_option() {
            if let Some(rule) = threshold_to_rest(threshold, &format!("{path}.{field}"), diags) {
                map.insert(severity, rule);
            }
        }
    }
    map
}

/// `None` when no kind is set; an error when more than one is.
pub fn threshold_to_rest(
    threshold: &ThresholdModel,
    path: &str,
    diags: &mut Diagnostics,
) -> Option<ThresholdRule> {
    let set = [
        threshold.static_threshold.is_present(),
        threshold.adaptive_baseline.is_present(),
        threshold.historic_baseline.is_present(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();
    if set > 1 {
        diags.add_attribute_error(
            path,
            INVALID_ATTRIBUTE_VALUE,
            format!(
                "Exactly one of {FIELD_STATIC}, {FIELD_ADAPTIVE_BASELINE}, {FIELD_HISTORIC_BASELINE} must be set at {path}"
            ),
        );
        return None;
    }

    if let Some(st) = threshold.static_threshold.as_option() {
        return Some(ThresholdRule {
            threshold_type: STATIC_THRESHOLD.to_string(),
            value: rounded(&st.value),
            ..Default::default()
        });
    }
    if let Some(adaptive) = threshold.adaptive_baseline.as_option() {
        return Some(ThresholdRule {
            threshold_type: ADAPTIVE_BASELINE.to_string(),
            seasonality: cell_to_optional(&adaptive.seasonality),
            deviation_factor: rounded(&adaptive.deviation_factor),
            adaptability: rounded(&adaptive.adaptability),
            operator: cell_to_optional(&adaptive.operator),
            ..Default::default()
        });
    }
    if let Some(historic) = threshold.historic_baseline.as_option() {
        return Some(ThresholdRule {
            threshold_type: HISTORIC_BASELINE.to_string(),
            seasonality: cell_to_optional(&historic.seasonality),
            deviation_factor: rounded(&historic.deviation_factor),
            baseline: cell_to_optional(&historic.baseline),
            ..Default::default()
        });
    }
    None
}

// ── REST → state ────────────────────────────────────────────────────

pub fn thresholds_to_state(map: &BTreeMap<AlertSeverity, ThresholdRule>) -> ThresholdBundleModel {
    ThresholdBundleModel {
        warning: optional_to_cell(map.get(&AlertSeverity::Warning).map(threshold_to_state)),
        critical: optional_to_cell(map.get(&AlertSeverity::Critical).map(threshold_to_state)),
    }
}

/// Unrecognized types are read as static thresholds.
pub fn threshold_to_state(rule: &ThresholdRule) -> ThresholdModel {
    let round = |v: Option<f64>| optional_to_cell(v.map(round_threshold));
    match rule.threshold_type.as_str() {
        ADAPTIVE_BASELINE => ThresholdModel {
            adaptive_baseline: Cell::Present(AdaptiveBaselineModel {
                seasonality: optional_to_cell(rule.seasonality.clone()),
                deviation_factor: round(rule.deviation_factor),
                adaptability: round(rule.adaptability),
                operator: optional_to_cell(rule.operator.clone()),
            }),
            ..Default::default()
        },
        HISTORIC_BASELINE => ThresholdModel {
            historic_baseline: Cell::Present(HistoricBaselineModel {
                seasonality: optional_to_cell(rule.seasonality.clone()),
                deviation_factor: round(rule.deviation_factor),
                baseline: optional_to_cell(rule.baseline.as_deref().map(round_baseline_matrix)),
            }),
            ..Default::default()
        },
        other => {
            if other != STATIC_THRESHOLD {
                tracing::debug!(threshold_type = other, "reading unrecognized threshold type as static");
            }
            ThresholdModel {
                static_threshold: Cell::Present(StaticThresholdModel {
                    value: round(rule.value),
                }),
                ..Default::default()
            }
        }
    }
}

// ── schema ──────────────────────────────────────────────────────────

fn threshold_kinds() -> Vec<Attribute> {
    vec![
        Attribute::optional(
            FIELD_STATIC,
            AttributeKind::Object(vec![Attribute::required(
                "value",
                AttributeKind::Float64,
                "The value of the static threshold",
            )]),
            "Static threshold definition",
        ),
        Attribute::optional(
            FIELD_ADAPTIVE_BASELINE,
            AttributeKind::Object(vec![
                Attribute::required("deviation_factor", AttributeKind::Float64, "The deviation factor of the adaptive baseline threshold"),
                Attribute::required("adaptability", AttributeKind::Float64, "The adaptability of the adaptive baseline threshold"),
                Attribute::required("seasonality", AttributeKind::String, "The seasonality of the adaptive baseline threshold"),
                Attribute::optional("operator", AttributeKind::String, "The operator of the adaptive baseline threshold"),
            ]),
            "Adaptive baseline threshold definition",
        ),
        Attribute::optional(
            FIELD_HISTORIC_BASELINE,
            AttributeKind::Object(vec![
                Attribute::optional(
                    "baseline",
                    AttributeKind::List(Box::new(AttributeKind::List(Box::new(AttributeKind::Float64)))),
                    "The baseline of the historic baseline threshold",
                ),
                Attribute::required("deviation_factor", AttributeKind::Float64, "The deviation factor of the historic baseline threshold"),
                Attribute::required("seasonality", AttributeKind::String, "The seasonality of the historic baseline threshold"),
            ]),
            "Historic baseline threshold definition",
        ),
    ]
}

/// `threshold { warning { ... } critical { ... } }`.
pub fn threshold_bundle_attribute(name: &str, description: &str) -> Attribute {
    Attribute::optional(
        name,
        AttributeKind::Object(vec![
            Attribute::optional(FIELD_WARNING, AttributeKind::Object(threshold_kinds()), "Threshold configuration for the warning severity"),
            Attribute::optional(FIELD_CRITICAL, AttributeKind::Object(threshold_kinds()), "Threshold configuration for the critical severity"),
        ]),
        description,
    )
}
