use std::collections::BTreeSet;

use instana_core::diagnostics::CANCELED_SUMMARY;
use instana_core::{CancellationToken, Cell};
use instana_restapi::threshold::STATIC_THRESHOLD;
use instana_restapi::{AlertSeverity, MobileAlertConfig};
use instana_tagfilter::TagFilter;

use super::constants::*;
use super::*;
use crate::shared::custom_payload::CustomPayloadFieldModel;
use crate::shared::tag_filter::{ERR_MAP_FILTER_EXPRESSION, ERR_PARSE_TAG_FILTER};
use crate::shared::threshold::{
    AdaptiveBaselineModel, HistoricBaselineModel, ThresholdBundleModel, ThresholdModel,
};
use crate::validation::{INVALID_ATTRIBUTE_VALUE, MISSING_REQUIRED_ARGUMENT};

fn s(value: &str) -> Cell<String> {
    Cell::Present(value.to_string())
}

fn to_rest(model: &MobileAlertConfigModel) -> Result<MobileAlertConfig, Diagnostics> {
    config_to_rest(&CancellationToken::new(), &mobile_alert_config_schema(), model)
}

fn in_sequence() -> Cell<TimeThresholdModel> {
    Cell::Present(TimeThresholdModel {
        violations_in_sequence: Cell::Present(ViolationsInSequenceModel {
            time_window: Cell::Present(600_000),
        }),
        ..Default::default()
    })
}

fn minimal() -> MobileAlertConfigModel {
    MobileAlertConfigModel {
        name: s("crashes"),
        description: s("crash rate"),
        mobile_app_id: s("app-1"),
        triggering: Cell::Present(false),
        granularity: Cell::Present(600_000),
        time_threshold: in_sequence(),
        ..Default::default()
    }
}

fn static_rule(warning: f64, critical: f64) -> RuleWithThresholdsModel {
    RuleWithThresholdsModel {
        rule: Cell::Present(RuleModel {
            alert_type: s("crash"),
            metric_name: s("crashes"),
            aggregation: s("SUM"),
            ..Default::default()
        }),
        threshold_operator: s(">"),
        threshold: Cell::Present(ThresholdBundleModel {
            warning: Cell::Present(ThresholdModel::static_value(warning)),
            critical: Cell::Present(ThresholdModel::static_value(critical)),
        }),
    }
}

#[test]
fn violations_in_period_round_trips() {
    let model = MobileAlertConfigModel {
        id: s("m1"),
        time_threshold: Cell::Present(TimeThresholdModel {
            violations_in_period: Cell::Present(ViolationsInPeriodModel {
                time_window: Cell::Present(600_000),
                violations: Cell::Present(5),
            }),
            ..Default::default()
        }),
        ..minimal()
    };
    let rest = to_rest(&model).unwrap();
    assert_eq!(
        serde_json::to_value(&rest.time_threshold).unwrap(),
        serde_json::json!({"type": "violationsInPeriod", "timeWindow": 600000, "violations": 5})
    );

    let back = config_to_state(&rest, None).unwrap();
    assert_eq!(back, model);
}

#[test]
fn static_rule_thresholds_use_severity_keys() {
    let model = MobileAlertConfigModel {
        rules: Cell::Present(vec![static_rule(100.0, 200.0)]),
        ..minimal()
    };
    let rest = to_rest(&model).unwrap();
    let thresholds = &rest.rules[0].thresholds;
    assert_eq!(thresholds[&AlertSeverity::Warning].threshold_type, STATIC_THRESHOLD);
    assert_eq!(thresholds[&AlertSeverity::Warning].value, Some(100.0));
    assert_eq!(thresholds[&AlertSeverity::Critical].value, Some(200.0));

    let json = serde_json::to_value(&rest).unwrap();
    assert_eq!(json["rules"][0]["thresholds"]["WARNING"]["type"], "staticThreshold");
    assert_eq!(json["rules"][0]["thresholds"]["CRITICAL"]["value"], 200.0);

    let back = config_to_state(&rest, None).unwrap();
    assert_eq!(back.rules, model.rules);
}

#[test]
fn full_config_round_trips() {
    let adaptive = ThresholdModel {
        adaptive_baseline: Cell::Present(AdaptiveBaselineModel {
            seasonality: s("DAILY"),
            deviation_factor: Cell::Present(1.5),
            adaptability: Cell::Present(0.75),
            operator: Cell::Null,
        }),
        ..Default::default()
    };
    let historic = ThresholdModel {
        historic_baseline: Cell::Present(HistoricBaselineModel {
            seasonality: s("WEEKLY"),
            deviation_factor: Cell::Present(2.0),
            baseline: Cell::Present(vec![vec![1.5, 2.25], vec![0.125]]),
        }),
        ..Default::default()
    };
    let model = MobileAlertConfigModel {
        id: s("m1"),
        tag_filter: s("mobile.app.name@dest EQUALS 'shop'"),
        alert_channels: Cell::Present(
            [("warning".to_string(), BTreeSet::from(["c1".to_string()]))]
                .into_iter()
                .collect(),
        ),
        grace_period: Cell::Present(300_000),
        custom_payload_fields: Cell::Present(vec![CustomPayloadFieldModel::static_string("team", "mobile")]),
        rules: Cell::Present(vec![RuleWithThresholdsModel {
            rule: Cell::Present(RuleModel {
                alert_type: s("slowness"),
                metric_name: s("httpLatency"),
                aggregation: s("P90"),
                operator: s("EQUALS"),
                value: s("checkout"),
                custom_event_name: Cell::Null,
            }),
            threshold_operator: s(">="),
            threshold: Cell::Present(ThresholdBundleModel {
                warning: Cell::Present(adaptive),
                critical: Cell::Present(historic),
            }),
        }]),
        time_threshold: Cell::Present(TimeThresholdModel {
            user_impact_of_violations_in_sequence: Cell::Present(UserImpactOfViolationsInSequenceModel {
                time_window: Cell::Present(600_000),
                users: Cell::Present(25),
                percentage: Cell::Present(0.5),
            }),
            ..Default::default()
        }),
        ..minimal()
    };

    let rest = to_rest(&model).unwrap();
    assert_eq!(rest.time_threshold.user_percentage, Some(0.5));
    assert_eq!(config_to_state(&rest, None).unwrap(), model);
}

#[test]
fn absent_tag_filter_sends_empty_and_expression() {
    let rest = to_rest(&minimal()).unwrap();
    assert_eq!(rest.tag_filter_expression, Some(TagFilter::empty()));

    let back = config_to_state(&rest, None).unwrap();
    assert!(back.tag_filter.is_null());
}

#[test]
fn unparsable_tag_filter_is_reported() {
    let model = MobileAlertConfigModel {
        tag_filter: s("mobile.app.name EQUALS"),
        ..minimal()
    };
    let diags = to_rest(&model).unwrap_err();
    let entry = diags.iter().next().unwrap();
    assert_eq!(entry.summary, ERR_PARSE_TAG_FILTER);
    assert_eq!(entry.path.as_deref(), Some("tag_filter"));
}

#[test]
fn unmappable_tag_filter_on_read_is_reported() {
    let mut rest = to_rest(&minimal()).unwrap();
    rest.tag_filter_expression = Some(TagFilter::tag("name", "EQUALS", "DESTINATION"));
    let diags = config_to_state(&rest, None).unwrap_err();
    let entry = diags.iter().next().unwrap();
    assert_eq!(entry.summary, ERR_MAP_FILTER_EXPRESSION);
    assert!(entry.detail.starts_with("Failed to map filter expression: "));
}

#[test]
fn canceled_token_stops_tag_filter_parsing() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let model = MobileAlertConfigModel {
        tag_filter: s("a EQUALS 1"),
        ..minimal()
    };
    let diags = config_to_rest(&cancel, &mobile_alert_config_schema(), &model).unwrap_err();
    assert!(diags.contains_summary(CANCELED_SUMMARY));
    assert_eq!(diags.len(), 1);
}

#[test]
fn missing_time_threshold_is_required() {
    for absent in [Cell::Null, Cell::Unknown] {
        let model = MobileAlertConfigModel {
            time_threshold: absent,
            ..minimal()
        };
        let diags = to_rest(&model).unwrap_err();
        assert!(diags.contains_summary(ERR_TIME_THRESHOLD_REQUIRED));
    }
}

#[test]
fn time_threshold_needs_exactly_one_kind() {
    let empty = MobileAlertConfigModel {
        time_threshold: Cell::Present(TimeThresholdModel::default()),
        ..minimal()
    };
    assert!(to_rest(&empty)
        .unwrap_err()
        .contains_summary(ERR_INVALID_TIME_THRESHOLD));

    let mut two = minimal();
    if let Some(threshold) = two.time_threshold.as_option_mut() {
        threshold.violations_in_period = Cell::Present(ViolationsInPeriodModel {
            time_window: Cell::Present(60_000),
            violations: Cell::Present(2),
        });
    }
    assert!(to_rest(&two)
        .unwrap_err()
        .contains_summary(ERR_INVALID_TIME_THRESHOLD));
}

#[test]
fn rule_entries_without_rule_block_are_skipped() {
    let model = MobileAlertConfigModel {
        rules: Cell::Present(vec![
            RuleWithThresholdsModel {
                threshold_operator: s(">"),
                ..Default::default()
            },
            static_rule(1.0, 2.0),
        ]),
        ..minimal()
    };
    let rest = to_rest(&model).unwrap();
    assert_eq!(rest.rules.len(), 1);
    assert_eq!(rest.rules[0].rule.alert_type, "crash");
}

#[test]
fn enumerations_are_validated_with_paths() {
    let mut rule = static_rule(1.0, 2.0);
    rule.threshold_operator = s("=>");
    if let Some(r) = rule.rule.as_option_mut() {
        r.aggregation = s("AVG");
    }
    let model = MobileAlertConfigModel {
        rules: Cell::Present(vec![rule]),
        ..minimal()
    };
    let diags = to_rest(&model).unwrap_err();
    let paths: Vec<&str> = diags.iter().filter_map(|d| d.path.as_deref()).collect();
    assert_eq!(paths, vec!["rules[0].rule.aggregation", "rules[0].threshold_operator"]);
    assert!(diags.iter().all(|d| d.summary == INVALID_ATTRIBUTE_VALUE));
}

#[test]
fn nameless_config_is_rejected() {
    let model = MobileAlertConfigModel {
        name: Cell::Null,
        mobile_app_id: Cell::Unknown,
        ..minimal()
    };
    let diags = to_rest(&model).unwrap_err();
    let paths: Vec<&str> = diags.iter().filter_map(|d| d.path.as_deref()).collect();
    assert_eq!(paths, vec!["name", "mobile_app_id"]);
    assert!(diags.iter().all(|d| d.summary == MISSING_REQUIRED_ARGUMENT));
}

#[test]
fn rule_blocks_need_alert_type_and_metric() {
    let mut rule = static_rule(1.0, 2.0);
    if let Some(r) = rule.rule.as_option_mut() {
        r.metric_name = Cell::Null;
    }
    let model = MobileAlertConfigModel {
        rules: Cell::Present(vec![static_rule(1.0, 2.0), rule]),
        ..minimal()
    };
    let diags = to_rest(&model).unwrap_err();
    assert_eq!(
        diags.iter().next().unwrap().path.as_deref(),
        Some("rules[1].rule.metric_name")
    );
}

#[test]
fn violations_in_period_needs_a_count() {
    let model = MobileAlertConfigModel {
        time_threshold: Cell::Present(TimeThresholdModel {
            violations_in_period: Cell::Present(ViolationsInPeriodModel {
                time_window: Cell::Present(600_000),
                violations: Cell::Null,
            }),
            ..Default::default()
        }),
        ..minimal()
    };
    let diags = to_rest(&model).unwrap_err();
    let entry = diags.iter().next().unwrap();
    assert_eq!(entry.summary, MISSING_REQUIRED_ARGUMENT);
    assert_eq!(entry.path.as_deref(), Some("time_threshold.violations_in_period.violations"));
}

#[test]
fn granularity_must_be_positive() {
    for granularity in [0, -5] {
        let model = MobileAlertConfigModel {
            granularity: Cell::Present(granularity),
            ..minimal()
        };
        let diags = to_rest(&model).unwrap_err();
        let entry = diags.iter().next().unwrap();
        assert_eq!(entry.summary, INVALID_ATTRIBUTE_VALUE);
        assert_eq!(entry.path.as_deref(), Some("granularity"));
    }
}

#[test]
fn time_window_must_be_positive() {
    let model = MobileAlertConfigModel {
        time_threshold: Cell::Present(TimeThresholdModel {
            violations_in_period: Cell::Present(ViolationsInPeriodModel {
                time_window: Cell::Present(0),
                violations: Cell::Present(3),
            }),
            ..Default::default()
        }),
        ..minimal()
    };
    let diags = to_rest(&model).unwrap_err();
    assert_eq!(
        diags.iter().next().unwrap().path.as_deref(),
        Some("time_threshold.violations_in_period.time_window")
    );

    let mut sequence = minimal();
    sequence.time_threshold = Cell::Present(TimeThresholdModel {
        violations_in_sequence: Cell::Present(ViolationsInSequenceModel {
            time_window: Cell::Present(-1),
        }),
        ..Default::default()
    });
    assert!(to_rest(&sequence).unwrap_err().has_error());
}

#[test]
fn mobile_app_id_length_is_bounded() {
    let model = MobileAlertConfigModel {
        mobile_app_id: Cell::Present("x".repeat(65)),
        ..minimal()
    };
    let diags = to_rest(&model).unwrap_err();
    assert_eq!(diags.iter().next().unwrap().path.as_deref(), Some("mobile_app_id"));
}

#[test]
fn oversized_violation_count_is_rejected() {
    let model = MobileAlertConfigModel {
        time_threshold: Cell::Present(TimeThresholdModel {
            violations_in_period: Cell::Present(ViolationsInPeriodModel {
                time_window: Cell::Present(600_000),
                violations: Cell::Present(i64::from(i32::MAX) + 1),
            }),
            ..Default::default()
        }),
        ..minimal()
    };
    let diags = to_rest(&model).unwrap_err();
    assert_eq!(
        diags.iter().next().unwrap().path.as_deref(),
        Some("time_threshold.violations_in_period.violations")
    );
}

#[test]
fn defaults_fill_absent_values_only() {
    let mut plan = MobileAlertConfigModel {
        triggering: Cell::Unknown,
        granularity: Cell::Null,
        time_threshold: Cell::Present(TimeThresholdModel {
            violations_in_sequence: Cell::Present(ViolationsInSequenceModel::default()),
            ..Default::default()
        }),
        ..minimal()
    };
    apply_defaults(&mut plan);
    assert_eq!(plan.triggering, Cell::Present(false));
    assert_eq!(plan.granularity, Cell::Present(600_000));
    assert_eq!(plan.time_threshold, in_sequence());

    let mut custom = MobileAlertConfigModel {
        granularity: Cell::Present(300_000),
        ..minimal()
    };
    apply_defaults(&mut custom);
    assert_eq!(custom.granularity, Cell::Present(300_000));
}

#[test]
fn prior_rules_are_kept_on_read() {
    let prior = MobileAlertConfigModel {
        id: s("m1"),
        rules: Cell::Present(vec![static_rule(1.0, 2.0), static_rule(3.0, 4.0)]),
        ..minimal()
    };
    let mut rest = to_rest(&prior).unwrap();
    rest.rules.reverse();
    rest.name = "renamed".into();

    let back = config_to_state(&rest, Some(&prior)).unwrap();
    assert_eq!(back.rules, prior.rules);
    assert_eq!(back.name, s("renamed"));
}

#[test]
fn empty_collections_read_back_as_null() {
    let model = MobileAlertConfigModel {
        alert_channels: Cell::Present(Default::default()),
        custom_payload_fields: Cell::Present(Vec::new()),
        ..minimal()
    };
    let rest = to_rest(&model).unwrap();
    let back = config_to_state(&rest, None).unwrap();
    assert!(back.alert_channels.is_null());
    assert!(back.custom_payload_fields.is_null());
    assert!(back.grace_period.is_null());
}

#[test]
fn unknown_time_threshold_type_reads_as_empty_block() {
    let mut rest = to_rest(&minimal()).unwrap();
    rest.time_threshold.threshold_type = "somethingElse".into();
    let back = config_to_state(&rest, None).unwrap();
    assert_eq!(back.time_threshold, Cell::Present(TimeThresholdModel::default()));
}
