//! Severity-indexed alert channel references.

use std::collections::{BTreeMap, BTreeSet};

use instana_core::{Cell, Diagnostics};
use instana_restapi::AlertSeverity;

use crate::validation::INVALID_ATTRIBUTE_VALUE;

pub const FIELD_ALERT_CHANNELS: &str = "alert_channels";

/// Declarative keys: `warning`, `critical`.
pub type AlertChannelsModel = BTreeMap<String, BTreeSet<String>>;

pub fn severity_key(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Warning => "warning",
        AlertSeverity::Critical => "critical",
    }
}

fn parse_severity_key(key: &str) -> Option<AlertSeverity> {
    AlertSeverity::ALL
        .into_iter()
        .find(|severity| severity_key(*severity) == key)
}

/// Absent severities stay absent in the REST map.
pub fn alert_channels_to_rest(
    channels: &Cell<AlertChannelsModel>,
    diags: &mut Diagnostics,
) -> BTreeMap<AlertSeverity, Vec<String>> {
    let mut out = BTreeMap::new();
    for (key, ids) in channels.as_option().into_iter().flatten() {
        match parse_severity_key(key) {
            Some(severity) => {
                out.insert(severity, ids.iter().cloned().collect());
            }
            None => diags.add_attribute_error(
                format!("{FIELD_ALERT_CHANNELS}.{key}"),
                INVALID_ATTRIBUTE_VALUE,
                format!("alert channel severity must be one of [warning, critical], got: \"{key}\""),
            ),
        }
    }
    out
}

/// An empty REST map reads back as null.
pub fn alert_channels_to_state(channels: &BTreeMap<AlertSeverity, Vec<String>>) -> Cell<AlertChannelsModel> {
    if channels.is_empty() {
        return Cell::Null;
    }
    Cell::Present(
        channels
            .iter()
            .map(|(severity, ids)| (severity_key(*severity).to_string(), ids.iter().cloned().collect()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(entries: &[(&str, &[&str])]) -> Cell<AlertChannelsModel> {
        Cell::Present(
            entries
                .iter()
                .map(|(k, ids)| (k.to_string(), ids.iter().map(|s| s.to_string()).collect()))
                .collect(),
        )
    }

    #[test]
    fn missing_severity_round_trips_as_absent() {
        let channels = model(&[("critical", &["c1", "c2"])]);
        let mut diags = Diagnostics::new();
        let rest = alert_channels_to_rest(&channels, &mut diags);
        assert!(diags.is_empty());
        assert_eq!(rest.len(), 1);
        assert!(!rest.contains_key(&AlertSeverity::Warning));
        assert_eq!(alert_channels_to_state(&rest), channels);
    }

    #[test]
    fn empty_map_reads_as_null() {
        assert!(alert_channels_to_state(&BTreeMap::new()).is_null());
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let mut diags = Diagnostics::new();
        alert_channels_to_rest(&model(&[("fatal", &["x"])]), &mut diags);
        let entry = diags.iter().next().unwrap();
        assert_eq!(entry.summary, INVALID_ATTRIBUTE_VALUE);
        assert_eq!(entry.path.as_deref(), Some("alert_channels.fatal"));
    }

    #[test]
    fn severity_keys_are_case_sensitive() {
        let mut diags = Diagnostics::new();
        let rest = alert_channels_to_rest(&model(&[("WARNING", &["x"]), ("critical", &["y"])]), &mut diags);
        assert_eq!(diags.iter().count(), 1);
        assert_eq!(diags.iter().next().unwrap().path.as_deref(), Some("alert_channels.WARNING"));
        assert!(!rest.contains_key(&AlertSeverity::Warning));
    }
}
