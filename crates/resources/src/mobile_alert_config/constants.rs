pub const RESOURCE_MOBILE_ALERT_CONFIG: &str = "mobile_alert_config";

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_MOBILE_APP_ID: &str = "mobile_app_id";
pub const FIELD_TRIGGERING: &str = "triggering";
pub const FIELD_TAG_FILTER: &str = "tag_filter";
pub const FIELD_GRANULARITY: &str = "granularity";
pub const FIELD_GRACE_PERIOD: &str = "grace_period";
pub const FIELD_RULES: &str = "rules";
pub const FIELD_RULE: &str = "rule";
pub const FIELD_THRESHOLD_OPERATOR: &str = "threshold_operator";
pub const FIELD_THRESHOLD: &str = "threshold";
pub const FIELD_ALERT_TYPE: &str = "alert_type";
pub const FIELD_METRIC_NAME: &str = "metric_name";
pub const FIELD_AGGREGATION: &str = "aggregation";
pub const FIELD_OPERATOR: &str = "operator";
pub const FIELD_VALUE: &str = "value";
pub const FIELD_CUSTOM_EVENT_NAME: &str = "custom_event_name";
pub const FIELD_TIME_THRESHOLD: &str = "time_threshold";
pub const FIELD_TIME_WINDOW: &str = "time_window";
pub const FIELD_USER_IMPACT_OF_VIOLATIONS_IN_SEQUENCE: &str = "user_impact_of_violations_in_sequence";
pub const FIELD_USERS: &str = "users";
pub const FIELD_PERCENTAGE: &str = "percentage";
pub const FIELD_VIOLATIONS_IN_PERIOD: &str = "violations_in_period";
pub const FIELD_VIOLATIONS: &str = "violations";
pub const FIELD_VIOLATIONS_IN_SEQUENCE: &str = "violations_in_sequence";

pub const DEFAULT_TRIGGERING: bool = false;
pub const DEFAULT_GRANULARITY: i64 = 600_000;
pub const DEFAULT_TIME_WINDOW: i64 = 600_000;

pub const MAX_NAME_LENGTH: usize = 256;
pub const MAX_DESCRIPTION_LENGTH: usize = 65_536;
pub const MAX_MOBILE_APP_ID_LENGTH: usize = 64;

pub const AGGREGATIONS: &[&str] = &[
    "SUM", "MEAN", "MAX", "MIN", "P25", "P50", "P75", "P90", "P95", "P98", "P99",
];
pub const RULE_OPERATORS: &[&str] = &["STARTS_WITH", "EQUALS"];
pub const THRESHOLD_OPERATORS: &[&str] = &[">", ">=", "<", "<="];

// ── diagnostics ─────────────────────────────────────────────────────

pub const ERR_TIME_THRESHOLD_REQUIRED: &str = "Time threshold is required";
pub const ERR_TIME_THRESHOLD_REQUIRED_MSG: &str = "Mobile alert config time threshold is required";
pub const ERR_INVALID_TIME_THRESHOLD: &str = "Invalid time threshold configuration";
pub const ERR_INVALID_TIME_THRESHOLD_MSG: &str = "Exactly one time threshold type configuration is required";

// ── descriptions ────────────────────────────────────────────────────

pub const DESC_RESOURCE: &str = "This resource manages Mobile App Alert Configurations in Instana.";
pub const DESC_ID: &str = "The ID of the Mobile Alert Configuration.";
pub const DESC_NAME: &str = "The name of the Mobile Alert Configuration.";
pub const DESC_DESCRIPTION: &str = "The description of the Mobile Alert Configuration.";
pub const DESC_MOBILE_APP_ID: &str = "ID of the mobile app that this Smart Alert configuration is applied to.";
pub const DESC_TRIGGERING: &str = "Flag to indicate whether an Incident is also triggered or not.";
pub const DESC_TAG_FILTER: &str = "The tag filter expression for the Mobile Alert Configuration.";
pub const DESC_ALERT_CHANNELS: &str = "Set of alert channel IDs associated with the severity.";
pub const DESC_GRANULARITY: &str = "The evaluation granularity used for detection of violations of the defined threshold.";
pub const DESC_GRACE_PERIOD: &str = "The duration for which an alert remains open after conditions are no longer violated.";
pub const DESC_RULES: &str = "A list of rules where each rule is associated with multiple thresholds and their corresponding severity levels.";
pub const DESC_TIME_THRESHOLD: &str = "The type of threshold to define the criteria when the event and alert triggers and resolves.";
