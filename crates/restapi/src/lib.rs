//! Instana REST API surface used by the provider.
//!
//! This crate provides:
//! - serde payload models for alerting channels, mobile smart-alert configs
//!   and automation actions
//! - The [`RestResource`] CRUD trait and the [`InstanaApi`] binding trait
//! - [`InstanaClient`], the reqwest-backed implementation
//! - [`memory::InMemoryApi`], an in-process backend for tests and dry runs

pub mod alerting_channel;
pub mod automation_action;
pub mod client;
pub mod custom_payload;
pub mod error;
pub mod memory;
pub mod mobile_alert_config;
pub mod resource;
pub mod threshold;

pub use alerting_channel::{AlertingChannel, AlertingChannelKind, ChannelFields};
pub use automation_action::{ActionField, ActionParameter, AutomationAction, AutomationActionType};
pub use client::{InstanaClient, RestEndpoint};
pub use custom_payload::{CustomPayloadField, DynamicValue};
pub use error::RestError;
pub use memory::{InMemoryApi, InMemoryResource};
pub use mobile_alert_config::{
    AlertSeverity, MobileAlertConfig, MobileAppAlertRule, MobileAppAlertRuleWithThresholds,
    MobileAppTimeThreshold,
};
pub use resource::{InstanaApi, InstanaDataObject, RestResource};
pub use threshold::ThresholdRule;
