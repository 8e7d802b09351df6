//! Instana resource handles.
//!
//! This crate provides:
//! - Declarative models for alerting channels, mobile smart-alert configs and
//!   automation actions
//! - Bidirectional mappers between those models and the REST payloads
//! - Shared codecs for thresholds, custom payload fields, severity channel
//!   maps and tag filters
//! - [`ResourceHandle`] implementations and the [`ResourceDriver`] that walks
//!   the create/read/update/delete lifecycle against an [`InstanaApi`]
//! - Lookups of existing alerting channels and automation actions by name
//!
//! [`InstanaApi`]: instana_restapi::InstanaApi

pub mod alerting_channel;
pub mod automation_action;
pub mod data_source;
pub mod handle;
pub mod lifecycle;
pub mod mobile_alert_config;
pub mod shared;
pub mod validation;

pub use alerting_channel::{AlertingChannelModel, AlertingChannelResource};
pub use automation_action::{AutomationActionModel, AutomationActionResource};
pub use data_source::{lookup_alerting_channel, lookup_automation_action};
pub use handle::{ResourceHandle, ResourceMetadata, ResourceModel};
pub use lifecycle::{LifecycleState, ResourceDriver};
pub use mobile_alert_config::{MobileAlertConfigModel, MobileAlertConfigResource};
