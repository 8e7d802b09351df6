//! Codecs shared by several resources.

pub mod alert_channels;
pub mod custom_payload;
pub mod tag_filter;
pub mod threshold;
