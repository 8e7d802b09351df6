//! Declarative model ↔ REST payload for alerting channels.

use instana_core::codec::{decode_comma_list, decode_header_list, encode_comma_list, encode_header_list};
use instana_core::schema::ResourceSchema;
use instana_core::{cell_to_optional, optional_to_cell, Cell, Diagnostics};
use instana_core::cell::non_empty_string_cell;
use instana_restapi::{AlertingChannel, AlertingChannelKind, ChannelFields};

use super::constants::*;
use super::model::*;
use crate::handle::ResourceModel;
use crate::validation::{check_optional_string, check_required};

/// Required paths reported by the variant mapping itself.
const SPECIFICALLY_CHECKED: &[&str] = &[
    "service_now.password",
    "service_now_application.password",
    "service_now_application.instana_url",
];

/// The variant block a model configures, borrowed from the model.
#[derive(Debug, Clone, Copy)]
pub enum ChannelVariant<'a> {
    Email(&'a EmailModel),
    OpsGenie(&'a OpsGenieModel),
    PagerDuty(&'a PagerDutyModel),
    Slack(&'a SlackModel),
    Splunk(&'a SplunkModel),
    VictorOps(&'a VictorOpsModel),
    Webhook(&'a WebhookModel),
    Office365(&'a WebhookUrlModel),
    GoogleChat(&'a WebhookUrlModel),
    ServiceNow(&'a ServiceNowModel),
    ServiceNowApplication(&'a ServiceNowApplicationModel),
    PrometheusWebhook(&'a PrometheusWebhookModel),
    WebexTeamsWebhook(&'a WebhookUrlModel),
    WatsonAiopsWebhook(&'a WatsonAiopsWebhookModel),
    SlackApp(&'a SlackAppModel),
    MsTeamsApp(&'a MsTeamsAppModel),
}

impl ChannelVariant<'_> {
    pub fn field_name(&self) -> &'static str {
        match self {
            ChannelVariant::Email(_) => FIELD_EMAIL,
            ChannelVariant::OpsGenie(_) => FIELD_OPS_GENIE,
            ChannelVariant::PagerDuty(_) => FIELD_PAGER_DUTY,
            ChannelVariant::Slack(_) => FIELD_SLACK,
            ChannelVariant::Splunk(_) => FIELD_SPLUNK,
            ChannelVariant::VictorOps(_) => FIELD_VICTOR_OPS,
            ChannelVariant::Webhook(_) => FIELD_WEBHOOK,
            ChannelVariant::Office365(_) => FIELD_OFFICE_365,
            ChannelVariant::GoogleChat(_) => FIELD_GOOGLE_CHAT,
            ChannelVariant::ServiceNow(_) => FIELD_SERVICE_NOW,
            ChannelVariant::ServiceNowApplication(_) => FIELD_SERVICE_NOW_APPLICATION,
            ChannelVariant::PrometheusWebhook(_) => FIELD_PROMETHEUS_WEBHOOK,
            ChannelVariant::WebexTeamsWebhook(_) => FIELD_WEBEX_TEAMS_WEBHOOK,
            ChannelVariant::WatsonAiopsWebhook(_) => FIELD_WATSON_AIOPS_WEBHOOK,
            ChannelVariant::SlackApp(_) => FIELD_SLACK_APP,
            ChannelVariant::MsTeamsApp(_) => FIELD_MS_TEAMS_APP,
        }
    }
}

/// Every variant block present on `model`, in schema order.
pub fn configured_variants(model: &AlertingChannelModel) -> Vec<ChannelVariant<'_>> {
    let mut out = Vec::new();
    if let Some(v) = model.email.as_option() {
        out.push(ChannelVariant::Email(v));
    }
    if let Some(v) = model.ops_genie.as_option() {
        out.push(ChannelVariant::OpsGenie(v));
    }
    if let Some(v) = model.pager_duty.as_option() {
        out.push(ChannelVariant::PagerDuty(v));
    }
    if let Some(v) = model.slack.as_option() {
        out.push(ChannelVariant::Slack(v));
    }
    if let Some(v) = model.splunk.as_option() {
        out.push(ChannelVariant::Splunk(v));
    }
    if let Some(v) = model.victor_ops.as_option() {
        out.push(ChannelVariant::VictorOps(v));
    }
    if let Some(v) = model.webhook.as_option() {
        out.push(ChannelVariant::Webhook(v));
    }
    if let Some(v) = model.office_365.as_option() {
        out.push(ChannelVariant::Office365(v));
    }
    if let Some(v) = model.google_chat.as_option() {
        out.push(ChannelVariant::GoogleChat(v));
    }
    if let Some(v) = model.service_now.as_option() {
        out.push(ChannelVariant::ServiceNow(v));
    }
    if let Some(v) = model.service_now_application.as_option() {
        out.push(ChannelVariant::ServiceNowApplication(v));
    }
    if let Some(v) = model.prometheus_webhook.as_option() {
        out.push(ChannelVariant::PrometheusWebhook(v));
    }
    if let Some(v) = model.webex_teams_webhook.as_option() {
        out.push(ChannelVariant::WebexTeamsWebhook(v));
    }
    if let Some(v) = model.watson_aiops_webhook.as_option() {
        out.push(ChannelVariant::WatsonAiopsWebhook(v));
    }
    if let Some(v) = model.slack_app.as_option() {
        out.push(ChannelVariant::SlackApp(v));
    }
    if let Some(v) = model.ms_teams_app.as_option() {
        out.push(ChannelVariant::MsTeamsApp(v));
    }
    out
}

// ── state → REST ────────────────────────────────────────────────────

/// Secret values carried by `model`: sensitive attributes and webhook
/// header values.
pub fn channel_secrets(model: &AlertingChannelModel) -> Vec<String> {
    let sensitive = [
        model.ops_genie.as_option().and_then(|v| v.api_key.as_option()),
        model.victor_ops.as_option().and_then(|v| v.api_key.as_option()),
        model.pager_duty.as_option().and_then(|v| v.service_integration_key.as_option()),
        model.splunk.as_option().and_then(|v| v.token.as_option()),
        model.service_now.as_option().and_then(|v| v.password.as_option()),
        model.service_now_application.as_option().and_then(|v| v.password.as_option()),
    ];
    let headers = model
        .webhook
        .as_option()
        .and_then(|v| v.http_headers.as_option())
        .into_iter()
        .flat_map(|headers| headers.values());
    let watson_headers = model
        .watson_aiops_webhook
        .as_option()
        .and_then(|v| v.http_headers.as_option())
        .into_iter()
        .flatten();
    sensitive
        .into_iter()
        .flatten()
        .chain(headers)
        .chain(watson_headers)
        .cloned()
        .collect()
}

fn register_secrets(diags: &mut Diagnostics, model: &AlertingChannelModel) {
    for secret in channel_secrets(model) {
        diags.register_secret(secret);
    }
}

fn check_required_fields(
    schema: &ResourceSchema,
    model: &AlertingChannelModel,
    variant: ChannelVariant<'_>,
    diags: &mut Diagnostics,
) {
    let document = match serde_json::to_value(model) {
        Ok(document) => document,
        Err(err) => {
            diags.add_error(ERR_INVALID_CONFIGURATION, err.to_string());
            return;
        }
    };
    check_required(diags, &schema.attributes, &document, "", SPECIFICALLY_CHECKED);
    let field = variant.field_name();
    if let (Some(block), Some(attr)) = (document.get(field), schema.attribute(field)) {
        check_required(diags, attr.children(), block, field, SPECIFICALLY_CHECKED);
    }
}

fn password(cell: &Cell<String>, variant: &str, diags: &mut Diagnostics) -> Option<String> {
    let password = cell_to_optional(cell);
    if password.is_none() {
        diags.add_attribute_error(
            format!("{variant}.{FIELD_PASSWORD}"),
            ERR_MISSING_PASSWORD,
            ERR_MISSING_PASSWORD_MSG,
        );
    }
    password
}

/// Map a model to the payload sent on create and update.
///
/// Exactly one variant block must be configured. All problems found are
/// reported together.
pub fn channel_to_rest(
    schema: &ResourceSchema,
    model: &AlertingChannelModel,
) -> Result<AlertingChannel, Diagnostics> {
    let mut diags = Diagnostics::new();
    register_secrets(&mut diags, model);

    let variants = configured_variants(model);
    let variant = match variants.as_slice() {
        [single] => *single,
        [] => {
            diags.add_error(ERR_INVALID_CONFIGURATION, ERR_INVALID_CONFIGURATION_MSG);
            return Err(diags);
        }
        many => {
            let names: Vec<&str> = many.iter().map(ChannelVariant::field_name).collect();
            diags.add_error(
                ERR_INVALID_CONFIGURATION,
                format!("{ERR_INVALID_CONFIGURATION_MSG} Found: {}", names.join(", ")),
            );
            return Err(diags);
        }
    };

    check_required_fields(schema, model, variant, &mut diags);
    let (kind, fields) = variant_to_rest(schema, variant, &mut diags);
    let mut channel = AlertingChannel::new(cell_to_optional(&model.name).unwrap_or_default(), kind, fields);
    if let Some(id) = model.resource_id() {
        channel.id = id.to_string();
    }
    diags.into_result(channel)
}

fn variant_to_rest(
    schema: &ResourceSchema,
    variant: ChannelVariant<'_>,
    diags: &mut Diagnostics,
) -> (AlertingChannelKind, ChannelFields) {
    match variant {
        ChannelVariant::Email(v) => (
            AlertingChannelKind::Email,
            ChannelFields {
                emails: Some(v.emails.as_option().into_iter().flatten().cloned().collect()),
                ..Default::default()
            },
        ),
        ChannelVariant::OpsGenie(v) => {
            let path = format!("{FIELD_OPS_GENIE}.{FIELD_REGION}");
            if let Some(attr) = schema.resolve(&path) {
                check_optional_string(diags, attr, &path, v.region.as_option().map(String::as_str));
            }
            (
                AlertingChannelKind::OpsGenie,
                ChannelFields {
                    api_key: cell_to_optional(&v.api_key),
                    region: cell_to_optional(&v.region),
                    tags: v.tags.as_option().map(|tags| encode_comma_list(tags.as_slice())),
                    ..Default::default()
                },
            )
        }
        ChannelVariant::PagerDuty(v) => (
            AlertingChannelKind::PagerDuty,
            ChannelFields {
                service_integration_key: cell_to_optional(&v.service_integration_key),
                ..Default::default()
            },
        ),
        ChannelVariant::Slack(v) => (
            AlertingChannelKind::Slack,
            ChannelFields {
                webhook_url: cell_to_optional(&v.webhook_url),
                icon_url: cell_to_optional(&v.icon_url),
                channel: cell_to_optional(&v.channel),
                ..Default::default()
            },
        ),
        ChannelVariant::Splunk(v) => (
            AlertingChannelKind::Splunk,
            ChannelFields {
                url: cell_to_optional(&v.url),
                token: cell_to_optional(&v.token),
                ..Default::default()
            },
        ),
        ChannelVariant::VictorOps(v) => (
            AlertingChannelKind::VictorOps,
            ChannelFields {
                api_key: cell_to_optional(&v.api_key),
                routing_key: cell_to_optional(&v.routing_key),
                ..Default::default()
            },
        ),
        ChannelVariant::Webhook(v) => (
            AlertingChannelKind::Webhook,
            ChannelFields {
                webhook_urls: Some(v.webhook_urls.as_option().into_iter().flatten().cloned().collect()),
                headers: v.http_headers.as_option().map(encode_header_list),
                ..Default::default()
            },
        ),
        ChannelVariant::Office365(v) => webhook_url_only(AlertingChannelKind::Office365, v),
        ChannelVariant::GoogleChat(v) => webhook_url_only(AlertingChannelKind::GoogleChat, v),
        ChannelVariant::WebexTeamsWebhook(v) => webhook_url_only(AlertingChannelKind::WebexTeamsWebhook, v),
        ChannelVariant::ServiceNow(v) => (
            AlertingChannelKind::ServiceNow,
            ChannelFields {
                service_now_url: cell_to_optional(&v.service_now_url),
                username: cell_to_optional(&v.username),
                password: password(&v.password, FIELD_SERVICE_NOW, diags),
                auto_close_incidents: cell_to_optional(&v.auto_close_incidents),
                ..Default::default()
            },
        ),
        ChannelVariant::ServiceNowApplication(v) => {
            let instana_url = cell_to_optional(&v.instana_url);
            if instana_url.is_none() {
                diags.add_attribute_error(
                    format!("{FIELD_SERVICE_NOW_APPLICATION}.{FIELD_INSTANA_URL}"),
                    ERR_INSTANA_URL_REQUIRED,
                    ERR_INSTANA_URL_REQUIRED_MSG,
                );
            }
            (
                AlertingChannelKind::ServiceNowApplication,
                ChannelFields {
                    service_now_url: cell_to_optional(&v.service_now_url),
                    username: cell_to_optional(&v.username),
                    password: password(&v.password, FIELD_SERVICE_NOW_APPLICATION, diags),
                    tenant: cell_to_optional(&v.tenant),
                    unit: cell_to_optional(&v.unit),
                    auto_close_incidents: cell_to_optional(&v.auto_close_incidents),
                    instana_url,
                    enable_send_instana_notes: cell_to_optional(&v.enable_send_instana_notes),
                    enable_send_service_now_activities: cell_to_optional(&v.enable_send_service_now_activities),
                    enable_send_service_now_work_notes: cell_to_optional(&v.enable_send_service_now_work_notes),
                    manually_closed_incidents: cell_to_optional(&v.manually_closed_incidents),
                    resolution_of_incident: cell_to_optional(&v.resolution_of_incident),
                    snow_status_on_close_event: cell_to_optional(&v.snow_status_on_close_event),
                    ..Default::default()
                },
            )
        }
        ChannelVariant::PrometheusWebhook(v) => (
            AlertingChannelKind::PrometheusWebhook,
            ChannelFields {
                webhook_url: cell_to_optional(&v.webhook_url),
                receiver: cell_to_optional(&v.receiver),
                ..Default::default()
            },
        ),
        ChannelVariant::WatsonAiopsWebhook(v) => (
            AlertingChannelKind::WatsonAiopsWebhook,
            ChannelFields {
                webhook_url: cell_to_optional(&v.webhook_url),
                headers: cell_to_optional(&v.http_headers),
                ..Default::default()
            },
        ),
        ChannelVariant::SlackApp(v) => (
            AlertingChannelKind::SlackApp,
            ChannelFields {
                app_id: cell_to_optional(&v.app_id),
                team_id: cell_to_optional(&v.team_id),
                team_name: cell_to_optional(&v.team_name),
                channel_id: cell_to_optional(&v.channel_id),
                channel_name: cell_to_optional(&v.channel_name),
                emoji_rendering: cell_to_optional(&v.emoji_rendering),
                ..Default::default()
            },
        ),
        ChannelVariant::MsTeamsApp(v) => (
            AlertingChannelKind::MsTeamsApp,
            ChannelFields {
                api_token_id: cell_to_optional(&v.api_token_id),
                team_id: cell_to_optional(&v.team_id),
                team_name: cell_to_optional(&v.team_name),
                channel_id: cell_to_optional(&v.channel_id),
                channel_name: cell_to_optional(&v.channel_name),
                instana_url: cell_to_optional(&v.instana_url),
                service_url: cell_to_optional(&v.service_url),
                tenant_id: cell_to_optional(&v.tenant_id),
                tenant_name: cell_to_optional(&v.tenant_name),
                ..Default::default()
            },
        ),
    }
}

fn webhook_url_only(kind: AlertingChannelKind, v: &WebhookUrlModel) -> (AlertingChannelKind, ChannelFields) {
    (
        kind,
        ChannelFields {
            webhook_url: cell_to_optional(&v.webhook_url),
            ..Default::default()
        },
    )
}

// ── REST → state ────────────────────────────────────────────────────

/// Keep the read password when the API echoes one, else the prior one.
fn merged_password(read: Option<&String>, prior: Option<&Cell<String>>) -> Cell<String> {
    match read {
        Some(password) if !password.is_empty() => Cell::Present(password.clone()),
        _ => prior.cloned().unwrap_or(Cell::Null),
    }
}

/// Map a REST payload to a model.
///
/// `prior` is the model the read replaces; write-only values the API does
/// not return are carried over from it.
pub fn channel_to_state(
    payload: &AlertingChannel,
    prior: Option<&AlertingChannelModel>,
) -> Result<AlertingChannelModel, Diagnostics> {
    let f = &payload.fields;
    let mut model = AlertingChannelModel {
        id: Cell::Present(payload.id.clone()),
        name: Cell::Present(payload.name.clone()),
        ..Default::default()
    };

    match &payload.kind {
        AlertingChannelKind::Email => {
            model.email = Cell::Present(EmailModel {
                emails: Cell::Present(f.emails.iter().flatten().cloned().collect()),
            });
        }
        AlertingChannelKind::OpsGenie => {
            model.ops_genie = Cell::Present(OpsGenieModel {
                api_key: optional_to_cell(f.api_key.clone()),
                region: optional_to_cell(f.region.clone()),
                tags: optional_to_cell(f.tags.as_deref().map(decode_comma_list)),
            });
        }
        AlertingChannelKind::PagerDuty => {
            model.pager_duty = Cell::Present(PagerDutyModel {
                service_integration_key: optional_to_cell(f.service_integration_key.clone()),
            });
        }
        AlertingChannelKind::Slack => {
            model.slack = Cell::Present(SlackModel {
                webhook_url: optional_to_cell(f.webhook_url.clone()),
                icon_url: non_empty_string_cell(f.icon_url.as_deref()),
                channel: non_empty_string_cell(f.channel.as_deref()),
            });
        }
        AlertingChannelKind::Splunk => {
            model.splunk = Cell::Present(SplunkModel {
                url: optional_to_cell(f.url.clone()),
                token: optional_to_cell(f.token.clone()),
            });
        }
        AlertingChannelKind::VictorOps => {
            model.victor_ops = Cell::Present(VictorOpsModel {
                api_key: optional_to_cell(f.api_key.clone()),
                routing_key: optional_to_cell(f.routing_key.clone()),
            });
        }
        AlertingChannelKind::Webhook => {
            let headers = f
                .headers
                .as_deref()
                .filter(|headers| !headers.is_empty())
                .map(decode_header_list);
            model.webhook = Cell::Present(WebhookModel {
                webhook_urls: Cell::Present(f.webhook_urls.iter().flatten().cloned().collect()),
                http_headers: optional_to_cell(headers),
            });
        }
        AlertingChannelKind::Office365 => model.office_365 = Cell::Present(webhook_url_to_state(f)),
        AlertingChannelKind::GoogleChat => model.google_chat = Cell::Present(webhook_url_to_state(f)),
        AlertingChannelKind::WebexTeamsWebhook => {
            model.webex_teams_webhook = Cell::Present(webhook_url_to_state(f));
        }
        AlertingChannelKind::ServiceNow => {
            let prior_password = prior
                .and_then(|m| m.service_now.as_option())
                .map(|v| &v.password);
            model.service_now = Cell::Present(ServiceNowModel {
                service_now_url: optional_to_cell(f.service_now_url.clone()),
                username: optional_to_cell(f.username.clone()),
                password: merged_password(f.password.as_ref(), prior_password),
                auto_close_incidents: optional_to_cell(f.auto_close_incidents),
            });
        }
        AlertingChannelKind::ServiceNowApplication => {
            let prior_password = prior
                .and_then(|m| m.service_now_application.as_option())
                .map(|v| &v.password);
            model.service_now_application = Cell::Present(ServiceNowApplicationModel {
                service_now_url: optional_to_cell(f.service_now_url.clone()),
                username: optional_to_cell(f.username.clone()),
                password: merged_password(f.password.as_ref(), prior_password),
                tenant: optional_to_cell(f.tenant.clone()),
                unit: optional_to_cell(f.unit.clone()),
                auto_close_incidents: optional_to_cell(f.auto_close_incidents),
                instana_url: non_empty_string_cell(f.instana_url.as_deref()),
                enable_send_instana_notes: optional_to_cell(f.enable_send_instana_notes),
                enable_send_service_now_activities: optional_to_cell(f.enable_send_service_now_activities),
                enable_send_service_now_work_notes: optional_to_cell(f.enable_send_service_now_work_notes),
                manually_closed_incidents: optional_to_cell(f.manually_closed_incidents),
                resolution_of_incident: optional_to_cell(f.resolution_of_incident),
                snow_status_on_close_event: optional_to_cell(f.snow_status_on_close_event),
            });
        }
        AlertingChannelKind::PrometheusWebhook => {
            model.prometheus_webhook = Cell::Present(PrometheusWebhookModel {
                webhook_url: optional_to_cell(f.webhook_url.clone()),
                receiver: non_empty_string_cell(f.receiver.as_deref()),
            });
        }
        AlertingChannelKind::WatsonAiopsWebhook => {
            model.watson_aiops_webhook = Cell::Present(WatsonAiopsWebhookModel {
                webhook_url: optional_to_cell(f.webhook_url.clone()),
                http_headers: optional_to_cell(f.headers.clone()),
            });
        }
        AlertingChannelKind::SlackApp => {
            model.slack_app = Cell::Present(SlackAppModel {
                app_id: optional_to_cell(f.app_id.clone()),
                team_id: optional_to_cell(f.team_id.clone()),
                team_name: optional_to_cell(f.team_name.clone()),
                channel_id: optional_to_cell(f.channel_id.clone()),
                channel_name: optional_to_cell(f.channel_name.clone()),
                emoji_rendering: optional_to_cell(f.emoji_rendering),
            });
        }
        AlertingChannelKind::MsTeamsApp => {
            model.ms_teams_app = Cell::Present(MsTeamsAppModel {
                api_token_id: optional_to_cell(f.api_token_id.clone()),
                team_id: optional_to_cell(f.team_id.clone()),
                team_name: optional_to_cell(f.team_name.clone()),
                channel_id: optional_to_cell(f.channel_id.clone()),
                channel_name: optional_to_cell(f.channel_name.clone()),
                instana_url: optional_to_cell(f.instana_url.clone()),
                service_url: optional_to_cell(f.service_url.clone()),
                tenant_id: optional_to_cell(f.tenant_id.clone()),
                tenant_name: optional_to_cell(f.tenant_name.clone()),
            });
        }
        AlertingChannelKind::Unsupported(kind) => {
            tracing::warn!(id = %payload.id, kind = %kind, "received unsupported alerting channel");
            return Err(Diagnostics::error(
                ERR_UNSUPPORTED_TYPE,
                format!("Received unsupported alerting channel of type {kind}"),
            ));
        }
    }

    Ok(model)
}

fn webhook_url_to_state(f: &ChannelFields) -> WebhookUrlModel {
    WebhookUrlModel {
        webhook_url: optional_to_cell(f.webhook_url.clone()),
    }
}
