//! Entrega de una alerta a una acción conectada.
//!
//! Cada llamada a canal se captura por separado: el fallo de un canal nunca
//! impide intentar los demás ni corta el tick.
use chrono::{DateTime, Utc};
use nexus_domain::ActionKind;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::client::{Channel, NotificationClient};
use super::message::{email_subject, format_whatsapp_alert, render_message, AlertContext};
use crate::errors::DispatchError;
use crate::graph::ActionConfig;

pub const SYSTEM_RECIPIENT: &str = "system";

/// Resultado de un canal concreto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelResult {
    pub channel: Channel,
    pub success: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

impl ChannelResult {
    fn from_result(channel: Channel, result: Result<super::client::DeliveryReceipt, DispatchError>) -> Self {
        match result {
            Ok(receipt) => ChannelResult { channel, success: true, message_id: receipt.message_id, error: None },
            Err(e) => {
                log::warn!("{channel} delivery failed: {e}");
                ChannelResult { channel, success: false, message_id: None, error: Some(e.to_string()) }
            }
        }
    }
}

/// Agregado de un despacho: `success` si al menos un canal tuvo éxito.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub action_type: ActionKind,
    pub recipient: String,
    pub results: Vec<ChannelResult>,
    pub success: bool,
}

impl DispatchOutcome {
    fn new(action_type: ActionKind, recipient: String, results: Vec<ChannelResult>) -> Self {
        let success = results.iter().any(|r| r.success);
        DispatchOutcome { action_type, recipient, results, success }
    }

    /// Primer error registrado, si lo hay.
    pub fn first_error(&self) -> Option<&str> {
        self.results.iter().find_map(|r| r.error.as_deref())
    }
}

/// Despacha `ctx` según el tipo de acción.
///
/// `email` y `whatsapp` se tratan igual: se envía correo si hay `email` y
/// WhatsApp si hay `phone_number`. Sin destinatarios el resultado queda vacío
/// y `success = false`.
pub async fn dispatch<C>(client: &C,
                         kind: ActionKind,
                         config: &ActionConfig,
                         ctx: &AlertContext,
                         at: DateTime<Utc>)
                         -> DispatchOutcome
    where C: NotificationClient + ?Sized
{
    match kind {
        ActionKind::Email | ActionKind::Whatsapp => {
            let message = render_message(ctx, config.message_template());
            let mut results = Vec::new();
            if let Some(to) = config.email() {
                let r = client.send_email(to, &email_subject(ctx), &message).await;
                results.push(ChannelResult::from_result(Channel::Email, r));
            }
            if let Some(phone) = config.phone_number() {
                let r = client.send_whatsapp(phone, &format_whatsapp_alert(ctx, &message)).await;
                results.push(ChannelResult::from_result(Channel::Whatsapp, r));
            }
            if results.is_empty() {
                log::warn!("{kind} action for {} has no recipient configured", ctx.equipment);
            }
            let recipient = config.email().or(config.phone_number()).unwrap_or_default().to_string();
            DispatchOutcome::new(kind, recipient, results)
        }
        ActionKind::Webhook => {
            let Some(url) = config.webhook_url() else {
                log::warn!("webhook action for {} has no url", ctx.equipment);
                return DispatchOutcome::new(kind, String::new(), Vec::new());
            };
            let payload = json!({
                "equipment": ctx.equipment,
                "sensor": ctx.sensor,
                "value": ctx.value,
                "threshold": ctx.threshold,
                "severity": ctx.severity,
                "timestamp": at.to_rfc3339(),
            });
            let r = client.send_webhook(url, &payload).await;
            DispatchOutcome::new(kind, url.to_string(), vec![ChannelResult::from_result(Channel::Webhook, r)])
        }
        ActionKind::Alert => {
            log::info!("[SYSTEM ALERT] {} - {}={}", ctx.equipment, ctx.sensor, ctx.value);
            let result = ChannelResult { channel: Channel::System,
                                         success: true,
                                         message_id: Some(SYSTEM_RECIPIENT.to_string()),
                                         error: None };
            DispatchOutcome::new(kind, SYSTEM_RECIPIENT.to_string(), vec![result])
        }
    }
}
