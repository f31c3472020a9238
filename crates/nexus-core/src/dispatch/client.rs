//! Contrato del cliente de canales de notificación y un mock en memoria.
//!
//! Las implementaciones nunca deben hacer panic: credenciales ausentes o
//! fallos de red se devuelven como `DispatchError`.
use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::DispatchError;

/// Canal concreto por el que sale un mensaje.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Whatsapp,
    Webhook,
    System,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Whatsapp => "whatsapp",
            Channel::Webhook => "webhook",
            Channel::System => "system",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acuse de una entrega aceptada por el canal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: Option<String>,
    /// `true` si no hubo entrega real (modo mock).
    pub mock: bool,
}

#[async_trait]
pub trait NotificationClient: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<DeliveryReceipt, DispatchError>;

    async fn send_whatsapp(&self, phone: &str, message: &str) -> Result<DeliveryReceipt, DispatchError>;

    async fn send_webhook(&self, url: &str, payload: &serde_json::Value) -> Result<DeliveryReceipt, DispatchError>;
}

/// Mensaje registrado por `MockNotificationClient`.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub channel: Channel,
    pub recipient: String,
    pub body: String,
}

/// Cliente que sólo registra los mensajes. Se puede configurar para que un
/// canal falle siempre.
#[derive(Debug, Default)]
pub struct MockNotificationClient {
    sent: Mutex<Vec<SentMessage>>,
    failing: HashSet<Channel>,
}

impl MockNotificationClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hace que todas las entregas por `channel` fallen.
    pub fn failing_on(mut self, channel: Channel) -> Self {
        self.failing.insert(channel);
        self
    }

    /// Copia de los mensajes aceptados, en orden de envío.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn sent_on(&self, channel: Channel) -> Vec<SentMessage> {
        self.sent().into_iter().filter(|m| m.channel == channel).collect()
    }

    fn record(&self, channel: Channel, recipient: &str, body: String) -> Result<DeliveryReceipt, DispatchError> {
        if self.failing.contains(&channel) {
            return Err(DispatchError::Rejected(format!("mock {channel} channel is failing")));
        }
        let preview: String = body.chars().take(100).collect();
        log::info!("[MOCK {}] To: {recipient}", channel.as_str().to_uppercase());
        log::debug!("[MOCK {}] Message: {preview}", channel.as_str().to_uppercase());
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentMessage { channel, recipient: recipient.to_string(), body });
        Ok(DeliveryReceipt { message_id: Some(format!("mock_{}_{}", channel, Utc::now().timestamp_millis())),
                             mock: true })
    }
}

#[async_trait]
impl NotificationClient for MockNotificationClient {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<DeliveryReceipt, DispatchError> {
        self.record(Channel::Email, to, format!("{subject}: {body}"))
    }

    async fn send_whatsapp(&self, phone: &str, message: &str) -> Result<DeliveryReceipt, DispatchError> {
        self.record(Channel::Whatsapp, phone, message.to_string())
    }

    async fn send_webhook(&self, url: &str, payload: &serde_json::Value) -> Result<DeliveryReceipt, DispatchError> {
        self.record(Channel::Webhook, url, payload.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_and_can_fail_a_channel() {
        let client = MockNotificationClient::new().failing_on(Channel::Whatsapp);
        let ok = client.send_email("ops@example.com", "[WARNING] Pump", "hot").await.unwrap();
        assert!(ok.mock);
        assert!(ok.message_id.unwrap().starts_with("mock_email_"));
        let err = client.send_whatsapp("+15550001", "hi").await.unwrap_err();
        assert!(matches!(err, DispatchError::Rejected(_)));
        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "[WARNING] Pump: hot");
    }

    #[tokio::test]
    async fn history_survives_a_poisoned_lock() {
        let client = std::sync::Arc::new(MockNotificationClient::new());
        client.send_email("ops@example.com", "s", "first").await.unwrap();
        let holder = std::sync::Arc::clone(&client);
        let _ = std::thread::spawn(move || {
                    let _guard = holder.sent.lock().unwrap();
                    panic!("panic while holding the history lock");
                }).join();
        assert!(client.sent.is_poisoned());
        client.send_webhook("https://hooks.example.com", &serde_json::json!({})).await.unwrap();
        let sent = client.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].body, "s: first");
        assert_eq!(sent[1].channel, Channel::Webhook);
    }
}
