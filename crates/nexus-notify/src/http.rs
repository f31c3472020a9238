//! `NotificationClient` sobre HTTP.
//!
//! Ningún método hace panic: credenciales ausentes, errores de red y
//! respuestas no-2xx se devuelven como `DispatchError`.
use std::time::Duration;

use async_trait::async_trait;
use nexus_core::{DeliveryReceipt, DispatchError, NotificationClient};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::NotifyConfig;
use crate::error::NotifyError;

const GRAPH_API_BASE: &str = "https://graph.facebook.com";

/// Quita `+` y espacios en blanco de un número internacional.
pub fn clean_phone(phone: &str) -> String {
    phone.chars().filter(|c| *c != '+' && !c.is_whitespace()).collect()
}

#[derive(Debug, Deserialize)]
struct EmailRelayResponse {
    #[serde(default, rename = "messageId")]
    message_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WhatsappResponse {
    #[serde(default)]
    messages: Vec<WhatsappMessageId>,
}

#[derive(Debug, Deserialize)]
struct WhatsappMessageId {
    id: String,
}

#[derive(Debug, Clone)]
pub struct HttpNotificationClient {
    http: Client,
    config: NotifyConfig,
}

impl HttpNotificationClient {
    pub fn new(config: NotifyConfig) -> Result<Self, NotifyError> {
        let http = Client::builder().timeout(Duration::from_secs(config.http_timeout_secs))
                                    .build()
                                    .map_err(|e| NotifyError::ClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, NotifyError> {
        Self::new(NotifyConfig::from_env()?)
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    pub fn whatsapp_url(&self, phone_id: &str) -> String {
        format!("{GRAPH_API_BASE}/{}/{phone_id}/messages", self.config.whatsapp_api_version)
    }

    fn mock_receipt(&self, channel: &str, recipient: &str, body: &str) -> DeliveryReceipt {
        let preview: String = body.chars().take(100).collect();
        log::info!("[MOCK] {channel} would be sent to {recipient}: {preview}");
        DeliveryReceipt { message_id: None, mock: true }
    }
}

fn http_error(e: reqwest::Error) -> DispatchError {
    DispatchError::Http(e.to_string())
}

/// Convierte una respuesta no-2xx en `DispatchError::Api`, tomando `details`
/// del cuerpo JSON si existe.
async fn api_error(response: Response, fallback: &str) -> DispatchError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let details = serde_json::from_str::<Value>(&body).ok()
                                                      .and_then(|v| v.get("details").and_then(Value::as_str).map(str::to_string))
                                                      .or_else(|| (!body.is_empty()).then(|| body.clone()))
                                                      .unwrap_or_else(|| fallback.to_string());
    DispatchError::Api { status, details }
}

#[async_trait]
impl NotificationClient for HttpNotificationClient {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<DeliveryReceipt, DispatchError> {
        if to.trim().is_empty() {
            return Err(DispatchError::MissingRecipient("email".into()));
        }
        if self.config.mock_mode {
            return Ok(self.mock_receipt("email", to, body));
        }
        let endpoint = self.config
                           .email_endpoint
                           .as_deref()
                           .ok_or_else(|| DispatchError::MissingCredentials("email relay".into()))?;
        let response = self.http
                           .post(endpoint)
                           .json(&json!({ "to": to, "subject": subject, "body": body }))
                           .send()
                           .await
                           .map_err(http_error)?;
        if !response.status().is_success() {
            return Err(api_error(response, "Failed to send email").await);
        }
        let parsed: EmailRelayResponse = response.json().await.map_err(http_error)?;
        log::info!("email alert sent to {to}");
        Ok(DeliveryReceipt { message_id: parsed.message_id, mock: false })
    }

    async fn send_whatsapp(&self, phone: &str, message: &str) -> Result<DeliveryReceipt, DispatchError> {
        if clean_phone(phone).is_empty() {
            return Err(DispatchError::MissingRecipient("whatsapp".into()));
        }
        if self.config.mock_mode {
            return Ok(self.mock_receipt("whatsapp", phone, message));
        }
        let (Some(phone_id), Some(token)) = (self.config.whatsapp_phone_id.as_deref(), self.config.whatsapp_access_token.as_deref())
        else {
            return Err(DispatchError::MissingCredentials("WhatsApp API".into()));
        };
        let payload = json!({
            "messaging_product": "whatsapp",
            "to": clean_phone(phone),
            "type": "text",
            "text": { "body": message },
        });
        let response = self.http
                           .post(self.whatsapp_url(phone_id))
                           .bearer_auth(token)
                           .json(&payload)
                           .send()
                           .await
                           .map_err(http_error)?;
        if !response.status().is_success() {
            return Err(api_error(response, "WhatsApp API error").await);
        }
        let parsed: WhatsappResponse = response.json().await.map_err(http_error)?;
        log::info!("whatsapp alert sent to {phone}");
        Ok(DeliveryReceipt { message_id: parsed.messages.into_iter().next().map(|m| m.id), mock: false })
    }

    async fn send_webhook(&self, url: &str, payload: &Value) -> Result<DeliveryReceipt, DispatchError> {
        if self.config.mock_mode {
            return Ok(self.mock_receipt("webhook", url, &payload.to_string()));
        }
        let response = self.http.post(url).json(payload).send().await.map_err(http_error)?;
        if !response.status().is_success() {
            return Err(api_error(response, "webhook rejected").await);
        }
        log::info!("webhook delivered to {url}");
        Ok(DeliveryReceipt { message_id: None, mock: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers_are_cleaned() {
        assert_eq!(clean_phone("+34 600 111 222"), "34600111222");
        assert_eq!(clean_phone("\t+1555\n0100"), "15550100");
    }

    #[test]
    fn whatsapp_url_uses_configured_version() {
        let client = HttpNotificationClient::new(NotifyConfig::default()).unwrap();
        assert_eq!(client.whatsapp_url("987"), "https://graph.facebook.com/v18.0/987/messages");
    }

    #[tokio::test]
    async fn missing_credentials_are_reported_not_panicked() {
        let client = HttpNotificationClient::new(NotifyConfig::default()).unwrap();
        let err = client.send_whatsapp("+1555", "hi").await.unwrap_err();
        assert_eq!(err.to_string(), "WhatsApp API credentials missing");
        let err = client.send_email("ops@example.com", "s", "b").await.unwrap_err();
        assert!(matches!(err, DispatchError::MissingCredentials(_)));
    }

    #[tokio::test]
    async fn mock_mode_never_touches_the_network() {
        let client = HttpNotificationClient::new(NotifyConfig::mock()).unwrap();
        let receipt = client.send_webhook("http://127.0.0.1:1/unreachable", &json!({"a": 1})).await.unwrap();
        assert!(receipt.mock);
        assert!(client.send_whatsapp("+1", "m").await.unwrap().mock);
        assert!(client.send_email("a@b", "s", "b").await.unwrap().mock);
    }

    #[tokio::test]
    async fn blank_recipients_are_rejected_even_in_mock_mode() {
        let client = HttpNotificationClient::new(NotifyConfig::mock()).unwrap();
        let err = client.send_whatsapp(" + ", "m").await.unwrap_err();
        assert!(matches!(err, DispatchError::MissingRecipient(_)));
        assert!(client.send_email("", "s", "b").await.is_err());
    }
}
