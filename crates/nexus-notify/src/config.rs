//! Configuración de canales cargada del entorno (.env).
use std::env;

use once_cell::sync::Lazy;

use crate::error::NotifyError;

pub const DEFAULT_WHATSAPP_API_VERSION: &str = "v18.0";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Carga `.env` una sola vez; si no existe se usa el entorno tal cual.
static DOTENV_LOADED: Lazy<bool> = Lazy::new(|| dotenvy::dotenv().is_ok());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub mock_mode: bool,
    /// Endpoint relay de correo (`POST {to, subject, body}`).
    pub email_endpoint: Option<String>,
    pub whatsapp_api_version: String,
    pub whatsapp_phone_id: Option<String>,
    pub whatsapp_access_token: Option<String>,
    pub http_timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig { mock_mode: false,
                       email_endpoint: None,
                       whatsapp_api_version: DEFAULT_WHATSAPP_API_VERSION.to_string(),
                       whatsapp_phone_id: None,
                       whatsapp_access_token: None,
                       http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS }
    }
}

impl NotifyConfig {
    /// Sin red: todas las entregas se registran y devuelven éxito.
    pub fn mock() -> Self {
        NotifyConfig { mock_mode: true, ..Self::default() }
    }

    pub fn from_env() -> Result<Self, NotifyError> {
        if !*DOTENV_LOADED {
            log::debug!("no .env file loaded, using process environment");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de
    /// variables (permite testear sin tocar el entorno del proceso).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotifyError>
        where F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mock_mode = match get("NEXUS_NOTIFICATION_MOCK_MODE") {
            None => false,
            Some(v) => parse_bool("NEXUS_NOTIFICATION_MOCK_MODE", &v)?,
        };
        let http_timeout_secs = match get("NEXUS_HTTP_TIMEOUT_SECS") {
            None => DEFAULT_HTTP_TIMEOUT_SECS,
            Some(v) => v.parse()
                        .map_err(|_| NotifyError::InvalidSetting { key: "NEXUS_HTTP_TIMEOUT_SECS".into(), value: v.clone() })?,
        };
        let whatsapp_api_version =
            get("NEXUS_WHATSAPP_API_VERSION").unwrap_or_else(|| DEFAULT_WHATSAPP_API_VERSION.to_string());
        Ok(NotifyConfig { mock_mode,
                          email_endpoint: get("NEXUS_EMAIL_ENDPOINT"),
                          whatsapp_api_version,
                          whatsapp_phone_id: get("NEXUS_WHATSAPP_PHONE_ID"),
                          whatsapp_access_token: get("NEXUS_WHATSAPP_ACCESS_TOKEN"),
                          http_timeout_secs })
    }

    pub fn whatsapp_configured(&self) -> bool {
        self.whatsapp_phone_id.is_some() && self.whatsapp_access_token.is_some()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, NotifyError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(NotifyError::InvalidSetting { key: key.to_string(), value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = NotifyConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, NotifyConfig::default());
        assert!(!cfg.whatsapp_configured());
    }

    #[test]
    fn reads_channel_settings() {
        let cfg = NotifyConfig::from_lookup(lookup(&[("NEXUS_NOTIFICATION_MOCK_MODE", "TRUE"),
                                                     ("NEXUS_WHATSAPP_PHONE_ID", "1234"),
                                                     ("NEXUS_WHATSAPP_ACCESS_TOKEN", "tok"),
                                                     ("NEXUS_WHATSAPP_API_VERSION", "v19.0"),
                                                     ("NEXUS_EMAIL_ENDPOINT", " "),
                                                     ("NEXUS_HTTP_TIMEOUT_SECS", "3")])).unwrap();
        assert!(cfg.mock_mode);
        assert!(cfg.whatsapp_configured());
        assert_eq!(cfg.whatsapp_api_version, "v19.0");
        assert_eq!(cfg.email_endpoint, None);
        assert_eq!(cfg.http_timeout_secs, 3);
    }

    #[test]
    fn rejects_garbage_values() {
        assert!(NotifyConfig::from_lookup(lookup(&[("NEXUS_NOTIFICATION_MOCK_MODE", "maybe")])).is_err());
        assert!(NotifyConfig::from_lookup(lookup(&[("NEXUS_HTTP_TIMEOUT_SECS", "ten")])).is_err());
    }
}
