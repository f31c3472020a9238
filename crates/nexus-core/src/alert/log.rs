//! Sink del log de alertas.
//!
//! Append-only salvo por `update_status`; la retención está acotada y las
//! entradas más antiguas se descartan.
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::feed::AlertEntry;
use crate::constants::DEFAULT_ALERT_LOG_CAP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Pending,
    Sent,
    Failed,
}

impl AlertStatus {
    pub fn from_success(success: bool) -> Self {
        if success { AlertStatus::Sent } else { AlertStatus::Failed }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertLogRecord {
    pub id: String,
    pub workflow_id: String,
    pub action_type: String,
    pub recipient: String,
    pub message: String,
    pub status: AlertStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub trait AlertLog {
    /// Registra un intento y devuelve el id asignado.
    fn log(&mut self,
           workflow_id: &str,
           action_type: &str,
           recipient: &str,
           message: &str,
           status: AlertStatus,
           error: Option<&str>)
           -> String;
    /// Hasta `limit` registros, del más nuevo al más antiguo.
    fn recent(&self, limit: usize, action_type: Option<&str>) -> Vec<AlertLogRecord>;
    /// `false` si el id ya no está retenido.
    fn update_status(&mut self, id: &str, status: AlertStatus, error: Option<&str>) -> bool;
}

#[derive(Debug, Clone)]
pub struct InMemoryAlertLog {
    inner: VecDeque<AlertLogRecord>,
    cap: usize,
}

impl Default for InMemoryAlertLog {
    fn default() -> Self {
        Self::with_cap(DEFAULT_ALERT_LOG_CAP)
    }
}

impl InMemoryAlertLog {
    pub fn with_cap(cap: usize) -> Self {
        Self { inner: VecDeque::new(), cap }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl AlertLog for InMemoryAlertLog {
    fn log(&mut self,
           workflow_id: &str,
           action_type: &str,
           recipient: &str,
           message: &str,
           status: AlertStatus,
           error: Option<&str>)
           -> String {
        let id = AlertEntry::new_id();
        self.inner.push_front(AlertLogRecord { id: id.clone(),
                                               workflow_id: workflow_id.to_string(),
                                               action_type: action_type.to_string(),
                                               recipient: recipient.to_string(),
                                               message: message.to_string(),
                                               status,
                                               error_message: error.map(str::to_string),
                                               created_at: Utc::now() });
        self.inner.truncate(self.cap);
        id
    }

    fn recent(&self, limit: usize, action_type: Option<&str>) -> Vec<AlertLogRecord> {
        self.inner
            .iter()
            .filter(|r| action_type.map_or(true, |t| r.action_type == t))
            .take(limit)
            .cloned()
            .collect()
    }

    fn update_status(&mut self, id: &str, status: AlertStatus, error: Option<&str>) -> bool {
        let Some(record) = self.inner.iter_mut().find(|r| r.id == id) else { return false };
        record.status = status;
        if let Some(e) = error {
            record.error_message = Some(e.to_string());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_is_capped_newest_first() {
        let mut log = InMemoryAlertLog::with_cap(2);
        log.log("wf", "email", "a@x", "m1", AlertStatus::Sent, None);
        log.log("wf", "webhook", "http://h", "m2", AlertStatus::Failed, Some("boom"));
        log.log("wf", "email", "b@x", "m3", AlertStatus::Sent, None);
        assert_eq!(log.len(), 2);
        let recent = log.recent(10, None);
        assert_eq!(recent[0].message, "m3");
        assert_eq!(recent[1].error_message.as_deref(), Some("boom"));
        assert_eq!(log.recent(10, Some("email")).len(), 1);
        assert_eq!(log.recent(1, None).len(), 1);
    }

    #[test]
    fn update_status_keeps_previous_error_when_none_given() {
        let mut log = InMemoryAlertLog::default();
        let id = log.log("", "whatsapp", "+1", "m", AlertStatus::Pending, Some("queued late"));
        assert!(log.update_status(&id, AlertStatus::Sent, None));
        let rec = &log.recent(1, None)[0];
        assert_eq!(rec.status, AlertStatus::Sent);
        assert_eq!(rec.error_message.as_deref(), Some("queued late"));
        assert!(!log.update_status("missing", AlertStatus::Failed, None));
    }
}
