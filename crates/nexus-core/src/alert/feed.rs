//! Feed acotado de alertas recientes (la más nueva primero).
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use nexus_domain::{ActionKind, Severity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_ALERT_FEED_CAP;

/// Registro de un intento de despacho y su resultado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub equipment: String,
    pub sensor: String,
    pub value: f64,
    pub threshold: f64,
    pub action_type: ActionKind,
    pub recipient: String,
    pub severity: Severity,
    pub success: bool,
}

impl AlertEntry {
    pub fn new_id() -> String {
        format!("alert_{}", Uuid::new_v4().simple())
    }
}

/// Al insertar por delante se expulsa la entrada más antigua cuando se supera
/// `cap`.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    entries: VecDeque<AlertEntry>,
    cap: usize,
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self::with_cap(DEFAULT_ALERT_FEED_CAP)
    }
}

impl AlertFeed {
    pub fn with_cap(cap: usize) -> Self {
        AlertFeed { entries: VecDeque::with_capacity(cap.min(1024)), cap }
    }

    pub fn push(&mut self, entry: AlertEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.cap);
    }

    /// Entradas de la más reciente a la más antigua.
    pub fn entries(&self) -> impl Iterator<Item = &AlertEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&AlertEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
