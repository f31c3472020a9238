// category.rs
//! Catálogo de categorías de nodos del workflow.
//!
//! Un nodo pertenece a una categoría de equipo (fuente de lecturas con
//! condición) o de acción (canal de notificación). La categoría determina qué
//! campos de configuración tienen sentido.
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Equipment,
    Action,
}

/// Definición estática de una categoría disponible para el builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDefinition {
    pub key: &'static str,
    /// Nombre legible; se usa como prefijo del label del nodo (`Analyzers-3`).
    pub name: &'static str,
    pub kind: CategoryKind,
}

pub static CATEGORY_DEFINITIONS: [CategoryDefinition; 9] = [
    CategoryDefinition { key: "analyzer", name: "Analyzers", kind: CategoryKind::Equipment },
    CategoryDefinition { key: "robot", name: "Robots", kind: CategoryKind::Equipment },
    CategoryDefinition { key: "centrifuge", name: "Centrifuges", kind: CategoryKind::Equipment },
    CategoryDefinition { key: "storage", name: "Storage", kind: CategoryKind::Equipment },
    CategoryDefinition { key: "conveyor", name: "Conveyors", kind: CategoryKind::Equipment },
    CategoryDefinition { key: "whatsapp", name: "WhatsApp", kind: CategoryKind::Action },
    CategoryDefinition { key: "email", name: "Email", kind: CategoryKind::Action },
    CategoryDefinition { key: "alert", name: "System Alert", kind: CategoryKind::Action },
    CategoryDefinition { key: "webhook", name: "Webhook", kind: CategoryKind::Action },
];

/// Busca la definición de una categoría por su clave.
pub fn category_definition(key: &str) -> Option<&'static CategoryDefinition> {
    CATEGORY_DEFINITIONS.iter().find(|c| c.key == key)
}

/// Canales de notificación soportados por los nodos de acción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Email,
    Whatsapp,
    Webhook,
    /// Alerta de sistema: sólo acuse en la UI, sin entrega externa.
    Alert,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Email => "email",
            ActionKind::Whatsapp => "whatsapp",
            ActionKind::Webhook => "webhook",
            ActionKind::Alert => "alert",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ActionKind::Email),
            "whatsapp" => Ok(ActionKind::Whatsapp),
            "webhook" => Ok(ActionKind::Webhook),
            "alert" => Ok(ActionKind::Alert),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}
