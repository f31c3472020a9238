//! Tipos del grafo: nodos (equipo / acción) y aristas dirigidas.
//!
//! La configuración de un nodo es una unión etiquetada (`NodeConfig`) que se
//! valida al construir/configurar el nodo, de modo que el evaluador nunca
//! accede a campos opcionales con valores por defecto implícitos.
use nexus_domain::{ActionKind, Severity};
use serde::{Deserialize, Serialize};

use crate::condition::Operator;
use crate::constants::MAX_THRESHOLD_MAGNITUDE;
use crate::errors::GraphError;

/// Configuración de un nodo de equipo (fuente de lecturas con condición).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentConfig {
    pub sensor_type: String,
    #[serde(default)]
    pub operator: Operator,
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_max: Option<f64>,
    #[serde(default)]
    pub severity: Severity,
    /// Objeto concreto de la planta que se resalta cuando la condición salta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_equipment_id: Option<String>,
    /// Prefijo de la clave de sensor; si falta se usa el id del nodo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<String>,
}

impl EquipmentConfig {
    pub fn new(sensor_type: impl Into<String>, operator: Operator, threshold: f64) -> Self {
        Self { sensor_type: sensor_type.into(),
               operator,
               threshold,
               threshold_max: None,
               severity: Severity::default(),
               specific_equipment_id: None,
               equipment_id: None }
    }

    pub fn with_threshold_max(mut self, max: f64) -> Self {
        self.threshold_max = Some(max);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_specific_equipment(mut self, id: impl Into<String>) -> Self {
        self.specific_equipment_id = Some(id.into());
        self
    }

    pub fn with_equipment_id(mut self, id: impl Into<String>) -> Self {
        self.equipment_id = Some(id.into());
        self
    }

    /// Clave `<equipmentId>.<sensorType>` de la lectura asociada.
    pub fn sensor_key(&self, node_id: &str) -> String {
        let equipment = non_empty(&self.equipment_id).unwrap_or(node_id);
        format!("{}.{}", equipment, self.sensor_type)
    }

    fn validate(&self, node_id: &str) -> Result<(), GraphError> {
        let invalid = |reason: &str| GraphError::InvalidConfig { node_id: node_id.to_string(),
                                                                 reason: reason.to_string() };
        if self.sensor_type.trim().is_empty() {
            return Err(invalid("sensor_type is empty"));
        }
        if !self.threshold.is_finite() {
            return Err(invalid("threshold must be a finite number"));
        }
        if self.threshold_max.is_some_and(|m| !m.is_finite()) {
            return Err(invalid("threshold_max must be a finite number"));
        }
        let limit = |t: f64| t.abs() <= MAX_THRESHOLD_MAGNITUDE;
        if !limit(self.threshold) || self.threshold_max.is_some_and(|m| !limit(m)) {
            return Err(invalid("threshold out of range"));
        }
        Ok(())
    }
}

/// Configuración de un nodo de acción (canal de notificación).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionConfig {
    #[serde(default)]
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,
    /// Unidad mostrada en el texto de alerta que va al log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl ActionConfig {
    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn phone_number(&self) -> Option<&str> {
        non_empty(&self.phone_number)
    }

    pub fn webhook_url(&self) -> Option<&str> {
        non_empty(&self.webhook_url)
    }

    pub fn message_template(&self) -> Option<&str> {
        non_empty(&self.message_template)
    }

    pub fn unit(&self) -> &str {
        non_empty(&self.unit).unwrap_or("")
    }
}

/// Campos opcionales vacíos cuentan como ausentes.
pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeConfig {
    #[default]
    Unconfigured,
    Equipment(EquipmentConfig),
    Action(ActionConfig),
}

/// Nodo del workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub category: String,
    pub is_action: bool,
    #[serde(default)]
    pub configured: bool,
    #[serde(default)]
    pub config: NodeConfig,
}

impl Node {
    /// Nodo sin configurar (recién soltado en el canvas).
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: impl Into<String>, is_action: bool) -> Self {
        Self { id: id.into(),
               label: label.into(),
               category: category.into(),
               is_action,
               configured: false,
               config: NodeConfig::Unconfigured }
    }

    pub fn equipment(id: impl Into<String>, label: impl Into<String>, category: impl Into<String>, config: EquipmentConfig) -> Self {
        Self { configured: true,
               config: NodeConfig::Equipment(config),
               ..Self::new(id, label, category, false) }
    }

    pub fn action(id: impl Into<String>, label: impl Into<String>, kind: ActionKind, config: ActionConfig) -> Self {
        Self { configured: true,
               config: NodeConfig::Action(config),
               ..Self::new(id, label, kind.as_str(), true) }
    }

    /// Configuración de equipo si el nodo es de equipo y está configurado.
    pub fn equipment_config(&self) -> Option<&EquipmentConfig> {
        match (&self.config, self.is_action, self.configured) {
            (NodeConfig::Equipment(cfg), false, true) => Some(cfg),
            _ => None,
        }
    }

    /// Configuración de acción si el nodo es de acción y está configurado.
    pub fn action_config(&self) -> Option<&ActionConfig> {
        match (&self.config, self.is_action, self.configured) {
            (NodeConfig::Action(cfg), true, true) => Some(cfg),
            _ => None,
        }
    }

    pub fn action_kind(&self) -> Option<ActionKind> {
        if !self.is_action {
            return None;
        }
        self.category.parse().ok()
    }

    /// Label para mensajes; cae a un genérico si está vacío.
    pub fn display_name(&self) -> &str {
        if self.label.trim().is_empty() { "Equipment" } else { &self.label }
    }

    /// Comprueba que la configuración corresponde al tipo de nodo.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.id.trim().is_empty() {
            return Err(GraphError::InvalidConfig { node_id: self.id.clone(),
                                                   reason: "node id is empty".into() });
        }
        if self.is_action && self.action_kind().is_none() {
            return Err(GraphError::InvalidConfig { node_id: self.id.clone(),
                                                   reason: format!("unknown action category {:?}", self.category) });
        }
        match (&self.config, self.is_action) {
            (NodeConfig::Unconfigured, _) => {
                if self.configured {
                    return Err(GraphError::InvalidConfig { node_id: self.id.clone(),
                                                           reason: "configured node without config".into() });
                }
                Ok(())
            }
            (NodeConfig::Equipment(cfg), false) => cfg.validate(&self.id),
            (NodeConfig::Action(_), true) => Ok(()),
            _ => Err(GraphError::ConfigKindMismatch { node_id: self.id.clone() }),
        }
    }
}

/// Arista dirigida (por convención equipo → acción).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
}

impl Edge {
    /// Crea la arista `edge_<source>_<target>`; rechaza extremos vacíos.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Result<Self, GraphError> {
        let source = source.into();
        let target = target.into();
        let edge = Self { id: format!("edge_{source}_{target}"), source, target };
        edge.validate()?;
        Ok(edge)
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        if self.source.trim().is_empty() || self.target.trim().is_empty() {
            return Err(GraphError::EmptyEndpoint { edge_id: self.id.clone() });
        }
        Ok(())
    }
}
