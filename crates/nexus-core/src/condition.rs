//! Evaluador de condiciones de umbral.
//!
//! Función pura `(valor, operador, umbral[, umbral_max]) -> bool`. La política
//! es fail-closed: cualquier error de evaluación (operador desconocido,
//! operandos no finitos) se registra y cuenta como condición no cumplida.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::EQUALITY_TOLERANCE;
use crate::errors::EvaluationError;

/// Operadores de comparación soportados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Operator {
    #[default]
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    /// Rango inclusivo `[threshold, threshold_max]`.
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "not_between")]
    NotBetween,
}

impl Operator {
    pub const ALL: [Operator; 8] = [Operator::GreaterThan,
                                    Operator::LessThan,
                                    Operator::GreaterOrEqual,
                                    Operator::LessOrEqual,
                                    Operator::Equals,
                                    Operator::NotEquals,
                                    Operator::Between,
                                    Operator::NotBetween];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::Between => "between",
            Operator::NotBetween => "not_between",
        }
    }

    /// `true` para los operadores que usan `threshold_max`.
    pub fn is_range(self) -> bool {
        matches!(self, Operator::Between | Operator::NotBetween)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL.iter()
                     .copied()
                     .find(|op| op.as_str() == s.trim())
                     .ok_or_else(|| EvaluationError::UnknownOperator(s.to_string()))
    }
}

fn in_range(value: f64, min: f64, max: f64) -> bool {
    min <= value && value <= max
}

/// Evalúa la condición devolviendo el error en vez de aplicar fail-closed.
///
/// `threshold_max` sólo se usa en `between`/`not_between`; si falta, el rango
/// degenera al punto `[threshold, threshold]`.
pub fn try_evaluate(value: f64,
                    operator: Operator,
                    threshold: f64,
                    threshold_max: Option<f64>)
                    -> Result<bool, EvaluationError> {
    let max_is_finite = threshold_max.map(f64::is_finite).unwrap_or(true);
    if !value.is_finite() || !threshold.is_finite() || (operator.is_range() && !max_is_finite) {
        return Err(EvaluationError::NonFinite { value, threshold, threshold_max });
    }
    let max = threshold_max.unwrap_or(threshold);
    let met = match operator {
        Operator::GreaterThan => value > threshold,
        Operator::LessThan => value < threshold,
        Operator::GreaterOrEqual => value >= threshold,
        Operator::LessOrEqual => value <= threshold,
        Operator::Equals => (value - threshold).abs() < EQUALITY_TOLERANCE,
        Operator::NotEquals => (value - threshold).abs() >= EQUALITY_TOLERANCE,
        Operator::Between => in_range(value, threshold, max),
        Operator::NotBetween => !in_range(value, threshold, max),
    };
    Ok(met)
}

/// Evalúa la condición; un error de evaluación se registra y devuelve `false`.
pub fn evaluate(value: f64, operator: Operator, threshold: f64, threshold_max: Option<f64>) -> bool {
    match try_evaluate(value, operator, threshold, threshold_max) {
        Ok(met) => met,
        Err(e) => {
            log::warn!("condition not evaluated ({operator}): {e}");
            false
        }
    }
}

/// Variante con el operador como texto (configuración sin validar).
pub fn evaluate_raw(value: f64, operator: &str, threshold: f64, threshold_max: Option<f64>) -> bool {
    match operator.parse::<Operator>() {
        Ok(op) => evaluate(value, op, threshold, threshold_max),
        Err(e) => {
            log::warn!("{e}");
            false
        }
    }
}
