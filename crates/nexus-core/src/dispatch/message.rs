//! Plantillas de texto de las alertas.
use chrono::{DateTime, Utc};
use nexus_domain::Severity;
use serde::{Deserialize, Serialize};

/// Datos del disparo que viajan a cada acción conectada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertContext {
    pub equipment: String,
    pub sensor: String,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
}

/// Mensaje por defecto cuando la acción no define plantilla.
pub fn default_message(ctx: &AlertContext) -> String {
    format!("Alert: {} - {} = {} (threshold: {})", ctx.equipment, ctx.sensor, ctx.value, ctx.threshold)
}

/// `message_template` si existe, si no el mensaje por defecto.
pub fn render_message(ctx: &AlertContext, template: Option<&str>) -> String {
    template.map(str::to_string).unwrap_or_else(|| default_message(ctx))
}

pub fn email_subject(ctx: &AlertContext) -> String {
    format!("[{}] {}", ctx.severity.label(), ctx.equipment)
}

/// Formato con negritas de WhatsApp.
pub fn format_whatsapp_alert(ctx: &AlertContext, message: &str) -> String {
    let emoji = if ctx.severity == Severity::Critical { "🚨" } else { "⚠️" };
    format!("{emoji} *Manufacturing Alert*\n\n\
             *Equipment:* {}\n\
             *Severity:* {}\n\
             *Sensor:* {}\n\
             *Value:* {}\n\
             *Threshold:* {}\n\n\
             {message}\n\n\
             _Sent from Nexus Floor Control_",
            ctx.equipment,
            ctx.severity.label(),
            ctx.sensor,
            ctx.value,
            ctx.threshold)
}

/// Texto que se guarda en el log de alertas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdAlert {
    pub text: String,
    pub html: String,
    pub subject: String,
}

pub fn create_threshold_alert(ctx: &AlertContext, unit: &str, at: DateTime<Utc>) -> ThresholdAlert {
    let emoji = ctx.severity.emoji();
    let sev = ctx.severity.label();
    let now = at.format("%Y-%m-%d %H:%M:%S UTC");
    let color = if ctx.severity == Severity::Critical { "#ef4444" } else { "#eab308" };

    let text = format!("{emoji} NEXUS ALERT - {sev}\n\n\
                        Equipment: {}\n\
                        Sensor: {}\n\
                        Current Value: {} {unit}\n\
                        Threshold: {} {unit}\n\
                        Time: {now}",
                       ctx.equipment, ctx.sensor, ctx.value, ctx.threshold);

    let row = |label: &str, value: &str, style: &str| {
        format!("<tr><td style=\"padding: 5px; color: #9ca3af;\">{label}:</td><td style=\"padding: 5px;{style}\">{value}</td></tr>")
    };
    let html = format!("<div style=\"font-family: Arial, sans-serif; padding: 20px; background: #1a1a2e; color: white;\">\
                        <h2 style=\"color: {color};\">{emoji} NEXUS ALERT - {sev}</h2>\
                        <table style=\"margin: 20px 0;\">{}{}{}{}{}</table>\
                        <p style=\"color: #6b7280; font-size: 12px;\">Sent by Nexus Monitoring System</p>\
                        </div>",
                       row("Equipment", &ctx.equipment, ""),
                       row("Sensor", &ctx.sensor, ""),
                       row("Current Value", &format!("{} {unit}", ctx.value), " color: #ef4444;"),
                       row("Threshold", &format!("{} {unit}", ctx.threshold), ""),
                       row("Time", &now.to_string(), ""));

    ThresholdAlert { text,
                     html,
                     subject: format!("[{sev}] {} - {} Alert", ctx.equipment, ctx.sensor) }
}
