//! Despacho de notificaciones: contrato del cliente, plantillas y el
//! despachador por tipo de acción.

pub mod client;
pub mod dispatcher;
pub mod message;

pub use client::{Channel, DeliveryReceipt, MockNotificationClient, NotificationClient, SentMessage};
pub use dispatcher::{dispatch, ChannelResult, DispatchOutcome, SYSTEM_RECIPIENT};
pub use message::{create_threshold_alert, default_message, email_subject, format_whatsapp_alert, render_message, AlertContext,
                  ThresholdAlert};
