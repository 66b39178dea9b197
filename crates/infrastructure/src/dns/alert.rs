use ferrous_mx_application::ports::{AlertSeverity, AlertSink};
use tracing::{error, warn};

/// Default alert sink: alerts become structured log events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn raise(&self, severity: AlertSeverity, alert_code: &str, message: &str) {
        match severity {
            AlertSeverity::Critical => error!(alert_code, %severity, "{}", message),
            AlertSeverity::Warning => warn!(alert_code, %severity, "{}", message),
        }
    }
}
