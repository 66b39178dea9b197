use ferrous_mx_application::ports::{AlertSeverity, AlertSink};
use ferrous_mx_domain::EscalationRule;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Consecutive resolver failure counter with threshold alerts.
///
/// Each rule fires once when the count reaches its threshold; the count and
/// the rules re-arm on the next success. Alerts never stop resolution.
pub struct FailureEscalation {
    rules: Vec<EscalationRule>,
    sink: Arc<dyn AlertSink>,
    consecutive_failures: AtomicU32,
}

impl FailureEscalation {
    pub fn new(rules: Vec<EscalationRule>, sink: Arc<dyn AlertSink>) -> Self {
        Self {
            rules,
            sink,
            consecutive_failures: AtomicU32::new(0),
        }
    }

    pub fn record_success(&self) {
        let previous = self.consecutive_failures.swap(0, Ordering::Relaxed);
        if previous > 0 {
            debug!(previous, "Resolver recovered, failure count reset");
        }
    }

    /// Returns the failure count after this failure.
    pub fn record_failure(&self) -> u32 {
        let count = self
            .consecutive_failures
            .fetch_add(1, Ordering::Relaxed)
            .saturating_add(1);

        for rule in self.rules.iter().filter(|rule| rule.threshold == count) {
            self.sink.raise(
                AlertSeverity::Warning,
                &rule.alert_code,
                &format!("{} consecutive DNS lookup failures", count),
            );
        }
        count
    }

    /// Conditions that retrying cannot fix, such as no usable name server.
    pub fn report_fatal(&self, alert_code: &str, message: &str) {
        self.sink.raise(AlertSeverity::Critical, alert_code, message);
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }
}
