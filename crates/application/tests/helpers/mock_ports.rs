use ferrous_mx_application::ports::{AlertSeverity, AlertSink, DnsLookup, MailHostCache};
use ferrous_mx_domain::{DnsMessage, MailHostList, RecordType, ResponseCode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted lookup: unknown (name, type) pairs answer NOERROR with no records.
pub struct MockDnsLookup {
    responses: Mutex<HashMap<(String, RecordType), DnsMessage>>,
    calls: Mutex<Vec<(String, RecordType)>>,
}

impl MockDnsLookup {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_response(&self, name: &str, record_type: RecordType, message: DnsMessage) {
        self.responses
            .lock()
            .unwrap()
            .insert((name.to_string(), record_type), message);
    }

    pub fn set_rcode(&self, name: &str, record_type: RecordType, rcode: ResponseCode) {
        self.set_response(name, record_type, DnsMessage::new(1, rcode));
    }

    pub fn calls(&self) -> Vec<(String, RecordType)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockDnsLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsLookup for MockDnsLookup {
    fn lookup(&self, name: &str, record_type: RecordType) -> DnsMessage {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), record_type));
        self.responses
            .lock()
            .unwrap()
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or_else(|| DnsMessage::new(1, ResponseCode::NoError))
    }
}

/// Unbounded map-backed cache honouring list expiry.
#[derive(Default)]
pub struct MemoryMailHostCache {
    entries: Mutex<HashMap<String, Arc<MailHostList>>>,
}

impl MemoryMailHostCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.entries.lock().unwrap().contains_key(domain)
    }
}

impl MailHostCache for MemoryMailHostCache {
    fn get(&self, domain: &str) -> Option<Arc<MailHostList>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(domain) {
            Some(list) if list.is_expired() => {
                entries.remove(domain);
                None
            }
            Some(list) => Some(Arc::clone(list)),
            None => None,
        }
    }

    fn put(&self, domain: &str, list: Arc<MailHostList>) -> Option<(String, Arc<MailHostList>)> {
        if list.is_expired() {
            return None;
        }
        self.entries
            .lock()
            .unwrap()
            .insert(domain.to_string(), list);
        None
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[derive(Default)]
pub struct RecordingAlertSink {
    alerts: Mutex<Vec<(AlertSeverity, String, String)>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<(AlertSeverity, String, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlertSink {
    fn raise(&self, severity: AlertSeverity, alert_code: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((severity, alert_code.to_string(), message.to_string()));
    }
}
