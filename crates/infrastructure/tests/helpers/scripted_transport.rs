use super::{message_id, ResponseBuilder};
use ferrous_mx_domain::DomainError;
use ferrous_mx_infrastructure::dns::{DnsTransport, TransportFactory};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the fake network does with the next query.
pub enum Reply {
    Timeout,
    Io,
    Raw(Vec<u8>),
    /// Response built with the query's transaction id.
    Echo(ResponseBuilder),
    /// Response whose id is off by one from the query's.
    MismatchedId(ResponseBuilder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentQuery {
    pub server: SocketAddr,
    pub timeout: Duration,
    pub id: u16,
    pub transport: usize,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    sent: Vec<SentQuery>,
    created: usize,
}

/// Transport factory whose transports answer from a shared script.
/// An exhausted script times out.
#[derive(Clone, Default)]
pub struct ScriptedTransportFactory {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransportFactory {
    pub fn new(replies: Vec<Reply>) -> Self {
        let factory = Self::default();
        factory.script.lock().unwrap().replies = replies.into();
        factory
    }

    pub fn push(&self, reply: Reply) {
        self.script.lock().unwrap().replies.push_back(reply);
    }

    pub fn sent(&self) -> Vec<SentQuery> {
        self.script.lock().unwrap().sent.clone()
    }

    pub fn created(&self) -> usize {
        self.script.lock().unwrap().created
    }
}

impl TransportFactory for ScriptedTransportFactory {
    fn create(&self) -> Result<Box<dyn DnsTransport>, DomainError> {
        let mut script = self.script.lock().unwrap();
        script.created += 1;
        Ok(Box::new(ScriptedTransport {
            script: Arc::clone(&self.script),
            number: script.created,
        }))
    }
}

struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
    number: usize,
}

impl DnsTransport for ScriptedTransport {
    fn exchange(
        &mut self,
        server: SocketAddr,
        request: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let id = message_id(request);
        let mut script = self.script.lock().unwrap();
        script.sent.push(SentQuery {
            server,
            timeout,
            id,
            transport: self.number,
        });

        match script.replies.pop_front().unwrap_or(Reply::Timeout) {
            Reply::Timeout => Err(DomainError::TransportTimeout {
                server: server.to_string(),
            }),
            Reply::Io => Err(DomainError::TransportIo {
                server: server.to_string(),
                reason: "connection refused".to_string(),
            }),
            Reply::Raw(bytes) => Ok(bytes),
            Reply::Echo(builder) => Ok(builder.id(id).build()),
            Reply::MismatchedId(builder) => Ok(builder.id(id.wrapping_add(1)).build()),
        }
    }
}
