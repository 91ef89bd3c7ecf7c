// Test doubles for the application layer seams
use crate::application::notifier::Notifier;
use crate::application::runtime_config::{ConfigProvider, SessionStorage};
use crate::application::transport::{FetchError, OutboundRequest, Transport};
use crate::domain::envelope::Envelope;
use crate::domain::notice::{Notice, NoticeKind};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, Clone)]
struct ConfigValues {
    gateway: Option<String>,
    api_base: Option<String>,
    timeout: Option<u64>,
}

/// Config provider whose values can change between calls. Clones share state.
#[derive(Debug, Default, Clone)]
pub struct FakeConfig {
    values: Arc<Mutex<ConfigValues>>,
}

impl FakeConfig {
    pub fn gateway(self, url: &str) -> Self {
        self.values.lock().unwrap().gateway = Some(url.to_string());
        self
    }

    pub fn api_base(self, url: &str) -> Self {
        self.set_api_base(url);
        self
    }

    pub fn timeout(self, ms: u64) -> Self {
        self.values.lock().unwrap().timeout = Some(ms);
        self
    }

    pub fn set_api_base(&self, url: &str) {
        self.values.lock().unwrap().api_base = Some(url.to_string());
    }
}

impl ConfigProvider for FakeConfig {
    fn gateway_url(&self) -> Option<String> {
        self.values.lock().unwrap().gateway.clone()
    }

    fn api_base(&self) -> Option<String> {
        self.values.lock().unwrap().api_base.clone()
    }

    fn api_timeout(&self) -> Option<u64> {
        self.values.lock().unwrap().timeout
    }
}

#[derive(Debug, Default, Clone)]
pub struct FakeSession {
    entries: HashMap<String, String>,
}

impl FakeSession {
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl SessionStorage for FakeSession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<NoticeKind> {
        self.notices().iter().map(|n| n.kind).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Envelope(Envelope),
    Status(u16),
    Transport(&'static str),
    Decode(&'static str),
    /// Never completes; only the caller's timeout ends it.
    Hang,
}

/// Transport answering per service name. Unscripted services fail.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl ScriptedTransport {
    pub fn reply(mut self, service_name: &str, reply: Reply) -> Self {
        self.replies.insert(service_name.to_string(), reply);
        self
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_select(&self, request: &OutboundRequest) -> Result<Envelope, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.get(&request.body.service_name).cloned();
        match reply {
            Some(Reply::Envelope(envelope)) => Ok(envelope),
            Some(Reply::Status(code)) => Err(FetchError::Status(code)),
            Some(Reply::Transport(reason)) => Err(FetchError::Transport(reason.to_string())),
            Some(Reply::Decode(reason)) => Err(FetchError::Decode(reason.to_string())),
            Some(Reply::Hang) => futures::future::pending().await,
            None => Err(FetchError::Transport(format!(
                "no reply scripted for {}",
                request.body.service_name
            ))),
        }
    }
}
