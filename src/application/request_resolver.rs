// Request resolver - base URL, timeout and auth headers per call
use crate::application::runtime_config::{ConfigProvider, SessionStorage};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://30.61.1.21:180";
pub const DEFAULT_API_TIMEOUT_MS: u64 = 5000;

/// Session keys checked for the auth ticket, underscore spelling first.
const TICKET_KEYS: [&str; 2] = ["bx_auth_ticket", "bx-auth-ticket"];
/// The ticket is sent under both spellings.
const TICKET_HEADERS: [&str; 2] = ["bx-auth-ticket", "bx_auth_ticket"];

#[derive(Clone)]
pub struct RequestResolver {
    config: Arc<dyn ConfigProvider>,
    session: Option<Arc<dyn SessionStorage>>,
}

impl RequestResolver {
    /// `session` is `None` when there is no client session to read from;
    /// auth headers are then always empty.
    pub fn new(config: Arc<dyn ConfigProvider>, session: Option<Arc<dyn SessionStorage>>) -> Self {
        Self { config, session }
    }

    /// Parent-frame gateway, then app config, then the compiled default.
    pub fn resolve_base_url(&self) -> String {
        let base = non_empty(self.config.gateway_url())
            .or_else(|| non_empty(self.config.api_base()))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        base.trim_end_matches('/').to_string()
    }

    pub fn resolve_timeout(&self) -> Duration {
        let ms = self
            .config
            .api_timeout()
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_API_TIMEOUT_MS);
        Duration::from_millis(ms)
    }

    pub fn resolve_auth_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        let Some(session) = &self.session else {
            return headers;
        };

        let ticket = TICKET_KEYS
            .iter()
            .find_map(|key| non_empty(session.get(key)));

        if let Some(ticket) = ticket {
            for name in TICKET_HEADERS {
                headers.insert(name.to_string(), ticket.clone());
            }
        }
        headers
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
