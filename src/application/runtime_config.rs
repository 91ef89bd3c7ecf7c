// Host capabilities consulted on every request
//
// Operators may swap the runtime config without a restart, so implementors
// must answer from the current source on each call.

/// Read-only view of runtime-injected configuration.
pub trait ConfigProvider: Send + Sync {
    /// Gateway URL injected by a hosting parent frame.
    fn gateway_url(&self) -> Option<String>;

    /// Application-level API base override.
    fn api_base(&self) -> Option<String>;

    /// Application-level request timeout override, in milliseconds.
    fn api_timeout(&self) -> Option<u64>;
}

/// Client session key/value store holding the auth ticket.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}
