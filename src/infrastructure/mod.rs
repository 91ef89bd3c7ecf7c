// Infrastructure layer - Config files, HTTP transport, session and notice sinks
pub mod config;
pub mod http_transport;
pub mod notice_log;
pub mod session;
