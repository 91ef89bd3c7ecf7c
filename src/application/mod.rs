// Application layer - Fetch, fallback and adapt pipeline
pub mod adapters;
pub mod boards;
pub mod gateway;
pub mod loading;
pub mod normalizer;
pub mod notifier;
pub mod reactive;
pub mod request_resolver;
pub mod runtime_config;
pub mod transport;

#[cfg(test)]
pub mod testing;
