// Domain layer - Wire envelopes, chart shapes and notices
pub mod chart;
pub mod envelope;
pub mod notice;
