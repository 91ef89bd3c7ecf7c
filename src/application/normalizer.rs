// Response normalizer - envelope checks, empty detection and adaptation
use crate::application::adapters::Adapter;
use crate::application::notifier::Notifier;
use crate::domain::chart::ChartData;
use crate::domain::envelope::Envelope;
use crate::domain::notice::{Notice, NoticeKind};

/// Turn an envelope into chart data, or `None` when the caller should fall
/// back. Never fails; problems are reported through `notifier`.
///
/// - non-`SUCCESS` state: one `BadState` notice, `None`
/// - `SUCCESS` with null/empty data: one `EmptyPayload` notice, the adapted
///   empty payload is still returned
/// - adapter rejects the payload: one `MalformedPayload` notice, `None`
pub fn normalize(
    envelope: &Envelope,
    adapter: &Adapter,
    label: &str,
    notifier: &dyn Notifier,
) -> Option<ChartData> {
    if !envelope.is_success() {
        let detail = envelope
            .message
            .as_deref()
            .map(|m| format!(": {}", m))
            .unwrap_or_default();
        notifier.notify(Notice::new(
            NoticeKind::BadState,
            label,
            format!("{} returned state {}{}", label, envelope.state, detail),
        ));
        return None;
    }

    if envelope.is_empty_payload() {
        notifier.notify(Notice::new(
            NoticeKind::EmptyPayload,
            label,
            format!("{} returned no data", label),
        ));
    }

    match adapter.apply(&envelope.data) {
        Ok(data) => {
            tracing::debug!("Adapted {} with {} adapter", label, adapter.name());
            Some(data)
        }
        Err(e) => {
            notifier.notify(Notice::new(
                NoticeKind::MalformedPayload,
                label,
                format!("{} payload could not be adapted: {}", label, e),
            ));
            None
        }
    }
}
