// Data source gateway - mock/real branch, request, normalization, fallback
use crate::application::adapters::Adapter;
use crate::application::normalizer::normalize;
use crate::application::notifier::Notifier;
use crate::application::reactive::{pending_cell, PendingFlag, ReactiveCell};
use crate::application::request_resolver::RequestResolver;
use crate::application::transport::{FetchError, OutboundRequest, Transport};
use crate::domain::chart::ChartData;
use crate::domain::envelope::{Envelope, SelectRequest};
use crate::domain::notice::{Notice, NoticeKind};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// One logical chart: where its data comes from and what to show when the
/// backend cannot answer.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    pub chart: &'static str,
    pub service_name: &'static str,
    /// Full envelope in the same raw shape the backend returns.
    pub fallback: Envelope,
    pub adapter: Adapter,
}

impl ServiceDescriptor {
    pub fn new(chart: &'static str, service_name: &'static str, fallback: Envelope, adapter: Adapter) -> Self {
        Self {
            chart,
            service_name,
            fallback,
            adapter,
        }
    }
}

/// Read handles for one fetch attempt.
#[derive(Debug, Clone)]
pub struct DataSource {
    pub data: ReactiveCell<ChartData>,
    pub pending: PendingFlag,
}

#[derive(Clone)]
pub struct DataSourceGateway {
    transport: Arc<dyn Transport>,
    resolver: RequestResolver,
    notifier: Arc<dyn Notifier>,
    use_mock: bool,
}

impl DataSourceGateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        resolver: RequestResolver,
        notifier: Arc<dyn Notifier>,
        use_mock: bool,
    ) -> Self {
        Self {
            transport,
            resolver,
            notifier,
            use_mock,
        }
    }

    /// Start one fetch attempt. Always resolves: to adapted live data, to
    /// adapted fallback data, or to `None` if even the fallback is unusable.
    ///
    /// In mock mode the cell is written before this returns. Otherwise the
    /// request runs on its own task, so it must be called inside a tokio
    /// runtime.
    pub fn fetch(&self, descriptor: &ServiceDescriptor) -> DataSource {
        let (writer, data, pending) = pending_cell();

        if self.use_mock {
            tracing::debug!("Mock mode: resolving {} from fallback data", descriptor.service_name);
            writer.resolve(self.resolve_fallback(descriptor));
        } else {
            let gateway = self.clone();
            let descriptor = descriptor.clone();
            tokio::spawn(async move {
                let value = gateway.load(&descriptor).await;
                writer.resolve(value);
            });
        }

        DataSource { data, pending }
    }

    async fn load(&self, descriptor: &ServiceDescriptor) -> Option<ChartData> {
        let request = self.build_request(descriptor.service_name);
        let started = Instant::now();

        match self.send(&request).await {
            Ok(envelope) => {
                tracing::debug!(
                    "{} answered {} in {} ms",
                    descriptor.service_name,
                    envelope.state,
                    started.elapsed().as_millis()
                );
                let adapted = normalize(
                    &envelope,
                    &descriptor.adapter,
                    descriptor.service_name,
                    self.notifier.as_ref(),
                );
                if adapted.is_some() {
                    return adapted;
                }
                // Already reported by the normalizer.
                tracing::warn!("Substituting fallback data for {}", descriptor.service_name);
            }
            Err(e) => {
                self.notifier.notify(Notice::new(
                    NoticeKind::NetworkFailure,
                    descriptor.service_name,
                    format!("{} request failed: {}", descriptor.service_name, e),
                ));
            }
        }

        self.resolve_fallback(descriptor)
    }

    /// Fallback goes through the same pipeline as a live response, so mock
    /// mode and real-mode fallback produce identical data.
    fn resolve_fallback(&self, descriptor: &ServiceDescriptor) -> Option<ChartData> {
        normalize(
            &descriptor.fallback,
            &descriptor.adapter,
            descriptor.service_name,
            self.notifier.as_ref(),
        )
    }

    async fn send(&self, request: &OutboundRequest) -> Result<Envelope, FetchError> {
        match tokio::time::timeout(request.timeout, self.transport.post_select(request)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(request.timeout.as_millis())),
        }
    }

    /// Resolves URL, timeout and auth afresh on every call.
    pub fn build_request(&self, service_name: &str) -> OutboundRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.extend(self.resolver.resolve_auth_headers());

        OutboundRequest {
            url: format!(
                "{}/aud/select/{}",
                self.resolver.resolve_base_url(),
                urlencoding::encode(service_name)
            ),
            headers,
            body: SelectRequest::all_rows(service_name),
            timeout: self.resolver.resolve_timeout(),
        }
    }
}
