// reqwest-backed transport for backend select calls
use crate::application::transport::{FetchError, OutboundRequest, Transport};
use crate::domain::envelope::Envelope;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_select(&self, request: &OutboundRequest) -> Result<Envelope, FetchError> {
        let mut builder = self.client.post(&request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!("POST {}", request.url);
        let response = builder.json(&request.body).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(request.timeout.as_millis())
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .json::<Envelope>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::envelope::{EnvelopeState, SelectRequest};
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use std::time::Duration;

    async fn select(Path(service): Path<String>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, String) {
        match service.as_str() {
            "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
            "garbled" => (StatusCode::OK, "<html>".to_string()),
            "slow" => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                (StatusCode::OK, json!({ "state": "SUCCESS", "data": [] }).to_string())
            }
            _ => {
                let ticket = headers
                    .get("bx-auth-ticket")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let envelope = json!({
                    "state": "SUCCESS",
                    "data": [{ "service": body["serviceName"], "ticket": ticket, "rows": body["page"]["rownumber"] }],
                    "page": { "total": 1, "pageNo": 1, "rownumber": 1 }
                });
                (StatusCode::OK, envelope.to_string())
            }
        }
    }

    async fn serve() -> String {
        let router = Router::new().route("/aud/select/:service", post(select));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request(base: &str, service: &str, timeout_ms: u64) -> OutboundRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("bx-auth-ticket".to_string(), "T-9".to_string());
        OutboundRequest {
            url: format!("{}/aud/select/{}", base, service),
            headers,
            body: SelectRequest::all_rows(service),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    #[tokio::test]
    async fn test_posts_select_body_with_headers() {
        let base = serve().await;
        let envelope = ReqwestTransport::new()
            .post_select(&request(&base, "srvaud_board_stats_select", 2000))
            .await
            .unwrap();

        assert_eq!(envelope.state, EnvelopeState::Success);
        assert_eq!(envelope.data[0]["service"], "srvaud_board_stats_select");
        assert_eq!(envelope.data[0]["ticket"], "T-9");
        assert_eq!(envelope.data[0]["rows"], 999);
        assert_eq!(envelope.page.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let base = serve().await;
        let err = ReqwestTransport::new()
            .post_select(&request(&base, "broken", 2000))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_decode_error() {
        let base = serve().await;
        let err = ReqwestTransport::new()
            .post_select(&request(&base, "garbled", 2000))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let base = serve().await;
        let err = ReqwestTransport::new()
            .post_select(&request(&base, "slow", 100))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout(100)));
    }
}
