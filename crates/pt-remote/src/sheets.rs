//! HTTP client for the spreadsheet web-app endpoint

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use pt_core::config::RemoteConfig;
use pt_core::error::{PtError, PtResult};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{parse_endpoint, PushOutcome, RemoteStore, Resource, WriteAction};

/// Talks to the spreadsheet endpoint over HTTP
pub struct SheetsClient {
    http: reqwest::Client,
    endpoint: RwLock<Option<Url>>,
}

impl SheetsClient {
    pub fn new(config: &RemoteConfig) -> PtResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder
            .build()
            .map_err(|e| PtError::Config(format!("HTTP client error: {e}")))?;

        let endpoint = match config.endpoint_url.as_deref() {
            Some(raw) => parse_endpoint(raw)?,
            None => None,
        };

        Ok(Self {
            http,
            endpoint: RwLock::new(endpoint),
        })
    }

    fn endpoint(&self) -> Option<Url> {
        self.endpoint.read().clone()
    }
}

/// `{endpoint}?action={resource}&_t={millis}`
fn read_url(endpoint: &Url, resource: Resource, cache_bust: i64) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("action", resource.action())
        .append_pair("_t", &cache_bust.to_string());
    url
}

#[async_trait]
impl RemoteStore for SheetsClient {
    fn is_enabled(&self) -> bool {
        self.endpoint.read().is_some()
    }

    fn active_url(&self) -> Option<String> {
        self.endpoint.read().as_ref().map(Url::to_string)
    }

    fn set_endpoint(&self, url: Option<String>) -> PtResult<()> {
        let parsed = match url.as_deref() {
            Some(raw) => parse_endpoint(raw)?,
            None => None,
        };
        debug!(enabled = parsed.is_some(), "Remote endpoint updated");
        *self.endpoint.write() = parsed;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch(&self, resource: Resource) -> Option<Value> {
        let endpoint = self.endpoint()?;
        let url = read_url(&endpoint, resource, Utc::now().timestamp_millis());

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Remote fetch failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Remote fetch returned an error status");
            return None;
        }

        match response.json::<Value>().await {
            Ok(Value::Null) => None,
            Ok(body) => Some(body),
            Err(e) => {
                warn!(error = %e, "Remote response was not valid JSON");
                None
            }
        }
    }

    #[instrument(skip(self, data))]
    async fn push(&self, action: WriteAction, data: Value) -> PushOutcome {
        let Some(endpoint) = self.endpoint() else {
            return PushOutcome::Disabled;
        };

        let body = json!({
            "action": action.action(),
            "data": data,
            "timestamp": Utc::now().to_rfc3339(),
        });

        match self.http.post(endpoint).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(status = response.status().as_u16(), "Remote write delivered");
                PushOutcome::Delivered {
                    status: response.status().as_u16(),
                }
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "Remote write rejected");
                PushOutcome::Rejected {
                    status: response.status().as_u16(),
                }
            }
            Err(e) => {
                warn!(error = %e, "Remote write failed");
                PushOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: Option<&str>) -> RemoteConfig {
        RemoteConfig {
            endpoint_url: url.map(str::to_string),
            request_timeout_seconds: Some(2),
        }
    }

    #[test]
    fn test_read_url_appends_action_and_cache_bust() {
        let endpoint = Url::parse("https://script.google.com/macros/s/abc/exec").unwrap();
        let url = read_url(&endpoint, Resource::OffDays, 1_700_000_000_000);
        assert_eq!(
            url.as_str(),
            "https://script.google.com/macros/s/abc/exec?action=getOffDays&_t=1700000000000"
        );
    }

    #[test]
    fn test_invalid_configured_url_rejected() {
        assert!(SheetsClient::new(&config(Some("mailto:ops@example.com"))).is_err());
    }

    #[test]
    fn test_set_endpoint() {
        let client = SheetsClient::new(&config(None)).unwrap();
        assert!(!client.is_enabled());

        client
            .set_endpoint(Some("https://example.com/exec".into()))
            .unwrap();
        assert!(client.is_enabled());
        assert_eq!(client.active_url().as_deref(), Some("https://example.com/exec"));

        assert!(client.set_endpoint(Some("ftp://example.com".into())).is_err());
        assert!(client.is_enabled());

        client.set_endpoint(None).unwrap();
        assert!(!client.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_client_does_nothing() {
        let client = SheetsClient::new(&config(None)).unwrap();
        assert!(client.fetch(Resource::Production).await.is_none());
        assert_eq!(
            client.push(WriteAction::SaveProduction, json!([])).await,
            PushOutcome::Disabled
        );
    }

    #[test]
    fn test_blank_configured_url_disables_client() {
        let client = SheetsClient::new(&config(Some("  "))).unwrap();
        assert!(!client.is_enabled());
        assert_eq!(client.active_url(), None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_not_an_error() {
        let client = SheetsClient::new(&config(Some("http://127.0.0.1:9/exec"))).unwrap();
        assert!(client.fetch(Resource::Production).await.is_none());
        assert!(matches!(
            client.push(WriteAction::SaveProduction, json!([])).await,
            PushOutcome::Failed { .. }
        ));
    }

    mod wire {
        use std::collections::HashMap;
        use std::sync::Arc;

        use axum::extract::{Query, State};
        use axum::http::StatusCode;
        use axum::routing::get;
        use axum::{Json, Router};
        use parking_lot::Mutex;
        use tokio::net::TcpListener;

        use super::*;

        #[derive(Default)]
        struct Recorded {
            queries: Vec<HashMap<String, String>>,
            bodies: Vec<Value>,
        }

        #[derive(Clone)]
        struct FakeSheet {
            recorded: Arc<Mutex<Recorded>>,
            status: StatusCode,
            reply: Value,
        }

        async fn read(
            State(sheet): State<FakeSheet>,
            Query(query): Query<HashMap<String, String>>,
        ) -> (StatusCode, Json<Value>) {
            sheet.recorded.lock().queries.push(query);
            (sheet.status, Json(sheet.reply.clone()))
        }

        async fn write(
            State(sheet): State<FakeSheet>,
            Json(body): Json<Value>,
        ) -> (StatusCode, Json<Value>) {
            sheet.recorded.lock().bodies.push(body);
            (sheet.status, Json(json!({ "status": "ok" })))
        }

        /// Serves a fake sheet script on an ephemeral port and returns its
        /// `/exec` URL along with everything it receives.
        async fn serve(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Recorded>>) {
            let recorded = Arc::new(Mutex::new(Recorded::default()));
            let sheet = FakeSheet {
                recorded: recorded.clone(),
                status,
                reply,
            };
            let app = Router::new()
                .route("/exec", get(read).post(write))
                .with_state(sheet);
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            (format!("http://{addr}/exec"), recorded)
        }

        #[tokio::test]
        async fn test_fetch_sends_action_and_cache_bust() {
            let rows = json!([{ "date": "2024-05-01", "reason": "Holiday" }]);
            let (url, recorded) = serve(StatusCode::OK, rows.clone()).await;
            let client = SheetsClient::new(&config(Some(&url))).unwrap();

            assert_eq!(client.fetch(Resource::OffDays).await, Some(rows));

            let recorded = recorded.lock();
            assert_eq!(recorded.queries.len(), 1);
            let query = &recorded.queries[0];
            assert_eq!(query.get("action").map(String::as_str), Some("getOffDays"));
            let stamp = query.get("_t").expect("cache-bust parameter");
            assert!(stamp.parse::<i64>().is_ok(), "_t = {stamp}");
        }

        #[tokio::test]
        async fn test_push_posts_action_data_and_timestamp() {
            let (url, recorded) = serve(StatusCode::OK, Value::Null).await;
            let client = SheetsClient::new(&config(Some(&url))).unwrap();
            let data = json!([{ "id": "1", "username": "admin" }]);

            let outcome = client.push(WriteAction::SaveUsers, data.clone()).await;
            assert_eq!(outcome, PushOutcome::Delivered { status: 200 });

            let recorded = recorded.lock();
            assert_eq!(recorded.bodies.len(), 1);
            let body = recorded.bodies[0].as_object().unwrap();
            let mut keys: Vec<&str> = body.keys().map(String::as_str).collect();
            keys.sort_unstable();
            assert_eq!(keys, ["action", "data", "timestamp"]);
            assert_eq!(body["action"], "saveUsers");
            assert_eq!(body["data"], data);
            let timestamp = body["timestamp"].as_str().unwrap();
            assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        }

        #[tokio::test]
        async fn test_server_error_is_rejected_and_unreadable() {
            let (url, recorded) =
                serve(StatusCode::INTERNAL_SERVER_ERROR, json!([{ "id": "1" }])).await;
            let client = SheetsClient::new(&config(Some(&url))).unwrap();

            assert_eq!(client.fetch(Resource::Production).await, None);
            assert_eq!(
                client.push(WriteAction::SaveProduction, json!([])).await,
                PushOutcome::Rejected { status: 500 }
            );

            let recorded = recorded.lock();
            assert_eq!(recorded.queries.len(), 1);
            assert_eq!(recorded.bodies.len(), 1);
            assert_eq!(recorded.bodies[0]["action"], "saveProduction");
        }

        #[tokio::test]
        async fn test_null_body_reads_as_absent() {
            let (url, _recorded) = serve(StatusCode::OK, Value::Null).await;
            let client = SheetsClient::new(&config(Some(&url))).unwrap();
            assert_eq!(client.fetch(Resource::Users).await, None);
        }
    }
}
