use std::time::Duration;

use anyhow::{bail, Result};

use callsheet_api::*;

/// Typed HTTP client for the Callsheet API.
///
/// One method per endpoint; non-2xx responses become errors carrying the
/// status and body text.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given base URL and timeout.
    ///
    /// The timeout applies to regular requests only; the SSE stream is opened
    /// without one.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    // ── Health ────────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthResponse> {
        let resp = self.client.get(self.url("/health")).send().await?;
        parse_response(resp).await
    }

    // ── Chat ──────────────────────────────────────────────────────────────

    pub async fn chat_history(&self) -> Result<ChatHistoryResponse> {
        let resp = self.client.get(self.url("/chat/messages")).send().await?;
        parse_response(resp).await
    }

    pub async fn send_message(&self, req: &SendMessageRequest) -> Result<SendMessageResponse> {
        let resp = self
            .client
            .post(self.url("/chat/send"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// Open the realtime stream. The returned response body is a long-lived
    /// SSE stream; read it chunk by chunk through [`crate::sse::SseParser`].
    pub async fn open_chat_stream(&self) -> Result<reqwest::Response> {
        let resp = self
            .client
            .get(self.url("/chat/stream"))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .timeout(Duration::from_secs(u64::MAX))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("{status}: {body}");
        }
        Ok(resp)
    }

    // ── Schedule ──────────────────────────────────────────────────────────

    pub async fn schedule(&self) -> Result<ScheduleResponse> {
        let resp = self.client.get(self.url("/schedule")).send().await?;
        parse_response(resp).await
    }

    pub async fn schedule_bucket(&self, bucket: &str) -> Result<ScheduleBucketResponse> {
        let resp = self
            .client
            .get(self.url("/schedule"))
            .query(&[("bucket", bucket)])
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn schedule_create(&self, req: &ScheduleItemCreateRequest) -> Result<ScheduledItem> {
        let resp = self
            .client
            .post(self.url("/schedule"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn schedule_delete(&self, id: &str) -> Result<OkResponse> {
        let resp = self
            .client
            .delete(self.url(&format!("/schedule/{id}")))
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Crew ──────────────────────────────────────────────────────────────

    pub async fn crew_list(&self, status: Option<&str>) -> Result<CrewListResponse> {
        let mut req = self.client.get(self.url("/crew"));
        if let Some(status) = status {
            req = req.query(&[("status", status)]);
        }
        let resp = req.send().await?;
        parse_response(resp).await
    }

    pub async fn crew_create(&self, req: &CrewCreateRequest) -> Result<CrewMember> {
        let resp = self.client.post(self.url("/crew")).json(req).send().await?;
        parse_response(resp).await
    }

    pub async fn crew_update(&self, id: &str, req: &CrewUpdateRequest) -> Result<CrewMember> {
        let resp = self
            .client
            .put(self.url(&format!("/crew/{id}")))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn crew_delete(&self, id: &str) -> Result<OkResponse> {
        let resp = self
            .client
            .delete(self.url(&format!("/crew/{id}")))
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Scripts ───────────────────────────────────────────────────────────

    pub async fn scripts_list(&self, search: Option<&str>) -> Result<ScriptListResponse> {
        let mut req = self.client.get(self.url("/scripts"));
        if let Some(search) = search {
            req = req.query(&[("search", search)]);
        }
        let resp = req.send().await?;
        parse_response(resp).await
    }

    pub async fn script_create(&self, req: &ScriptCreateRequest) -> Result<Script> {
        let resp = self
            .client
            .post(self.url("/scripts"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn script_update(&self, id: &str, req: &ScriptUpdateRequest) -> Result<Script> {
        let resp = self
            .client
            .put(self.url(&format!("/scripts/{id}")))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn script_delete(&self, id: &str) -> Result<OkResponse> {
        let resp = self
            .client
            .delete(self.url(&format!("/scripts/{id}")))
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Scene visualization ───────────────────────────────────────────────

    pub async fn visualize(&self, req: &VisualizeRequest) -> Result<VisualizeResponse> {
        let resp = self
            .client
            .post(self.url("/scenes/visualize"))
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn renders(&self) -> Result<RenderListResponse> {
        let resp = self.client.get(self.url("/scenes/renders")).send().await?;
        parse_response(resp).await
    }

    // ── Dashboard ─────────────────────────────────────────────────────────

    pub async fn stats(&self) -> Result<StatsResponse> {
        let resp = self.client.get(self.url("/stats")).send().await?;
        parse_response(resp).await
    }
}

/// Parse an HTTP response: return the deserialized body on 2xx,
/// or an error containing the status and body text.
async fn parse_response<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("{status}: {body}");
    }
    Ok(resp.json().await?)
}
