use crate::reading_time;
use crate::sources::properties::{PageProperties, RemotePage, STATUS_PUBLISHED, STATUS_SCHEDULED};
use crate::traits::ContentSource;
use crate::types::{ContentRecord, PipelineError, RemoteConfig, Result, SourceKind};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<RemotePage>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarkdownResponse {
    #[serde(default)]
    markdown: String,
}

/// Thin client for the remote content API: paginated collection queries,
/// the page-to-markdown endpoint, and the promote call. Rate-limit
/// responses retry with exponential backoff; anything else propagates.
struct RemoteClient {
    http: Client,
    config: RemoteConfig,
}

impl RemoteClient {
    fn new(config: RemoteConfig) -> Self {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("failed to create HTTP client");

        Self { http, config }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        Ok(Url::parse(&raw)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request, retrying HTTP 429 up to `max_retries` attempts with
    /// base-delay-times-2^attempt backoff. Other non-success statuses fail
    /// immediately.
    async fn send_with_retry<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let base_delay = Duration::from_millis(self.config.retry_base_delay_ms);
        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: base_delay,
            initial_interval: base_delay,
            max_interval: base_delay * 32,
            multiplier: 2.0,
            randomization_factor: 0.0,
            max_elapsed_time: None,
            ..Default::default()
        };

        for attempt in 0..self.config.max_retries {
            let response = build().send().await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                if attempt + 1 < self.config.max_retries {
                    if let Some(delay) = backoff.next_backoff() {
                        warn!(
                            "rate limited by remote API, retrying in {:?} (attempt {})",
                            delay,
                            attempt + 1
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                }
                return Err(PipelineError::RateLimited {
                    attempts: self.config.max_retries,
                });
            }

            if !response.status().is_success() {
                return Err(PipelineError::RemoteStatus {
                    status: response.status().as_u16(),
                });
            }

            return Ok(response);
        }

        Err(PipelineError::RateLimited {
            attempts: self.config.max_retries,
        })
    }

    /// One page of the collection query. The filter excludes shelved pages
    /// and keeps published or scheduled ones, newest first.
    async fn query(&self, cursor: Option<&str>) -> Result<QueryResponse> {
        let collection = self.config.collection_id.as_deref().unwrap_or_default();
        let url = self.endpoint(&format!("collections/{}/query", collection))?;

        let mut body = json!({
            "filter": {
                "and": [
                    { "property": "Shelved", "checkbox": { "equals": false } },
                    { "or": [
                        { "property": "Status", "select": { "equals": STATUS_PUBLISHED } },
                        { "property": "Status", "select": { "equals": STATUS_SCHEDULED } },
                    ]},
                ],
            },
            "sorts": [{ "property": "Publication Date", "direction": "descending" }],
        });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }

        let response = self
            .send_with_retry(|| self.authorize(self.http.post(url.clone())).json(&body))
            .await?;
        Ok(response.json().await?)
    }

    /// The page-to-markdown interface: flattens a page's native block
    /// format into one markdown string.
    async fn page_markdown(&self, page_id: Uuid) -> Result<String> {
        let url = self.endpoint(&format!("pages/{}/markdown", page_id))?;
        let response = self
            .send_with_retry(|| self.authorize(self.http.get(url.clone())))
            .await?;
        let body: MarkdownResponse = response.json().await?;
        Ok(body.markdown)
    }

    /// Marks a scheduled page published as of `now`. Absolute values only,
    /// so concurrent builds racing on the same page converge.
    async fn promote_page(&self, page_id: Uuid, now: DateTime<Utc>) -> Result<()> {
        let url = self.endpoint(&format!("pages/{}", page_id))?;
        let body = json!({
            "properties": {
                "Status": { "select": { "name": STATUS_PUBLISHED } },
                "Publication Date": { "date": { "start": now.to_rfc3339() } },
            },
        });

        self.send_with_retry(|| self.authorize(self.http.patch(url.clone())).json(&body))
            .await?;
        Ok(())
    }
}

/// Supplementary content from the remote API, normalized into the shared
/// record shape.
pub struct RemoteSource {
    client: RemoteClient,
}

impl RemoteSource {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: RemoteClient::new(config),
        }
    }

    fn is_configured(&self) -> bool {
        let config = &self.client.config;
        !config.base_url.is_empty() && config.api_token.is_some() && config.collection_id.is_some()
    }

    async fn fetch_records(&self) -> Result<Vec<ContentRecord>> {
        // Each page's continuation cursor depends on the previous response,
        // so pagination is sequential.
        let mut pages: Vec<RemotePage> = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let response = self.client.query(cursor.as_deref()).await?;
            pages.extend(response.results);
            cursor = if response.has_more {
                response.next_cursor
            } else {
                None
            };
            if cursor.is_none() {
                break;
            }
        }
        debug!("fetched {} pages from remote collection", pages.len());

        let now = Utc::now();
        let mut records = Vec::new();
        for page in &pages {
            let Some(mut props) = PageProperties::extract(page) else {
                debug!("skipping page {} without title or slug", page.id);
                continue;
            };
            if props.shelved {
                debug!("skipping shelved page {}", props.slug);
                continue;
            }

            if props.status == STATUS_SCHEDULED {
                if is_scheduled_due(props.scheduled_date.as_deref(), now) {
                    self.client.promote_page(page.id, now).await?;
                    props.status = STATUS_PUBLISHED.to_string();
                    props.publication_date = Some(now.to_rfc3339());
                    info!("promoted scheduled page {} ({})", props.slug, page.id);
                } else {
                    debug!("skipping scheduled page {} (not due yet)", props.slug);
                    continue;
                }
            }

            if props.status != STATUS_PUBLISHED || props.publication_date.is_none() {
                continue;
            }

            let markdown = self.client.page_markdown(page.id).await?;
            records.push(build_record(props, markdown));
        }

        Ok(records)
    }
}

#[async_trait]
impl ContentSource for RemoteSource {
    fn source_name(&self) -> &'static str {
        "remote"
    }

    /// Never fails: any unrecoverable remote error degrades to an empty
    /// list so the build proceeds with local content only.
    ///
    /// Side effect: scheduled pages whose instant has passed are promoted
    /// to published on the remote side as part of this read.
    async fn load(&self) -> Result<Vec<ContentRecord>> {
        if !self.is_configured() {
            info!("remote content API not configured, skipping");
            return Ok(Vec::new());
        }

        match self.fetch_records().await {
            Ok(records) => {
                info!("loaded {} records from remote content API", records.len());
                Ok(records)
            }
            Err(e) => {
                warn!("remote fetch failed, falling back to local-only content: {}", e);
                Ok(Vec::new())
            }
        }
    }
}

/// True when a scheduled instant has passed and the page should be
/// promoted. Missing or unparseable instants are never due.
pub fn is_scheduled_due(scheduled_date: Option<&str>, now: DateTime<Utc>) -> bool {
    match scheduled_date.and_then(crate::types::parse_date) {
        Some(instant) => instant <= now,
        None => false,
    }
}

/// Normalizes an accepted remote page into the shared record shape.
pub fn build_record(props: PageProperties, markdown: String) -> ContentRecord {
    ContentRecord {
        reading_time: reading_time::estimate(Some(&markdown)),
        slug: props.slug,
        title: props.title,
        date: props.publication_date.unwrap_or_default(),
        description: props.description,
        tags: props.tags,
        body_raw: markdown,
        source: SourceKind::Remote,
    }
}
