use crate::api::models::{ErrorPayload, InsertPolygon};
use crate::api::transport::Transport;
use crate::domain::{parse_features, Feature, SearchFilters};
use crate::error::{EditorError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: Url,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let invalid = |reason: String| EditorError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        match base.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme {other}"))),
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base,
            client: builder.build()?,
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| EditorError::InvalidUrl {
                url: format!("{}{path}", self.base),
                reason: e.to_string(),
            })
    }
}

async fn body_of(response: Response) -> Result<(StatusCode, Vec<u8>)> {
    let status = response.status();
    let body = response.bytes().await?.to_vec();
    Ok((status, body))
}

fn status_error(status: StatusCode, body: &[u8]) -> EditorError {
    let message = serde_json::from_slice::<ErrorPayload>(body).map_or_else(
        |_| String::from_utf8_lossy(body).trim().to_string(),
        |payload| payload.describe(),
    );
    warn!(status = status.as_u16(), %message, "backend rejected request");
    EditorError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn find(&self, filters: &SearchFilters) -> Result<Vec<Feature>> {
        let url = self.endpoint("poly/find")?;
        debug!(%url, ?filters, "searching records");

        let response = self.client.post(url).json(filters).send().await?;
        let (status, body) = body_of(response).await?;
        if status != StatusCode::OK {
            return Err(status_error(status, &body));
        }

        parse_features(&body)
    }

    async fn find_by_id(&self, id: i64) -> Result<Vec<Feature>> {
        let url = self.endpoint(&format!("poly/find/{id}"))?;
        debug!(%url, "fetching record");

        let response = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let (status, body) = body_of(response).await?;
        match status {
            StatusCode::OK => {}
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => {
                return Err(EditorError::RecordNotFound(id))
            }
            _ => return Err(status_error(status, &body)),
        }

        let features = parse_features(&body)?;
        if features.is_empty() {
            return Err(EditorError::RecordNotFound(id));
        }
        Ok(features)
    }

    async fn insert_polygon(&self, request: &InsertPolygon) -> Result<Value> {
        let url = self.endpoint("insert/poly")?;
        debug!(%url, id = request.id, "submitting polygon");

        let response = self.client.post(url).json(request).send().await?;
        let (status, body) = body_of(response).await?;
        if status != StatusCode::OK {
            return Err(status_error(status, &body));
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
