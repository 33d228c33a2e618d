//! Remote AI assistant client.
//!
//! The assistant is an opaque remote collaborator: free text plus a candidate
//! list in, ranked property ids out; an issue description (and optionally a
//! photo) in, a structured analysis out.  Failures bubble up as
//! [`AssistantError`] and the UI maps every variant to one generic message.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sakan_shared::models::{IssueAnalysis, Property};

/// Errors from the assistant endpoint.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("assistant request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assistant returned {0}")]
    Status(reqwest::StatusCode),
}

/// One ranked search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedProperty {
    pub property_id: String,
    /// Short natural-language justification shown next to the listing.
    pub reason: String,
}

/// Candidate listing sent to the ranking endpoint.  Trimmed to the fields
/// the model needs; descriptions stay client-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankCandidate<'a> {
    id: &'a str,
    title: &'a str,
    district: &'a str,
    price: i64,
    rooms: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankRequest<'a> {
    query: &'a str,
    candidates: Vec<RankCandidate<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    description: &'a str,
    /// Base64-encoded photo of the issue, if the user attached one.
    #[serde(skip_serializing_if = "Option::is_none")]
    image_base64: Option<String>,
}

/// The assistant contract consumed by the search and maintenance flows.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Rank the candidate listings against a free-text query.
    async fn rank_properties(
        &self,
        query: &str,
        candidates: &[Property],
    ) -> Result<Vec<RankedProperty>, AssistantError>;

    /// Analyze a maintenance issue from a description and optional photo.
    async fn analyze_issue(
        &self,
        description: &str,
        image: Option<&[u8]>,
    ) -> Result<IssueAnalysis, AssistantError>;
}

/// HTTP implementation talking to the hosted assistant.
pub struct RemoteAssistant {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteAssistant {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Assistant for RemoteAssistant {
    async fn rank_properties(
        &self,
        query: &str,
        candidates: &[Property],
    ) -> Result<Vec<RankedProperty>, AssistantError> {
        let request = RankRequest {
            query,
            candidates: candidates
                .iter()
                .map(|p| RankCandidate {
                    id: &p.id,
                    title: &p.title,
                    district: &p.district,
                    price: p.price,
                    rooms: p.rooms,
                })
                .collect(),
        };

        let resp = self
            .client
            .post(self.endpoint("rank"))
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AssistantError::Status(resp.status()));
        }

        Ok(resp.json().await?)
    }

    async fn analyze_issue(
        &self,
        description: &str,
        image: Option<&[u8]>,
    ) -> Result<IssueAnalysis, AssistantError> {
        let request = AnalyzeRequest {
            description,
            image_base64: image.map(|bytes| BASE64.encode(bytes)),
        };

        let resp = self
            .client
            .post(self.endpoint("analyze"))
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AssistantError::Status(resp.status()));
        }

        Ok(resp.json().await?)
    }
}
