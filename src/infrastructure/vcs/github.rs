//! GitHub API 연동 구현.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

use super::CommentProvider;
use crate::domain::notification::IssueComment;

pub struct GitHubClient {
    client: Client,
    host: String,
    owner: String,
    repo: String,
    number: u64,
    token: Option<String>,
    api_base: Option<String>,
}

impl GitHubClient {
    /// GitHub 대상 클라이언트를 생성한다.
    pub fn new(
        host: String,
        owner: String,
        repo: String,
        number: u64,
        token: Option<String>,
        api_base: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            host,
            owner,
            repo,
            number,
            token,
            api_base,
        }
    }

    fn api_base(&self) -> String {
        // github.com은 공개 API, 그 외는 Enterprise 기본 경로를 사용한다.
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        if self.host == "github.com" {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.host)
        }
    }

    fn issue_comments_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base(),
            self.owner,
            self.repo,
            self.number
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "prnotify")
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }
}

#[derive(Debug, Deserialize)]
struct IssueCommentResponse {
    id: u64,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<IssueCommentResponse> for IssueComment {
    fn from(c: IssueCommentResponse) -> Self {
        IssueComment {
            id: c.id.to_string(),
            body: c.body,
            created_at: c.created_at,
        }
    }
}

#[async_trait]
impl CommentProvider for GitHubClient {
    async fn list_comments(&self) -> Result<Vec<IssueComment>> {
        let resp = self
            .request(Method::GET, self.issue_comments_endpoint())
            .send()
            .await
            .context("github: failed to list comments")?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("github: failed to read comments body")?;

        if !status.is_success() {
            anyhow::bail!("github: failed to list comments ({status}): {body}");
        }

        let comments: Vec<IssueCommentResponse> =
            serde_json::from_str(&body).context("github: invalid comments JSON")?;

        Ok(comments.into_iter().map(IssueComment::from).collect())
    }

    async fn create_comment(&self, body: &str) -> Result<IssueComment> {
        let resp = self
            .request(Method::POST, self.issue_comments_endpoint())
            .json(&json!({ "body": body }))
            .send()
            .await
            .context("github: failed to create comment")?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("github: failed to read create-comment body")?;

        if !status.is_success() {
            anyhow::bail!("github: failed to create comment ({status}): {body}");
        }

        let comment: IssueCommentResponse =
            serde_json::from_str(&body).context("github: invalid create-comment JSON")?;
        Ok(comment.into())
    }
}
