//! 코드호스트 코멘트 API 추상화 계층.

pub mod github;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::HostConfig;
use crate::domain::event::CommentTarget;
use crate::domain::notification::IssueComment;

#[async_trait]
pub trait CommentProvider: Send + Sync {
    /// PR 코멘트 이력 조회(오래된 것부터)
    async fn list_comments(&self) -> Result<Vec<IssueComment>>;
    /// 코멘트 생성
    async fn create_comment(&self, body: &str) -> Result<IssueComment>;
}

pub fn build_comment_client(
    target: &CommentTarget,
    host_cfg: Option<&HostConfig>,
    token: Option<String>,
) -> Box<dyn CommentProvider> {
    let api_base = host_cfg.and_then(|h| h.api_base.clone());

    Box::new(github::GitHubClient::new(
        target.host.clone(),
        target.owner.clone(),
        target.repo.clone(),
        target.number,
        token,
        api_base,
    ))
}
