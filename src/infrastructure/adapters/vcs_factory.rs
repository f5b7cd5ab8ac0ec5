//! 코멘트 게이트웨이 포트 구현 어댑터.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::HostConfig;
use crate::application::ports::{CommentGateway, VcsFactory};
use crate::domain::event::CommentTarget;
use crate::domain::notification::IssueComment;
use crate::infrastructure::vcs;

/// 코멘트 게이트웨이 팩토리 어댑터.
pub struct VcsFactoryAdapter;

impl VcsFactory for VcsFactoryAdapter {
    fn build(
        &self,
        target: &CommentTarget,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
    ) -> Box<dyn CommentGateway> {
        Box::new(CommentGatewayAdapter {
            inner: vcs::build_comment_client(target, host_cfg, token),
        })
    }
}

/// 인프라 CommentProvider를 애플리케이션 포트로 감싸는 래퍼.
struct CommentGatewayAdapter {
    inner: Box<dyn vcs::CommentProvider>,
}

#[async_trait]
impl CommentGateway for CommentGatewayAdapter {
    async fn list_comments(&self) -> Result<Vec<IssueComment>> {
        self.inner.list_comments().await
    }

    async fn create_comment(&self, body: &str) -> Result<IssueComment> {
        self.inner.create_comment(body).await
    }
}
