//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{Config, HostConfig};
use crate::domain::event::{CommentTarget, PullRequestSnapshot, ReviewRequestEvent};
use crate::domain::notification::{Block, IssueComment, ReviewerDiff};
use crate::domain::roster::ReviewerRoster;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 리뷰어 로스터 파일을 읽는 포트.
pub trait RosterRepository: Send + Sync {
    fn load(&self, path: &Path) -> Result<ReviewerRoster>;
}

/// 전송 계층이 넘겨준 이벤트 페이로드를 읽는 포트.
pub trait EventReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<ReviewRequestEvent>;
}

/// 코드호스트 코멘트 API 추상화 포트.
#[async_trait]
pub trait CommentGateway: Send + Sync {
    /// PR 코멘트 이력 조회(오래된 것부터)
    async fn list_comments(&self) -> Result<Vec<IssueComment>>;
    /// 코멘트 생성
    async fn create_comment(&self, body: &str) -> Result<IssueComment>;
}

/// 채팅(슬랙) 메시지 API 추상화 포트.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// 알림 메시지 게시, 메시지 ts 반환
    async fn send_message(&self, blocks: &[Block], fallback_text: &str) -> Result<String>;
    /// 기존 메시지 블록 조회. 메시지가 없거나 해석 불가면 None
    async fn fetch_message(&self, message_ts: &str) -> Result<Option<Vec<Block>>>;
    /// 기존 메시지 블록 교체
    async fn update_message(&self, message_ts: &str, blocks: &[Block]) -> Result<()>;
}

/// 대상/호스트 설정에 맞는 코멘트 게이트웨이를 생성하는 팩토리 포트.
pub trait VcsFactory: Send + Sync {
    fn build(
        &self,
        target: &CommentTarget,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
    ) -> Box<dyn CommentGateway>;
}

/// 슬랙 설정으로 채팅 게이트웨이를 생성하는 팩토리 포트.
pub trait ChatFactory: Send + Sync {
    fn build(
        &self,
        channel: &str,
        token: Option<String>,
        api_base: Option<String>,
    ) -> Box<dyn ChatGateway>;
}

/// 알림 본문 조립 포트.
pub trait NotificationComposer: Send + Sync {
    /// 생성 시점의 전체 알림 본문을 조립한다.
    fn build_create_body(
        &self,
        snapshot: &PullRequestSnapshot,
        repo_name: &str,
        mentions: &[String],
        requester: &str,
        emergency_label: &str,
    ) -> Vec<Block>;

    /// 알림 미수신 클라이언트용 대체 텍스트.
    fn fallback_text(&self, snapshot: &PullRequestSnapshot, mentions: &[String]) -> String;

    /// 멘션 블록만 diff 내용으로 교체한다. 블록이 없으면 None(패치 대상 없음).
    fn patch_mention_block(
        &self,
        blocks: Vec<Block>,
        diff: &ReviewerDiff,
        requester: &str,
    ) -> Option<Vec<Block>>;

    /// 링크 코멘트 본문(사람용 딥링크 + 머신용 마커).
    fn build_link_comment(&self, workspace: &str, channel: &str, message_ts: &str) -> String;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
