//! 채팅(슬랙) 메시지 API 추상화 계층.

pub mod slack;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::notification::Block;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// 알림 메시지 게시, 메시지 ts 반환
    async fn send_message(&self, blocks: &[Block], fallback_text: &str) -> Result<String>;
    /// 기존 메시지 블록 조회. 메시지가 없거나 해석 불가면 None
    async fn fetch_message(&self, message_ts: &str) -> Result<Option<Vec<Block>>>;
    /// 기존 메시지 블록 교체
    async fn update_message(&self, message_ts: &str, blocks: &[Block]) -> Result<()>;
}

pub fn build_chat_client(
    channel: &str,
    token: Option<String>,
    api_base: Option<String>,
) -> Box<dyn ChatProvider> {
    Box::new(slack::SlackClient::new(
        channel.to_string(),
        token.unwrap_or_default(),
        api_base,
    ))
}
