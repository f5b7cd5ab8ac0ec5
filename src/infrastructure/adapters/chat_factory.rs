//! 채팅 게이트웨이 포트 구현 어댑터.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::{ChatFactory, ChatGateway};
use crate::domain::notification::Block;
use crate::infrastructure::chat;

/// 채팅 게이트웨이 팩토리 어댑터.
pub struct ChatFactoryAdapter;

impl ChatFactory for ChatFactoryAdapter {
    fn build(
        &self,
        channel: &str,
        token: Option<String>,
        api_base: Option<String>,
    ) -> Box<dyn ChatGateway> {
        Box::new(ChatGatewayAdapter {
            inner: chat::build_chat_client(channel, token, api_base),
        })
    }
}

/// 인프라 ChatProvider를 애플리케이션 포트로 감싸는 래퍼.
struct ChatGatewayAdapter {
    inner: Box<dyn chat::ChatProvider>,
}

#[async_trait]
impl ChatGateway for ChatGatewayAdapter {
    async fn send_message(&self, blocks: &[Block], fallback_text: &str) -> Result<String> {
        self.inner.send_message(blocks, fallback_text).await
    }

    async fn fetch_message(&self, message_ts: &str) -> Result<Option<Vec<Block>>> {
        self.inner.fetch_message(message_ts).await
    }

    async fn update_message(&self, message_ts: &str, blocks: &[Block]) -> Result<()> {
        self.inner.update_message(message_ts, blocks).await
    }
}
