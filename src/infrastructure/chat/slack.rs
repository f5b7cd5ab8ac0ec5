//! Slack Web API 연동 구현.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

use super::ChatProvider;
use crate::domain::notification::Block;

const DEFAULT_API_BASE: &str = "https://slack.com/api";

pub struct SlackClient {
    client: Client,
    channel: String,
    token: String,
    api_base: Option<String>,
}

impl SlackClient {
    /// 채널 고정 슬랙 클라이언트를 생성한다.
    pub fn new(channel: String, token: String, api_base: Option<String>) -> Self {
        Self {
            client: Client::new(),
            channel,
            token,
            api_base,
        }
    }

    fn endpoint(&self, method: &str) -> String {
        let base = self
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        format!("{base}/{method}")
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("User-Agent", "prnotify").bearer_auth(&self.token)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        req: RequestBuilder,
    ) -> Result<T> {
        let resp = self
            .authorized(req)
            .send()
            .await
            .with_context(|| format!("slack: failed to call {method}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("slack: failed to read {method} response"))?;

        if !status.is_success() {
            anyhow::bail!("slack: {method} failed ({status}): {body}");
        }

        serde_json::from_str(&body).with_context(|| format!("slack: invalid {method} JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    ts: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    messages: Vec<HistoryMessage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryMessage {
    ts: String,
    blocks: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {
    ok: bool,
    error: Option<String>,
}

#[async_trait]
impl ChatProvider for SlackClient {
    async fn send_message(&self, blocks: &[Block], fallback_text: &str) -> Result<String> {
        let payload = json!({
            "channel": self.channel,
            "text": fallback_text,
            "blocks": blocks,
        });
        let response: PostMessageResponse = self
            .call(
                "chat.postMessage",
                self.client.post(self.endpoint("chat.postMessage")).json(&payload),
            )
            .await?;

        if !response.ok {
            anyhow::bail!(
                "slack: chat.postMessage rejected: {}",
                response.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        response
            .ts
            .context("slack: chat.postMessage response is missing ts")
    }

    async fn fetch_message(&self, message_ts: &str) -> Result<Option<Vec<Block>>> {
        let response: HistoryResponse = self
            .call(
                "conversations.history",
                self.client
                    .get(self.endpoint("conversations.history"))
                    .query(&[
                        ("channel", self.channel.as_str()),
                        ("latest", message_ts),
                        ("inclusive", "true"),
                        ("limit", "1"),
                    ]),
            )
            .await?;

        if !response.ok {
            anyhow::bail!(
                "slack: conversations.history rejected: {}",
                response.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        // latest/inclusive 조회는 ts 이전 메시지를 돌려줄 수 있다. ts가 정확히 일치할 때만 유효.
        let Some(message) = response.messages.into_iter().find(|m| m.ts == message_ts) else {
            return Ok(None);
        };
        let Some(raw_blocks) = message.blocks else {
            return Ok(None);
        };

        match serde_json::from_value::<Vec<Block>>(raw_blocks) {
            Ok(blocks) => Ok(Some(blocks)),
            Err(err) => {
                // 외부에서 편집됐거나 모델 밖의 블록이 섞인 메시지는 패치 대상이 아니다.
                tracing::warn!(%message_ts, %err, "failed to parse message blocks");
                Ok(None)
            }
        }
    }

    async fn update_message(&self, message_ts: &str, blocks: &[Block]) -> Result<()> {
        let payload = json!({
            "channel": self.channel,
            "ts": message_ts,
            "blocks": blocks,
        });
        let response: UpdateResponse = self
            .call(
                "chat.update",
                self.client.post(self.endpoint("chat.update")).json(&payload),
            )
            .await?;

        if !response.ok {
            anyhow::bail!(
                "slack: chat.update rejected: {}",
                response.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> SlackClient {
        SlackClient::new(
            "C123".to_string(),
            "xoxb-test".to_string(),
            Some(server.base_url()),
        )
    }

    #[tokio::test]
    async fn send_message_returns_the_posted_ts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat.postMessage")
                    .header("authorization", "Bearer xoxb-test")
                    .json_body_partial(r#"{ "channel": "C123", "text": "fallback" }"#);
                then.status(200)
                    .json_body(serde_json::json!({ "ok": true, "ts": "1714.0042" }));
            })
            .await;

        let ts = client_for(&server)
            .send_message(&[Block::mrkdwn_section("*hi*")], "fallback")
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(ts, "1714.0042");
    }

    #[tokio::test]
    async fn api_level_rejection_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat.postMessage");
                then.status(200)
                    .json_body(serde_json::json!({ "ok": false, "error": "channel_not_found" }));
            })
            .await;

        let err = client_for(&server)
            .send_message(&[], "fallback")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("channel_not_found"), "got: {err:#}");
    }

    #[tokio::test]
    async fn fetch_message_parses_matching_blocks() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/conversations.history")
                    .query_param("channel", "C123")
                    .query_param("latest", "1714.0042")
                    .query_param("inclusive", "true")
                    .query_param("limit", "1");
                then.status(200).json_body(serde_json::json!({
                    "ok": true,
                    "messages": [{
                        "ts": "1714.0042",
                        "blocks": [
                            { "type": "section", "text": { "type": "mrkdwn", "text": "<@U1>" } },
                            { "type": "divider" }
                        ]
                    }]
                }));
            })
            .await;

        let blocks = client_for(&server)
            .fetch_message("1714.0042")
            .await
            .unwrap()
            .unwrap();
        mock.assert_async().await;
        assert_eq!(blocks[0], Block::mrkdwn_section("<@U1>"));
        assert_eq!(blocks[1], Block::Divider);
    }

    #[tokio::test]
    async fn fetch_of_a_different_message_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/conversations.history");
                then.status(200).json_body(serde_json::json!({
                    "ok": true,
                    "messages": [{ "ts": "1713.0000", "blocks": [] }]
                }));
            })
            .await;

        let fetched = client_for(&server).fetch_message("1714.0042").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn fetch_with_unparseable_blocks_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/conversations.history");
                then.status(200).json_body(serde_json::json!({
                    "ok": true,
                    "messages": [{
                        "ts": "1714.0042",
                        "blocks": [{ "type": "image", "image_url": "https://x/y.png" }]
                    }]
                }));
            })
            .await;

        let fetched = client_for(&server).fetch_message("1714.0042").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn update_message_patches_the_linked_ts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat.update")
                    .json_body_partial(r#"{ "channel": "C123", "ts": "1714.0042" }"#);
                then.status(200).json_body(serde_json::json!({ "ok": true }));
            })
            .await;

        client_for(&server)
            .update_message("1714.0042", &[Block::mrkdwn_section("*patched*")])
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
