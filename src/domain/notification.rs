//! 알림 본문 블록 모델과 링크/코멘트 엔티티.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// PR 코멘트 한 건(주석 채널 항목).
#[derive(Debug, Clone)]
pub struct IssueComment {
    pub id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// PR과 슬랙 알림 메시지를 잇는 링크.
/// 슬랙 ts 하나가 조회용 토큰과 메시지 핸들을 겸한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationLink {
    pub message_ts: String,
}

/// 리뷰어 집합 변경 내역.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ReviewerDiff {
    /// 변경이 없으면 외부 쓰기를 생략한다(멱등 보장 지점).
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Block Kit 블록의 닫힌 변형 모델.
/// 멘션 블록 탐색이 위치가 아니라 타입 매칭으로 동작하도록 태그를 고정한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: TextObject },
    Divider,
    Actions { elements: Vec<ActionElement> },
}

/// 섹션/버튼 텍스트 오브젝트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    Mrkdwn { text: String },
    PlainText { text: String },
}

/// actions 블록 요소.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionElement {
    Button {
        text: TextObject,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
}

impl Block {
    /// mrkdwn 섹션 생성 헬퍼.
    pub fn mrkdwn_section(text: impl Into<String>) -> Self {
        Block::Section {
            text: TextObject::Mrkdwn { text: text.into() },
        }
    }
}
