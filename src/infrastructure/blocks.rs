//! 슬랙 알림 블록/링크 코멘트 조립 모듈.

use crate::domain::event::PullRequestSnapshot;
use crate::domain::notification::{ActionElement, Block, ReviewerDiff, TextObject};
use crate::domain::policy::{find_mention_block_index, link_marker};

const MENTION_PREFIX: &str = "📮";
const REQUEST_LINE: &str = "리뷰 요청:";
const UNREQUEST_LINE: &str = "리뷰 요청 해제:";
const EMERGENCY_NOTICE: &str = "긴급 리뷰 요청입니다";
const LINK_COMMENT_POINTER: &str = "슬랙 코드리뷰 알림 메시지";

/// 생성 시점의 전체 알림 본문을 조립한다.
/// 멘션 섹션이 항상 첫 mrkdwn 섹션이 되도록 순서를 고정한다.
pub fn build_create_blocks(
    snapshot: &PullRequestSnapshot,
    repo_name: &str,
    mentions: &[String],
    requester: &str,
    emergency_label: &str,
) -> Vec<Block> {
    let mut blocks = vec![Block::mrkdwn_section(mention_section_text(
        snapshot, mentions, requester,
    ))];

    if !emergency_label.is_empty() && snapshot.has_label(emergency_label) {
        blocks.push(Block::mrkdwn_section(format!(
            "*🚨 `{emergency_label}` {EMERGENCY_NOTICE}*"
        )));
    }

    blocks.push(Block::Divider);
    blocks.push(Block::mrkdwn_section(summary_section_text(
        snapshot, repo_name,
    )));

    if !snapshot.labels.is_empty() {
        blocks.push(Block::Actions {
            elements: snapshot
                .labels
                .iter()
                .map(|label| ActionElement::Button {
                    text: TextObject::PlainText {
                        text: label.name.clone(),
                    },
                    style: (label.name == emergency_label).then(|| "danger".to_string()),
                })
                .collect(),
        });
    }

    blocks
}

fn mention_section_text(
    snapshot: &PullRequestSnapshot,
    mentions: &[String],
    requester: &str,
) -> String {
    if mentions.is_empty() {
        // 해석 가능한 멘션이 없으면 리뷰 요청 사실만 알린다.
        format!(
            "*{MENTION_PREFIX} {requester} 리뷰 요청 <{}|{}>*",
            snapshot.html_url, snapshot.title
        )
    } else {
        format!(
            "*{MENTION_PREFIX} 리뷰어: {} <{}|{}> by {} *",
            mentions.join(", "),
            snapshot.html_url,
            snapshot.title,
            snapshot.user.login
        )
    }
}

fn summary_section_text(snapshot: &PullRequestSnapshot, repo_name: &str) -> String {
    let mut text = format!("*{repo_name}:*\n<{}|{}>", snapshot.html_url, snapshot.title);
    if let Some(body) = snapshot.body.as_deref().filter(|b| !b.trim().is_empty()) {
        text.push_str(&format!("\n```{body}```"));
    }
    text
}

/// 멘션 블록만 diff 내용으로 교체한다. 다른 블록은 건드리지 않는다.
/// 멘션 블록이 없으면 None(패치 대상 없음).
pub fn patch_mention_block(
    mut blocks: Vec<Block>,
    diff: &ReviewerDiff,
    requester: &str,
) -> Option<Vec<Block>> {
    let idx = find_mention_block_index(&blocks)?;

    let mut mention_text = String::new();
    if !diff.added.is_empty() {
        mention_text.push_str(&format!("{REQUEST_LINE} {}", diff.added.join(", ")));
    }
    if !diff.removed.is_empty() {
        if !mention_text.is_empty() {
            mention_text.push('\n');
        }
        mention_text.push_str(&format!("{UNREQUEST_LINE} {}", diff.removed.join(", ")));
    }

    blocks[idx] = Block::mrkdwn_section(format!(
        "*{MENTION_PREFIX} {requester} 🎁 \n{mention_text}*"
    ));
    Some(blocks)
}

/// 알림 미수신 클라이언트용 대체 텍스트를 만든다.
pub fn fallback_text(snapshot: &PullRequestSnapshot, mentions: &[String]) -> String {
    format!(
        "PR 코드리뷰 요청: {} (작성자: {}, 리뷰어: {})",
        snapshot.title,
        snapshot.user.login,
        mentions.join(", ")
    )
}

/// 링크 코멘트 본문(사람용 아카이브 딥링크 + 머신용 마커)을 만든다.
pub fn build_link_comment(workspace: &str, channel: &str, message_ts: &str) -> String {
    let permalink = format!(
        "https://{workspace}.slack.com/archives/{channel}/p{}",
        message_ts.replace('.', "")
    );
    format!("{LINK_COMMENT_POINTER}({permalink})\n{}", link_marker(message_ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::NotificationLink;
    use crate::domain::policy::{extract_mentions, mention_block_text, parse_link_comment};
    use serde_json::json;

    fn snapshot(labels: &[&str], body: Option<&str>) -> PullRequestSnapshot {
        serde_json::from_value(json!({
            "number": 42,
            "title": "Fix login retry",
            "user": { "login": "alice" },
            "html_url": "https://github.com/acme/webapp/pull/42",
            "body": body,
            "labels": labels.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>(),
            "requested_reviewers": []
        }))
        .unwrap()
    }

    #[test]
    fn create_body_leads_with_the_mention_block() {
        let mentions = vec!["<@U1>".to_string(), "<@U2>".to_string()];
        let blocks = build_create_blocks(&snapshot(&[], None), "webapp", &mentions, "<@U9>", "emergency");

        let text = mention_block_text(&blocks).unwrap();
        assert!(text.contains("<@U1>, <@U2>"), "got: {text}");
        assert!(text.contains("Fix login retry"));
        // 멘션 집합은 조립된 본문에서 그대로 복원돼야 한다.
        assert_eq!(extract_mentions(text), mentions);
    }

    #[test]
    fn create_body_without_mentions_uses_request_phrase() {
        let blocks = build_create_blocks(&snapshot(&[], None), "webapp", &[], "<@U9>", "emergency");
        let text = mention_block_text(&blocks).unwrap();
        assert!(text.contains("리뷰 요청"), "got: {text}");
        assert!(text.contains("<@U9>"));
    }

    #[test]
    fn emergency_label_adds_callout_and_danger_button() {
        let blocks = build_create_blocks(
            &snapshot(&["bug", "emergency"], None),
            "webapp",
            &["<@U1>".to_string()],
            "<@U9>",
            "emergency",
        );

        let callout = match &blocks[1] {
            Block::Section { text: TextObject::Mrkdwn { text } } => text.clone(),
            other => panic!("expected emergency callout, got {other:?}"),
        };
        assert!(callout.contains("🚨"), "got: {callout}");
        assert!(callout.contains("emergency"));

        let Some(Block::Actions { elements }) = blocks.last() else {
            panic!("expected actions block");
        };
        assert_eq!(elements.len(), 2);
        let ActionElement::Button { style, .. } = &elements[1];
        assert_eq!(style.as_deref(), Some("danger"));
        let ActionElement::Button { style, .. } = &elements[0];
        assert!(style.is_none());
    }

    #[test]
    fn plain_labels_render_buttons_without_callout() {
        let blocks = build_create_blocks(
            &snapshot(&["bug"], None),
            "webapp",
            &["<@U1>".to_string()],
            "<@U9>",
            "emergency",
        );
        assert!(matches!(blocks[1], Block::Divider));
        assert!(matches!(blocks.last(), Some(Block::Actions { .. })));
    }

    #[test]
    fn summary_quotes_description_when_present() {
        let blocks = build_create_blocks(
            &snapshot(&[], Some("retry once on 401")),
            "webapp",
            &[],
            "<@U9>",
            "emergency",
        );
        let Some(Block::Section { text: TextObject::Mrkdwn { text } }) = blocks.last() else {
            panic!("expected summary section");
        };
        assert!(text.starts_with("*webapp:*"));
        assert!(text.contains("```retry once on 401```"));
    }

    #[test]
    fn patch_replaces_only_the_mention_block() {
        let original = vec![
            Block::mrkdwn_section("*📮 리뷰어: <@U1>*"),
            Block::Divider,
            Block::mrkdwn_section("*webapp:*"),
        ];
        let diff = ReviewerDiff {
            added: vec!["<@U2>".to_string(), "<@U3>".to_string()],
            removed: vec!["<@U1>".to_string()],
        };

        let patched = patch_mention_block(original.clone(), &diff, "<@U9>").unwrap();
        let text = mention_block_text(&patched).unwrap();
        assert!(text.contains("리뷰 요청: <@U2>, <@U3>"), "got: {text}");
        assert!(text.contains("리뷰 요청 해제: <@U1>"), "got: {text}");
        assert!(text.starts_with("*📮 <@U9>"));
        assert_eq!(patched[1..], original[1..]);

        // 패치된 본문에서도 멘션 집합이 복원된다.
        let mentions = extract_mentions(text);
        assert!(mentions.contains(&"<@U2>".to_string()));
        assert!(mentions.contains(&"<@U3>".to_string()));
    }

    #[test]
    fn patch_without_mention_block_is_none() {
        let diff = ReviewerDiff {
            added: vec!["<@U2>".to_string()],
            removed: vec![],
        };
        assert!(patch_mention_block(vec![Block::Divider], &diff, "<@U9>").is_none());
    }

    #[test]
    fn link_comment_round_trips_and_links_the_archive() {
        let body = build_link_comment("acme", "C123", "1714.0042");
        assert!(body.contains("https://acme.slack.com/archives/C123/p17140042"));
        assert_eq!(
            parse_link_comment(&body),
            Some(NotificationLink {
                message_ts: "1714.0042".to_string()
            })
        );
    }

    #[test]
    fn fallback_text_names_title_author_and_reviewers() {
        let text = fallback_text(&snapshot(&[], None), &["<@U1>".to_string()]);
        assert_eq!(
            text,
            "PR 코드리뷰 요청: Fix login retry (작성자: alice, 리뷰어: <@U1>)"
        );
    }
}
