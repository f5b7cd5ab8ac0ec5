//! 도메인 정책(링크 마커 규칙, 멘션 추출, 리뷰어 diff 규칙).

use crate::domain::notification::{Block, IssueComment, NotificationLink, ReviewerDiff, TextObject};

/// 링크 코멘트 식별용 고정 센티널.
/// 사람이 쓴 코멘트와 충돌하지 않도록 HTML 주석 안의 고유 문구를 사용한다.
pub const LINK_COMMENT_SENTINEL: &str = "prnotify-bot link";

const LINK_TOKEN_OPEN: &str = "(ts:";
const LINK_TOKEN_CLOSE: char = ')';

/// 주석 코멘트에 삽입할 머신 판독용 마커를 만든다.
pub fn link_marker(message_ts: &str) -> String {
    format!("<!-- (ts:{message_ts}) {LINK_COMMENT_SENTINEL} -->")
}

/// 코멘트 본문에서 링크를 복원한다.
/// 센티널과 ts 페이로드가 모두 있어야 링크로 인정한다.
pub fn parse_link_comment(body: &str) -> Option<NotificationLink> {
    if !body.contains(LINK_COMMENT_SENTINEL) {
        return None;
    }

    let start = body.find(LINK_TOKEN_OPEN)? + LINK_TOKEN_OPEN.len();
    let end = body[start..].find(LINK_TOKEN_CLOSE)? + start;
    let message_ts = body[start..end].trim();
    if message_ts.is_empty() {
        return None;
    }

    Some(NotificationLink {
        message_ts: message_ts.to_string(),
    })
}

/// 코멘트 이력에서 유효한 링크를 찾는다.
/// 링크 코멘트가 여러 개면 created_at이 가장 늦은 것이 유효하고, 나머지는 무시한다.
pub fn find_notification_link(comments: &[IssueComment]) -> Option<NotificationLink> {
    comments
        .iter()
        .filter_map(|c| parse_link_comment(&c.body).map(|link| (c.created_at, link)))
        .max_by_key(|(created_at, _)| *created_at)
        .map(|(_, link)| link)
}

/// 텍스트에서 `<@...>` 멘션 토큰을 첫 등장 순서로 중복 없이 추출한다.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("<@") {
        let candidate = &rest[start..];
        let Some(end) = candidate.find('>') else {
            break;
        };

        // "<@>" 같은 빈 ID는 멘션이 아니다.
        let token = &candidate[..=end];
        if end > 2 && !out.iter().any(|t| t == token) {
            out.push(token.to_string());
        }
        rest = &candidate[end + 1..];
    }

    out
}

/// previous/current 멘션 집합 간 추가/해제 목록을 계산한다.
/// 순서는 각 입력의 순회 순서를 그대로 유지한다(재정렬 금지).
pub fn diff_reviewers(previous: &[String], current: &[String]) -> ReviewerDiff {
    ReviewerDiff {
        added: current
            .iter()
            .filter(|m| !previous.contains(m))
            .cloned()
            .collect(),
        removed: previous
            .iter()
            .filter(|m| !current.contains(m))
            .cloned()
            .collect(),
    }
}

/// 멘션 블록(첫 번째 mrkdwn 섹션)의 위치를 구조 기준으로 찾는다.
pub fn find_mention_block_index(blocks: &[Block]) -> Option<usize> {
    blocks.iter().position(|b| {
        matches!(
            b,
            Block::Section {
                text: TextObject::Mrkdwn { .. }
            }
        )
    })
}

/// 멘션 블록 텍스트를 꺼낸다. 블록이 없으면 None (오류 아님).
pub fn mention_block_text(blocks: &[Block]) -> Option<&str> {
    match blocks.get(find_mention_block_index(blocks)?) {
        Some(Block::Section {
            text: TextObject::Mrkdwn { text },
        }) => Some(text.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn comment(body: &str, minute: u32) -> IssueComment {
        IssueComment {
            id: format!("c{minute}"),
            body: body.to_string(),
            created_at: chrono::Utc
                .with_ymd_and_hms(2024, 5, 2, 9, minute, 0)
                .unwrap(),
        }
    }

    #[test]
    fn marker_round_trips_through_parse() {
        let body = link_marker("1714.0042");
        let link = parse_link_comment(&body).unwrap();
        assert_eq!(link.message_ts, "1714.0042");
    }

    #[test]
    fn comment_without_sentinel_is_not_a_link() {
        assert!(parse_link_comment("nice PR! (ts:1714.0042)").is_none());
    }

    #[test]
    fn sentinel_without_payload_is_not_a_link() {
        assert!(parse_link_comment("<!-- prnotify-bot link -->").is_none());
        assert!(parse_link_comment("<!-- (ts:) prnotify-bot link -->").is_none());
    }

    #[test]
    fn latest_qualifying_comment_wins() {
        let comments = vec![
            comment(&link_marker("1714.0001"), 0),
            comment("LGTM", 1),
            comment(&link_marker("1714.0002"), 5),
            comment(&link_marker("1714.0003"), 3),
        ];
        let link = find_notification_link(&comments).unwrap();
        assert_eq!(link.message_ts, "1714.0002");
    }

    #[test]
    fn no_qualifying_comment_yields_none() {
        let comments = vec![comment("LGTM", 0), comment("(ts:123) unrelated", 1)];
        assert!(find_notification_link(&comments).is_none());
    }

    #[test]
    fn extracts_mentions_in_first_seen_order() {
        let text = "*📮 리뷰어: <@U2>, <@U1>, <@U2> 그리고 <@>*";
        assert_eq!(extract_mentions(text), vec!["<@U2>", "<@U1>"]);
    }

    #[test]
    fn extraction_of_plain_text_is_empty() {
        assert!(extract_mentions("리뷰어 없음").is_empty());
    }

    #[test]
    fn diff_splits_added_and_removed_in_input_order() {
        let previous = vec!["<@U1>".to_string(), "<@U4>".to_string()];
        let current = vec![
            "<@U2>".to_string(),
            "<@U3>".to_string(),
            "<@U4>".to_string(),
        ];
        let diff = diff_reviewers(&previous, &current);
        assert_eq!(diff.added, vec!["<@U2>", "<@U3>"]);
        assert_eq!(diff.removed, vec!["<@U1>"]);
        assert!(!diff.is_empty());
    }

    #[test]
    fn equal_sets_diff_to_empty() {
        let previous = vec!["<@U1>".to_string(), "<@U2>".to_string()];
        let diff = diff_reviewers(&previous, &previous.clone());
        assert!(diff.is_empty());
    }

    #[test]
    fn mention_block_is_found_by_structure_not_position() {
        let blocks = vec![
            Block::Divider,
            Block::mrkdwn_section("<@U1>"),
            Block::mrkdwn_section("*summary*"),
        ];
        assert_eq!(find_mention_block_index(&blocks), Some(1));
        assert_eq!(mention_block_text(&blocks), Some("<@U1>"));
    }

    #[test]
    fn missing_mention_block_yields_none() {
        assert!(mention_block_text(&[Block::Divider]).is_none());
    }
}
