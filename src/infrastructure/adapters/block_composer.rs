//! 알림 본문 조립 포트 구현 어댑터.

use crate::application::ports::NotificationComposer;
use crate::domain::event::PullRequestSnapshot;
use crate::domain::notification::{Block, ReviewerDiff};
use crate::infrastructure::blocks;

/// 블록 조립 어댑터.
pub struct BlockComposerAdapter;

impl NotificationComposer for BlockComposerAdapter {
    fn build_create_body(
        &self,
        snapshot: &PullRequestSnapshot,
        repo_name: &str,
        mentions: &[String],
        requester: &str,
        emergency_label: &str,
    ) -> Vec<Block> {
        blocks::build_create_blocks(snapshot, repo_name, mentions, requester, emergency_label)
    }

    fn fallback_text(&self, snapshot: &PullRequestSnapshot, mentions: &[String]) -> String {
        blocks::fallback_text(snapshot, mentions)
    }

    fn patch_mention_block(
        &self,
        body: Vec<Block>,
        diff: &ReviewerDiff,
        requester: &str,
    ) -> Option<Vec<Block>> {
        blocks::patch_mention_block(body, diff, requester)
    }

    fn build_link_comment(&self, workspace: &str, channel: &str, message_ts: &str) -> String {
        blocks::build_link_comment(workspace, channel, message_ts)
    }
}
