//! 기존 알림 조회/diff/패치 단계.

use anyhow::{Context, Result};

use crate::application::usecases::reconcile_review::{ExecutionContext, ReconcileReviewUseCase};
use crate::domain::notification::NotificationLink;
use crate::domain::policy::{diff_reviewers, extract_mentions, mention_block_text};

/// 링크된 메시지를 조회해 리뷰어 변경분만 반영한다.
/// 변경이 없으면 외부 쓰기를 하지 않는다.
pub(super) async fn update_notification(
    use_case: &ReconcileReviewUseCase<'_>,
    ctx: &ExecutionContext,
    link: &NotificationLink,
    mentions: &[String],
    requester: &str,
) -> Result<()> {
    use_case.reporter.section("Update");
    use_case.reporter.kv("Message TS", &link.message_ts);

    let Some(blocks) = ctx.chat.fetch_message(&link.message_ts).await? else {
        // 메시지가 사라졌거나 블록을 해석할 수 없으면 패치 대상이 없다. 실행 실패로 만들지 않는다.
        use_case.reporter.status(
            "Update",
            "linked message has no readable blocks; nothing to patch",
        );
        tracing::warn!(
            message_ts = %link.message_ts,
            "linked notification message is missing or malformed"
        );
        return Ok(());
    };

    let previous = mention_block_text(&blocks)
        .map(extract_mentions)
        .unwrap_or_default();
    let diff = diff_reviewers(&previous, mentions);
    if diff.is_empty() {
        use_case.reporter.status(
            "Update",
            "reviewer set unchanged; skipping message update",
        );
        return Ok(());
    }

    if !diff.added.is_empty() {
        use_case.reporter.kv("Added", &diff.added.join(", "));
    }
    if !diff.removed.is_empty() {
        use_case.reporter.kv("Removed", &diff.removed.join(", "));
    }

    let Some(patched) = use_case.composer.patch_mention_block(blocks, &diff, requester) else {
        use_case
            .reporter
            .status("Update", "mention block not found; nothing to patch");
        tracing::warn!(
            message_ts = %link.message_ts,
            "mention block missing from linked message"
        );
        return Ok(());
    };

    ctx.chat
        .update_message(&link.message_ts, &patched)
        .await
        .context("slack: failed to update notification message")?;
    use_case.reporter.status("Chat", "notification message updated");

    Ok(())
}
