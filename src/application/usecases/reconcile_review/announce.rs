//! 신규 알림 생성 + 링크 코멘트 게시 단계.

use anyhow::{Context, Result};

use crate::application::usecases::reconcile_review::{ExecutionContext, ReconcileReviewUseCase};

/// 알림 메시지를 새로 게시하고 PR에 링크 코멘트를 남긴다.
pub(super) async fn create_notification(
    use_case: &ReconcileReviewUseCase<'_>,
    ctx: &ExecutionContext,
    mentions: &[String],
    requester: &str,
) -> Result<()> {
    use_case.reporter.section("Create");

    let snapshot = &ctx.event.pull_request;
    let blocks = use_case.composer.build_create_body(
        snapshot,
        &ctx.event.repository.name,
        mentions,
        requester,
        &ctx.config.emergency_label_name(),
    );
    let fallback = use_case.composer.fallback_text(snapshot, mentions);

    let message_ts = ctx
        .chat
        .send_message(&blocks, &fallback)
        .await
        .context("slack: failed to post notification message")?;
    use_case.reporter.status("Chat", "notification message posted");
    use_case.reporter.kv("Message TS", &message_ts);

    // 게시 이후의 링크 코멘트 실패는 메시지를 되돌리지 않는다.
    // 링크 없는 메시지는 다음 이벤트에서 중복 생성될 수 있다(알려진 한계).
    let annotation = use_case
        .composer
        .build_link_comment(&ctx.workspace, &ctx.channel, &message_ts);
    ctx.vcs
        .create_comment(&annotation)
        .await
        .context("github: failed to annotate pull request with the notification link")?;
    use_case.reporter.status("Annotate", "link comment created");

    Ok(())
}
