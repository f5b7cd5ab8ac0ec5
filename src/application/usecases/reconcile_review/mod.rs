//! 리뷰어 요청 상태와 슬랙 알림을 맞추는 조정 유스케이스.

mod announce;
mod context;
mod revise;

use anyhow::Result;

use crate::application::ports::{
    ChatFactory, ConfigRepository, EventReader, NotificationComposer, Reporter, RosterRepository,
    VcsFactory,
};
use crate::domain::event::RunOptions;
use crate::domain::policy::find_notification_link;

use context::{ExecutionContext, load_execution_context};

/// 이벤트 입력부터 링크 탐색, 생성/갱신 분기까지 전체 흐름을 조율한다.
pub struct ReconcileReviewUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub roster_repo: &'a dyn RosterRepository,
    pub event_reader: &'a dyn EventReader,
    pub vcs_factory: &'a dyn VcsFactory,
    pub chat_factory: &'a dyn ChatFactory,
    pub composer: &'a dyn NotificationComposer,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ReconcileReviewUseCase<'a> {
    /// 조정 실행 진입점.
    /// 링크가 없으면 생성+주석, 있으면 diff가 비지 않을 때만 갱신한다.
    pub async fn execute(&self, options: RunOptions) -> Result<()> {
        self.reporter.section("Session");
        self.reporter
            .kv("Event", &options.event_path.display().to_string());
        self.reporter.kv(
            "Mode",
            if options.dry_run {
                "dry-run"
            } else {
                "reconcile"
            },
        );

        let ctx = load_execution_context(self, &options)?;

        if ctx.event.is_pull_request_open() {
            // 생성 시점에는 알림을 보내지 않는다. 첫 리뷰어 요청 이벤트가 생성을 담당한다.
            self.reporter.status(
                "Skip",
                "pull request opened; waiting for the first review request",
            );
            return Ok(());
        }

        let mentions = ctx
            .roster
            .mention_set(&ctx.event.pull_request.requested_logins());
        let requester = ctx.roster.mention_or_login(&ctx.event.pull_request.user.login);
        self.reporter.kv("Reviewers", &mentions.join(", "));

        if options.dry_run {
            return self.preview_create_body(&ctx, &mentions, &requester);
        }

        self.reporter.section("Locate");
        let comments = ctx.vcs.list_comments().await?;
        self.reporter
            .kv("Comments", &comments.len().to_string());

        match find_notification_link(&comments) {
            None => {
                self.reporter.status("Locate", "no notification link found");
                announce::create_notification(self, &ctx, &mentions, &requester).await
            }
            Some(link) => {
                self.reporter.status("Locate", "existing notification link found");
                revise::update_notification(self, &ctx, &link, &mentions, &requester).await
            }
        }
    }

    /// 네트워크 호출 없이 생성 본문만 출력한다.
    fn preview_create_body(
        &self,
        ctx: &ExecutionContext,
        mentions: &[String],
        requester: &str,
    ) -> Result<()> {
        self.reporter.section("Preview");
        let blocks = self.composer.build_create_body(
            &ctx.event.pull_request,
            &ctx.event.repository.name,
            mentions,
            requester,
            &ctx.config.emergency_label_name(),
        );

        let rendered = serde_json::to_string_pretty(&blocks)?;
        for line in rendered.lines() {
            self.reporter.raw(line);
        }
        Ok(())
    }
}
