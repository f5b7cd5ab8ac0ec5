//! 조정 실행 컨텍스트(설정/로스터/이벤트/게이트웨이) 준비 단계.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::application::config::Config;
use crate::application::ports::{ChatGateway, CommentGateway};
use crate::application::usecases::reconcile_review::ReconcileReviewUseCase;
use crate::domain::event::{ReviewRequestEvent, RunOptions};
use crate::domain::roster::ReviewerRoster;

/// 조정 유스케이스 전 구간에서 공유되는 실행 상태.
pub(super) struct ExecutionContext {
    pub config: Config,
    pub roster: ReviewerRoster,
    pub event: ReviewRequestEvent,
    pub vcs: Box<dyn CommentGateway>,
    pub chat: Box<dyn ChatGateway>,
    pub workspace: String,
    pub channel: String,
}

/// 설정/로스터/이벤트 로딩과 게이트웨이 구성을 선행한다.
/// 외부 쓰기에 필요한 자격증명은 dry-run이 아닐 때만 요구한다.
pub(super) fn load_execution_context(
    use_case: &ReconcileReviewUseCase<'_>,
    options: &RunOptions,
) -> Result<ExecutionContext> {
    use_case.reporter.section("Load Config");
    let config = use_case
        .config_repo
        .load()
        .context("failed to load prnotify config")?;

    let roster_path = options
        .roster_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.roster_path()));
    let roster = use_case
        .roster_repo
        .load(&roster_path)
        .with_context(|| format!("failed to load reviewer roster at {}", roster_path.display()))?;
    use_case
        .reporter
        .kv("Roster", &format!("{} entries", roster.reviewers.len()));

    let event = use_case
        .event_reader
        .read(&options.event_path)
        .with_context(|| {
            format!(
                "failed to read event payload at {}",
                options.event_path.display()
            )
        })?;

    let target = event.comment_target()?;
    use_case.reporter.kv(
        "Target",
        &format!("{}/{}#{}", target.owner, target.repo, target.number),
    );

    let host_cfg = config.host_config(&target.host);
    let token = host_cfg.and_then(|h| h.resolve_token());
    if !options.dry_run && token.is_none() {
        bail!(
            "missing VCS token for host '{}'. Configure hosts.{}.token or hosts.{}.token_env in config, or use --dry-run",
            target.host,
            target.host,
            target.host,
        );
    }
    let vcs = use_case.vcs_factory.build(&target, host_cfg, token);

    let slack_token = config.slack.resolve_bot_token();
    if !options.dry_run && slack_token.is_none() {
        bail!(
            "missing Slack bot token. Configure slack.bot_token or slack.bot_token_env in config, or use --dry-run"
        );
    }

    let (workspace, channel) = if options.dry_run {
        (
            config.slack.workspace.clone().unwrap_or_default(),
            config.slack.channel.clone().unwrap_or_default(),
        )
    } else {
        let Some(workspace) = config.slack.workspace.clone().filter(|w| !w.is_empty()) else {
            bail!("missing slack.workspace in config (used to build the archive permalink)");
        };
        let Some(channel) = config.slack.channel.clone().filter(|c| !c.is_empty()) else {
            bail!("missing slack.channel in config");
        };
        (workspace, channel)
    };

    let chat = use_case
        .chat_factory
        .build(&channel, slack_token, config.slack.api_base.clone());

    Ok(ExecutionContext {
        config,
        roster,
        event,
        vcs,
        chat,
        workspace,
        channel,
    })
}
