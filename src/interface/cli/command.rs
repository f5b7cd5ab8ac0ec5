//! CLI 명령 파싱 모듈.

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::event::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "prnotify")]
#[command(about = "Keeps one Slack review notification in sync with a PR's requested reviewers")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Webhook event payload JSON (defaults to $GITHUB_EVENT_PATH)
    event: Option<PathBuf>,

    /// Override the reviewer roster JSON path
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Print the composed notification blocks to stdout, do not call Slack/GitHub
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and credential sources
    Config,
}

pub enum CliAction {
    InspectConfig,
    Reconcile(RunOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        let cli = Cli::parse();

        match cli.command {
            Some(Commands::Config) => Ok(CliAction::InspectConfig),
            None => {
                let Some(event_path) = cli
                    .event
                    .or_else(|| env::var_os("GITHUB_EVENT_PATH").map(PathBuf::from))
                else {
                    return Err(
                        "missing event payload: pass <EVENT> or set GITHUB_EVENT_PATH".to_string()
                    );
                };

                Ok(CliAction::Reconcile(RunOptions {
                    event_path,
                    roster_path: cli.roster,
                    dry_run: cli.dry_run,
                }))
            }
        }
    }
}
