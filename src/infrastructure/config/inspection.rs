//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loader::LoadedConfig;
use crate::application::config::{DefaultsConfig, HostConfig, SlackConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub hosts: BTreeMap<String, HostInspection>,
    pub slack: SlackInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub emergency_label_name: String,
    pub roster_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostInspection {
    pub token_source: Option<String>,
    pub token_resolved: bool,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlackInspection {
    pub workspace: Option<String>,
    pub channel: Option<String>,
    pub token_source: Option<String>,
    pub token_resolved: bool,
    pub api_base: Option<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let mut hosts = BTreeMap::new();
        for (host, cfg) in &loaded.config.hosts {
            hosts.insert(host.clone(), host_inspection(cfg));
        }

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: loaded.config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                emergency_label_name: loaded.config.emergency_label_name(),
                roster_path: loaded.config.roster_path(),
            },
            hosts,
            slack: slack_inspection(&loaded.config.slack),
        }
    }
}

fn host_inspection(cfg: &HostConfig) -> HostInspection {
    HostInspection {
        token_source: cfg.token_source_label(),
        token_resolved: cfg.resolve_token().is_some(),
        api_base: cfg.api_base.clone(),
    }
}

fn slack_inspection(cfg: &SlackConfig) -> SlackInspection {
    SlackInspection {
        workspace: cfg.workspace.clone(),
        channel: cfg.channel.clone(),
        token_source: cfg.token_source_label(),
        token_resolved: cfg.resolve_bot_token().is_some(),
        api_base: cfg.api_base.clone(),
    }
}
