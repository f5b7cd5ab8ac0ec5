//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_EMERGENCY_LABEL: &str = "emergency";
pub const DEFAULT_ROSTER_PATH: &str = ".prnotify/reviewers.json";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 코드호스트(GitHub/GHE) 호스트별 인증/엔드포인트 설정
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
    /// 슬랙 채널/인증 설정
    #[serde(default)]
    pub slack: SlackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 긴급 리뷰 라벨 이름
    pub emergency_label_name: Option<String>,
    /// 리뷰어 로스터 JSON 경로
    pub roster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HostConfig {
    /// 고정 토큰(민감정보: 권장하지 않음)
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름
    pub token_env: Option<String>,
    /// API base URL override(선택)
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SlackConfig {
    /// 워크스페이스 서브도메인(아카이브 딥링크 구성용)
    pub workspace: Option<String>,
    /// 알림을 게시할 채널 ID
    pub channel: Option<String>,
    /// bot 토큰(민감정보: 권장하지 않음)
    pub bot_token: Option<String>,
    /// bot 토큰을 읽을 환경변수 이름
    pub bot_token_env: Option<String>,
    /// API base URL override(선택)
    pub api_base: Option<String>,
}

impl Config {
    pub fn emergency_label_name(&self) -> String {
        self.defaults
            .emergency_label_name
            .clone()
            .unwrap_or_else(|| DEFAULT_EMERGENCY_LABEL.to_string())
    }

    pub fn roster_path(&self) -> String {
        self.defaults
            .roster_path
            .clone()
            .unwrap_or_else(|| DEFAULT_ROSTER_PATH.to_string())
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(host)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);

        for (host, incoming) in other.hosts {
            if let Some(existing) = self.hosts.get_mut(&host) {
                existing.merge_from(incoming);
            } else {
                self.hosts.insert(host, incoming);
            }
        }

        self.slack.merge_from(other.slack);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.emergency_label_name.is_some() {
            self.emergency_label_name = other.emergency_label_name;
        }
        if other.roster_path.is_some() {
            self.roster_path = other.roster_path;
        }
    }
}

impl HostConfig {
    pub fn merge_from(&mut self, other: HostConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }
}

impl SlackConfig {
    pub fn merge_from(&mut self, other: SlackConfig) {
        if other.workspace.is_some() {
            self.workspace = other.workspace;
        }
        if other.channel.is_some() {
            self.channel = other.channel;
        }
        if other.bot_token.is_some() {
            self.bot_token = other.bot_token;
        }
        if other.bot_token_env.is_some() {
            self.bot_token_env = other.bot_token_env;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_config_overrides_earlier_values() {
        let mut base: Config = serde_json::from_str(
            r#"{
                "defaults": { "emergency_label_name": "hotfix" },
                "hosts": { "github.com": { "token_env": "GITHUB_TOKEN" } },
                "slack": { "channel": "C111" }
            }"#,
        )
        .unwrap();
        let overlay: Config = serde_json::from_str(
            r#"{
                "defaults": { "roster_path": "team/reviewers.json" },
                "hosts": { "github.com": { "api_base": "https://ghe.acme.dev/api/v3" } },
                "slack": { "channel": "C222", "workspace": "acme" }
            }"#,
        )
        .unwrap();

        base.merge_from(overlay);

        assert_eq!(base.emergency_label_name(), "hotfix");
        assert_eq!(base.roster_path(), "team/reviewers.json");
        let host = base.host_config("github.com").unwrap();
        assert_eq!(host.token_env.as_deref(), Some("GITHUB_TOKEN"));
        assert_eq!(host.api_base.as_deref(), Some("https://ghe.acme.dev/api/v3"));
        assert_eq!(base.slack.channel.as_deref(), Some("C222"));
        assert_eq!(base.slack.workspace.as_deref(), Some("acme"));
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::default();
        assert_eq!(config.emergency_label_name(), DEFAULT_EMERGENCY_LABEL);
        assert_eq!(config.roster_path(), DEFAULT_ROSTER_PATH);
    }
}
