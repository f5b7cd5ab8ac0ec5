//! 웹훅 이벤트 페이로드를 닫힌 도메인 형태로 해석하는 모듈.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub event_path: PathBuf,
    pub roster_path: Option<PathBuf>,
    pub dry_run: bool,
}

/// 리뷰어 요청 변경 이벤트의 페이로드.
/// `pull_request`/`repository`가 빠진 페이로드는 역직렬화 단계에서 거부된다.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequestEvent {
    #[serde(default)]
    pub action: Option<String>,
    pub pull_request: PullRequestSnapshot,
    pub repository: RepositoryRef,
}

/// 이벤트가 전달한 PR 스냅샷(읽기 전용 뷰).
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestSnapshot {
    pub number: u64,
    pub title: String,
    pub user: UserRef,
    pub html_url: String,
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
    /// 이벤트 시점의 전체 요청 리뷰어 집합(증분 아님).
    #[serde(default)]
    pub requested_reviewers: Vec<UserRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelRef {
    pub name: String,
}

/// 이벤트가 속한 저장소 식별 정보.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
}

/// 코멘트 API 호출 대상(호스트/소유자/저장소/PR 번호).
#[derive(Debug, Clone)]
pub struct CommentTarget {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl ReviewRequestEvent {
    /// JSON 페이로드를 검증된 이벤트로 해석한다.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid review request event payload")
    }

    /// PR 생성 이벤트 여부.
    /// 생성 시점에는 알림을 만들지 않고 첫 리뷰어 요청 이벤트에 맡긴다.
    pub fn is_pull_request_open(&self) -> bool {
        matches!(self.action.as_deref(), Some("opened"))
    }

    /// 이벤트에서 코멘트 API 대상을 구성한다.
    pub fn comment_target(&self) -> Result<CommentTarget> {
        let url = Url::parse(&self.repository.html_url)
            .with_context(|| format!("invalid repository URL: {}", self.repository.html_url))?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("repository URL host is missing"))?
            .to_string();

        let Some((owner, repo)) = self.repository.full_name.split_once('/') else {
            bail!(
                "unexpected repository full_name: {}",
                self.repository.full_name
            );
        };

        Ok(CommentTarget {
            host,
            owner: owner.to_string(),
            repo: repo.to_string(),
            number: self.pull_request.number,
        })
    }
}

impl PullRequestSnapshot {
    /// 현재 요청된 리뷰어 로그인 목록.
    pub fn requested_logins(&self) -> Vec<&str> {
        self.requested_reviewers
            .iter()
            .map(|u| u.login.as_str())
            .collect()
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> serde_json::Value {
        json!({
            "action": "review_requested",
            "pull_request": {
                "number": 42,
                "title": "Fix login retry",
                "user": { "login": "alice" },
                "html_url": "https://github.com/acme/webapp/pull/42",
                "body": "retry once on 401",
                "labels": [{ "name": "bug" }],
                "requested_reviewers": [{ "login": "bob" }, { "login": "carol" }]
            },
            "repository": {
                "name": "webapp",
                "full_name": "acme/webapp",
                "html_url": "https://github.com/acme/webapp"
            }
        })
    }

    #[test]
    fn parses_review_request_payload() {
        let event = ReviewRequestEvent::from_json(&sample_payload().to_string()).unwrap();
        assert_eq!(event.pull_request.number, 42);
        assert_eq!(event.pull_request.requested_logins(), vec!["bob", "carol"]);
        assert!(event.pull_request.has_label("bug"));
        assert!(!event.is_pull_request_open());
    }

    #[test]
    fn rejects_payload_without_pull_request() {
        let raw = json!({ "repository": { "name": "webapp", "full_name": "acme/webapp", "html_url": "https://github.com/acme/webapp" } });
        assert!(ReviewRequestEvent::from_json(&raw.to_string()).is_err());
    }

    #[test]
    fn derives_comment_target_from_repository() {
        let event = ReviewRequestEvent::from_json(&sample_payload().to_string()).unwrap();
        let target = event.comment_target().unwrap();
        assert_eq!(target.host, "github.com");
        assert_eq!(target.owner, "acme");
        assert_eq!(target.repo, "webapp");
        assert_eq!(target.number, 42);
    }

    #[test]
    fn missing_reviewers_defaults_to_empty_set() {
        let mut payload = sample_payload();
        payload["pull_request"]
            .as_object_mut()
            .unwrap()
            .remove("requested_reviewers");
        let event = ReviewRequestEvent::from_json(&payload.to_string()).unwrap();
        assert!(event.pull_request.requested_logins().is_empty());
    }
}
