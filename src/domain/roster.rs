//! 리뷰어 로스터(코드호스트 계정 → 슬랙 ID 매핑) 엔티티.

use serde::{Deserialize, Serialize};

/// 로스터 한 줄: GitHub 로그인과 슬랙 멤버 ID 쌍.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub github_name: String,
    pub slack_id: String,
}

/// 실행 시작 시 한 번 로딩되는 불변 로스터.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReviewerRoster {
    #[serde(default)]
    pub reviewers: Vec<RosterEntry>,
}

impl ReviewerRoster {
    /// GitHub 로그인에 대응하는 슬랙 ID를 찾는다.
    /// 매핑이 없으면 None (외부 기여자 등 정상 케이스). 중복 로그인은 첫 항목이 우선.
    pub fn resolve(&self, github_name: &str) -> Option<&str> {
        self.reviewers
            .iter()
            .find(|e| e.github_name == github_name)
            .map(|e| e.slack_id.as_str())
    }

    /// 멘션 토큰을 만들고, 매핑이 없으면 로그인 문자열로 대체한다.
    pub fn mention_or_login(&self, github_name: &str) -> String {
        match self.resolve(github_name) {
            Some(id) => format!("<@{id}>"),
            None => github_name.to_string(),
        }
    }

    /// 요청 리뷰어 로그인 목록을 멘션 텍스트 집합으로 바꾼다(첫 등장 순서, 중복 제거).
    pub fn mention_set(&self, logins: &[&str]) -> Vec<String> {
        let mut out = Vec::new();
        for login in logins {
            let mention = self.mention_or_login(login);
            if !out.contains(&mention) {
                out.push(mention);
            }
        }
        out
    }
}
