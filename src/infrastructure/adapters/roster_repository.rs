//! 리뷰어 로스터 포트 구현 어댑터.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::RosterRepository;
use crate::domain::roster::ReviewerRoster;

/// JSON 파일 기반 로스터 어댑터.
pub struct JsonRosterRepository;

impl RosterRepository for JsonRosterRepository {
    fn load(&self, path: &Path) -> Result<ReviewerRoster> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read roster at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse roster JSON in {}", path.display()))
    }
}
