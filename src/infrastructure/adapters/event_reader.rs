//! 이벤트 페이로드 파일 리더 어댑터.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::EventReader;
use crate::domain::event::ReviewRequestEvent;

/// 웹훅 전송 계층이 파일로 남긴 JSON 페이로드를 읽는 어댑터.
pub struct JsonEventReader;

impl EventReader for JsonEventReader {
    fn read(&self, path: &Path) -> Result<ReviewRequestEvent> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read event payload at {}", path.display()))?;
        ReviewRequestEvent::from_json(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_event_payload_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "action": "review_requested",
                "pull_request": {{
                    "number": 7,
                    "title": "t",
                    "user": {{ "login": "alice" }},
                    "html_url": "https://github.com/acme/webapp/pull/7"
                }},
                "repository": {{
                    "name": "webapp",
                    "full_name": "acme/webapp",
                    "html_url": "https://github.com/acme/webapp"
                }}
            }}"#
        )
        .unwrap();

        let event = JsonEventReader.read(file.path()).unwrap();
        assert_eq!(event.pull_request.number, 7);
    }
}
