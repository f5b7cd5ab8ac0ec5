//! 설정 비밀값(token/env)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

/// 비밀값 해석 결과(값 + 출처 라벨).
#[derive(Debug, Clone)]
pub(crate) struct SecretResolution {
    pub value: Option<String>,
    pub source: Option<String>,
}

/// inline 값 우선, 없으면 환경변수를 조회한다.
/// 진단 출력에는 출처 라벨만 노출하고 값 자체는 싣지 않는다.
pub(crate) fn resolve_secret(inline: Option<&str>, env_name: Option<&str>) -> SecretResolution {
    if let Some(value) = inline.map(str::trim).filter(|v| !v.is_empty()) {
        return SecretResolution {
            value: Some(value.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let Some(env_name) = env_name.map(str::trim).filter(|v| !v.is_empty()) else {
        return SecretResolution {
            value: None,
            source: None,
        };
    };

    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => SecretResolution {
            value: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => SecretResolution {
            value: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
