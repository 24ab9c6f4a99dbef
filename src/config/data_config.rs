//! 컨테이너 및 실행 환경 설정 관리 모듈
//!
//! 실행 환경과 컨테이너 동작(정의 덮어쓰기, 레지스트리 후처리 반복 상한) 설정을 관리합니다.

use std::env;

use crate::core::errors::{ContainerError, ContainerResult};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 상세 로그
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let env = Environment::current();
    /// match env {
    ///     Environment::Development => println!("개발 환경"),
    ///     Environment::Production => println!("프로덕션 환경"),
    ///     _ => {}
    /// }
    /// ```
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 환경별 `.env` 프로필 파일 이름
    pub fn profile_file(&self) -> &'static str {
        match self {
            Environment::Development => ".env.development",
            Environment::Test => ".env.test",
            Environment::Staging => ".env.staging",
            Environment::Production => ".env.production",
        }
    }

    /// 환경별 기본 로그 필터
    ///
    /// - Development: `debug` (부트스트랩 단계 진행 로그 포함)
    /// - 그 외: `info`
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            _ => "info",
        }
    }
}

/// 컨테이너 동작 설정
///
/// | 환경 변수 | 기본값 | 설명 |
/// |-----------|--------|------|
/// | `CONTAINER_ALLOW_DEFINITION_OVERRIDING` | `true` | 같은 이름의 정의 재등록 허용 |
/// | `CONTAINER_MAX_REGISTRY_PASSES` | 없음 (무제한) | 레지스트리 후처리 반복 상한 |
pub struct ContainerConfig;

impl ContainerConfig {
    /// 같은 이름의 정의를 다시 등록할 수 있는지 여부
    pub fn allow_definition_overriding() -> ContainerResult<bool> {
        match env::var("CONTAINER_ALLOW_DEFINITION_OVERRIDING") {
            Ok(value) => parse_bool("CONTAINER_ALLOW_DEFINITION_OVERRIDING", &value),
            Err(_) => Ok(true),
        }
    }

    /// 레지스트리 후처리 반복 단계의 최대 반복 횟수. 설정이 없으면 무제한입니다.
    pub fn max_registry_passes() -> ContainerResult<Option<usize>> {
        match env::var("CONTAINER_MAX_REGISTRY_PASSES") {
            Ok(value) => parse_pass_limit(&value).map(Some),
            Err(_) => Ok(None),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> ContainerResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ContainerError::InvalidConfiguration(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

fn parse_pass_limit(value: &str) -> ContainerResult<usize> {
    let limit = value.trim().parse::<usize>().map_err(|e| {
        ContainerError::InvalidConfiguration(format!(
            "CONTAINER_MAX_REGISTRY_PASSES must be a positive integer: {}",
            e
        ))
    })?;
    if limit == 0 {
        return Err(ContainerError::InvalidConfiguration(
            "CONTAINER_MAX_REGISTRY_PASSES must be at least 1".to_string(),
        ));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str(" Dev "), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_profile_and_log_filter() {
        assert_eq!(Environment::Test.profile_file(), ".env.test");
        assert_eq!(Environment::Development.default_log_filter(), "debug");
        assert_eq!(Environment::Production.default_log_filter(), "info");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("KEY", "TRUE"), Ok(true));
        assert_eq!(parse_bool("KEY", "off"), Ok(false));
        assert!(matches!(
            parse_bool("KEY", "maybe"),
            Err(ContainerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_parse_pass_limit() {
        assert_eq!(parse_pass_limit(" 8 "), Ok(8));
        assert!(parse_pass_limit("0").is_err());
        assert!(parse_pass_limit("-1").is_err());
    }

    #[test]
    fn test_container_config_defaults() {
        if env::var("CONTAINER_ALLOW_DEFINITION_OVERRIDING").is_err() {
            assert_eq!(ContainerConfig::allow_definition_overriding(), Ok(true));
        }

        if env::var("CONTAINER_MAX_REGISTRY_PASSES").is_err() {
            assert_eq!(ContainerConfig::max_registry_passes(), Ok(None));
        }
    }
}
