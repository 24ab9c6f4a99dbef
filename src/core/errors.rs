//! # Container Error Handling System
//!
//! 컴포넌트 컨테이너 부트스트랩과 트랜잭션 롤백 규칙 처리에서 사용하는
//! 통합 에러 타입입니다. Spring Framework의 `BeansException` 계층과
//! `IllegalArgumentException` 기반 인자 검증을 Rust의 `Result` 체계로 옮겼습니다.
//!
//! ## 에러 분류
//!
//! | 분류 | 변형 | 처리 방식 |
//! |------|------|-----------|
//! | 설정 오류 | `InvalidRule`, `InvalidDefinition`, `InvalidConfiguration` | 생성 시점에 즉시 거부 |
//! | 레지스트리 오류 | `NoSuchDefinition`, `DuplicateDefinition` | 호출자에게 전파 |
//! | 생성 오류 | `TypeMismatch`, `CircularReference`, `CreationFailed` | 부트스트랩 중단 |
//! | 확장 실패 | `ExtensionFailure` | 가공 없이 그대로 전파, 재시도 없음 |
//! | 상태 오류 | `InvalidState`, `RegistryPassLimitExceeded` | 부트스트랩 중단 |
//!
//! ## Spring과의 비교
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `NoSuchBeanDefinitionException` | `ContainerError::NoSuchDefinition` |
//! | `BeanDefinitionOverrideException` | `ContainerError::DuplicateDefinition` |
//! | `BeanNotOfRequiredTypeException` | `ContainerError::TypeMismatch` |
//! | `BeanCurrentlyInCreationException` | `ContainerError::CircularReference` |
//! | `BeanCreationException` | `ContainerError::CreationFailed` |
//! | `IllegalArgumentException` (Assert) | `ContainerError::InvalidRule` |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use bean_container::core::errors::{ContainerError, ContainerResult};
//!
//! impl RegistryPostProcessor for ConfigurationScanner {
//!     fn post_process_registry(&self, registry: &mut dyn ComponentRegistry) -> ContainerResult<()> {
//!         if !registry.contains_definition("dataSource") {
//!             return Err(ContainerError::ExtensionFailure {
//!                 extension: self.name().to_string(),
//!                 reason: "dataSource definition is required".to_string(),
//!             });
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use thiserror::Error;

/// 컨테이너 전역 에러 타입
///
/// 부트스트랩 과정에서 발생할 수 있는 모든 실패를 표현합니다.
/// 확장(post-processor)이 반환한 에러는 오케스트레이터가 감싸지 않고
/// 그대로 호출자에게 돌려줍니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContainerError {
    /// 요청한 이름의 컴포넌트 정의가 레지스트리에 없음
    #[error("No component definition named '{0}'")]
    NoSuchDefinition(String),

    /// 정의 덮어쓰기가 비활성화된 상태에서 같은 이름으로 재등록
    #[error("Component definition '{0}' is already registered and overriding is disabled")]
    DuplicateDefinition(String),

    /// 정의 자체가 잘못됨 (빈 이름, 자기 자신을 부모로 지정 등)
    #[error("Invalid component definition: {0}")]
    InvalidDefinition(String),

    /// 정의나 인스턴스가 요구된 capability 또는 타입과 맞지 않음
    #[error("Component '{name}' is expected to be a {expected} but is a {actual}")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// 생성 중인 컴포넌트를 다시 요청함
    ///
    /// # 발생 시나리오
    /// - A의 supplier가 B를 요청하고, B의 supplier가 다시 A를 요청
    /// - 부모 정의 체인이 자기 자신으로 돌아옴
    #[error("Circular reference detected while creating '{0}'")]
    CircularReference(String),

    /// supplier 실행 또는 인스턴스 후처리 실패
    #[error("Failed to create component '{name}': {reason}")]
    CreationFailed { name: String, reason: String },

    /// 확장 훅이 실패를 보고함
    ///
    /// 부트스트랩 전체가 중단되며 부분 적용이나 재시도는 없습니다.
    #[error("Extension '{extension}' failed: {reason}")]
    ExtensionFailure { extension: String, reason: String },

    /// 롤백 규칙 생성 인자 검증 실패
    ///
    /// # 발생 시나리오
    /// - 에러 계층에 속하지 않는 타입으로 규칙 생성
    /// - 비어 있거나 공백뿐인 패턴
    #[error("Invalid rollback rule: {0}")]
    InvalidRule(String),

    /// 컨텍스트가 요청된 작업을 수행할 수 없는 상태
    #[error("Invalid container state: {0}")]
    InvalidState(String),

    /// 레지스트리 후처리 고정점 반복이 설정된 한도를 넘음
    #[error("Registry post-processing did not settle after {0} passes")]
    RegistryPassLimitExceeded(usize),

    /// 환경 변수 등 설정값 파싱 실패
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// 예상하지 못한 내부 오류
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// 편의성을 위한 Result 타입 별칭
pub type ContainerResult<T> = Result<T, ContainerError>;

/// 외부 라이브러리 에러를 ContainerError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> ContainerResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> ContainerResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> ContainerResult<T> {
        self.map_err(|e| ContainerError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> ContainerResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ContainerError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_such_definition_message() {
        let error = ContainerError::NoSuchDefinition("dataSource".to_string());
        assert!(error.to_string().contains("dataSource"));
    }

    #[test]
    fn test_type_mismatch_message_names_capability() {
        let error = ContainerError::TypeMismatch {
            name: "auditor".to_string(),
            expected: "registry post-processor".to_string(),
            actual: "component".to_string(),
        };
        let msg = error.to_string();

        assert!(msg.contains("auditor"));
        assert!(msg.contains("registry post-processor"));
    }

    #[test]
    fn test_extension_failure_message() {
        let error = ContainerError::ExtensionFailure {
            extension: "PlaceholderResolver".to_string(),
            reason: "unresolved ${db.url}".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Extension 'PlaceholderResolver' failed: unresolved ${db.url}"
        );
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let container_result = result.context("Additional context");

        if let Err(ContainerError::InternalError(msg)) = container_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }

    #[test]
    fn test_error_with_context_is_lazy() {
        let ok: Result<u8, &str> = Ok(7);
        let value = ok.with_context(|| panic!("context must not be evaluated"));
        assert_eq!(value, Ok(7));
    }
}
