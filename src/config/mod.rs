//! # Configuration Module
//!
//! 컨테이너와 트랜잭션 규칙의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하며,
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 컨테이너 동작 설정
//! - [`transaction_config`] - 롤백 규칙 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 환경 설정
//! export ENVIRONMENT="development"   # development, test, staging, production
//!
//! # 컨테이너 설정
//! export CONTAINER_ALLOW_DEFINITION_OVERRIDING="false"
//! export CONTAINER_MAX_REGISTRY_PASSES="32"
//!
//! # 트랜잭션 설정
//! export TX_ROLLBACK_FOR="io::IOException"
//! export TX_NO_ROLLBACK_FOR="RemoteAccessException"
//! ```
//!
//! 잘못된 값은 조용히 무시하지 않고 [`ContainerError::InvalidConfiguration`]으로 보고합니다.
//!
//! ## Spring과의 비교
//!
//! | Spring | Rust (이 프로젝트) |
//! |--------|-------------------|
//! | `@Configuration` | `pub struct ContainerConfig` |
//! | `@Value("${property}")` | `env::var("PROPERTY")` |
//! | `@Profile("dev")` | `Environment::Development` |
//! | `application.yml` | `.env` 파일 |
//! | `setAllowBeanDefinitionOverriding` | `CONTAINER_ALLOW_DEFINITION_OVERRIDING` |
//!
//! [`ContainerError::InvalidConfiguration`]: crate::core::errors::ContainerError::InvalidConfiguration

pub mod data_config;
pub mod transaction_config;

pub use data_config::*;
pub use transaction_config::*;
