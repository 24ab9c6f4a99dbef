//! 컴포넌트 컨테이너 부트스트랩 라이브러리
//!
//! Spring Framework의 컨테이너 내부 동작 중 두 가지를 Rust로 구현합니다.
//!
//! - **후처리기 오케스트레이션**: 레지스트리/팩토리/인스턴스 후처리기를
//!   우선순위 계층과 재발견 규칙에 따라 실행하고 등록
//! - **롤백 규칙 매칭**: 에러 타입 계층을 따라 올라가며 패턴과의 거리 계산
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │    Bootstrap    │ ← refresh, 1~7단계 오케스트레이션
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │      Core       │ ← 레지스트리, 팩토리, 정렬, 에러
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     Domain      │ ← 정의, 확장 계약
//! └─────────────────┘
//!
//! ┌─────────────────┐
//! │   Transaction   │ ← 롤백 규칙 (독립 모듈)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use bean_container::bootstrap::BootstrapContext;
//! use bean_container::domain::ComponentDefinition;
//!
//! let mut context = BootstrapContext::new();
//! context.register_definition(ComponentDefinition::component("clock", |_| Ok(SystemClock)))?;
//!
//! let report = context.refresh()?;
//! println!("{} singletons", report.singletons_created);
//! ```

pub mod core;
pub mod config;
pub mod domain;
pub mod bootstrap;
pub mod transaction;
pub mod utils;
