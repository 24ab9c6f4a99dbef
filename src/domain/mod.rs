//! # Domain Layer Module
//!
//! 컨테이너가 다루는 도메인 개념을 정의합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── definition  - 컴포넌트 정의, 역할, capability, 병합 정의
//! └── extension   - 확장 계약과 ExtensionHandle
//!      │
//!      ▼
//! Core (registry, ordering)
//!      │
//!      ▼
//! Bootstrap (delegate, context)
//! ```
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `BeanDefinition` | [`definition::ComponentDefinition`] |
//! | `RootBeanDefinition` (merged) | [`definition::MergedDefinition`] |
//! | `BeanDefinition.ROLE_*` | [`definition::Role`] |
//! | `*PostProcessor` 인터페이스 | [`extension`] 모듈의 trait들 |

pub mod definition;
pub mod extension;

pub use definition::{Capability, ComponentDefinition, ComponentInstance, MergedDefinition, Role};
pub use extension::{
    Extension, ExtensionHandle, FactoryPostProcessor, InstanceContext, InstancePostProcessor,
    RegistryPostProcessor,
};
