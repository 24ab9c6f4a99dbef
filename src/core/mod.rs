//! # Core Container Module
//!
//! 컴포넌트 컨테이너의 핵심 기능을 제공하는 모듈입니다.
//! Spring Framework의 `BeanFactory` 계층을 Rust 생태계에 맞게 구현합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 정의 저장소와 팩토리
//! - **ComponentRegistry**: 삽입 순서를 유지하는 정의 저장소
//! - **ComponentFactory**: 확장/컴포넌트 인스턴스화, 인스턴스 후처리기 체인
//! - **DefaultComponentFactory**: 두 계약의 기본 구현
//!
//! ### [`ordering`] - 우선순위 정렬
//! - **OrderSpec / PriorityTier**: `PriorityOrdered` / `Ordered` / 무순서 구분
//! - **OrderComparator**: 교체 가능한 안정 정렬 비교기
//!
//! ### [`errors`] - 통합 에러 처리
//! - **ContainerError**: 컨테이너 전역 에러 타입
//! - **자동 변환**: thiserror 기반 에러 메시지
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 프레임워크 |
//! |--------|---------------|
//! | `BeanDefinitionRegistry` | `ComponentRegistry` |
//! | `ConfigurableListableBeanFactory` | `ComponentFactory` |
//! | `OrderComparator` | `OrderComparator` / `DefaultOrderComparator` |
//! | `BeansException` | `ContainerError` |

pub mod errors;
pub mod ordering;
pub mod registry;

pub use errors::{ContainerError, ContainerResult, ErrorContext};
pub use ordering::{OrderComparator, OrderSpec, PriorityTier};
pub use registry::{ComponentFactory, ComponentRegistry, DefaultComponentFactory};
