//! # Transaction Rollback Rules
//!
//! 트랜잭션 경계에서 발생한 에러의 롤백 여부를 결정하는 모듈입니다.
//!
//! - [`error_type`] - 정적 에러 타입 계층 ([`TypeDescriptor`], [`Throwable`])
//! - [`rollback`] - 패턴 매칭 규칙 ([`RollbackRule`], [`TransactionRule`])
//! - [`attribute`] - 규칙 목록으로 롤백 여부 결정 ([`RuleBasedTransactionAttribute`])

pub mod attribute;
pub mod error_type;
pub mod rollback;

pub use attribute::RuleBasedTransactionAttribute;
pub use error_type::{Throwable, TypeDescriptor};
pub use rollback::{RollbackRule, TransactionRule, ROLLBACK_ON_RUNTIME_EXCEPTIONS};
