//! 트랜잭션 롤백 규칙 설정
//!
//! ```bash
//! export TX_ROLLBACK_FOR="io::IOException,Timeout"
//! export TX_NO_ROLLBACK_FOR="RemoteAccessException"
//! ```

use std::env;

use crate::core::errors::ContainerResult;
use crate::transaction::{RollbackRule, RuleBasedTransactionAttribute, TransactionRule};
use crate::utils::string_utils::split_patterns;

/// 환경 변수 기반 기본 트랜잭션 속성
pub struct TransactionConfig;

impl TransactionConfig {
    /// `TX_ROLLBACK_FOR`에 설정된 롤백 패턴 목록
    pub fn rollback_for() -> Vec<String> {
        env::var("TX_ROLLBACK_FOR")
            .map(|value| split_patterns(&value))
            .unwrap_or_default()
    }

    /// `TX_NO_ROLLBACK_FOR`에 설정된 비롤백 패턴 목록
    pub fn no_rollback_for() -> Vec<String> {
        env::var("TX_NO_ROLLBACK_FOR")
            .map(|value| split_patterns(&value))
            .unwrap_or_default()
    }

    /// 설정된 패턴으로 만든 기본 트랜잭션 속성. 롤백 규칙이 먼저 옵니다.
    pub fn default_attribute() -> ContainerResult<RuleBasedTransactionAttribute> {
        build_attribute(&Self::rollback_for(), &Self::no_rollback_for())
    }
}

fn build_attribute(rollback_for: &[String], no_rollback_for: &[String]) -> ContainerResult<RuleBasedTransactionAttribute> {
    let mut rules = Vec::with_capacity(rollback_for.len() + no_rollback_for.len());
    for pattern in rollback_for {
        rules.push(TransactionRule::Rollback(RollbackRule::from_pattern(pattern.as_str())?));
    }
    for pattern in no_rollback_for {
        rules.push(TransactionRule::NoRollback(RollbackRule::from_pattern(pattern.as_str())?));
    }
    Ok(RuleBasedTransactionAttribute::new(rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::error_type::IO_EXCEPTION;

    #[test]
    fn test_build_attribute_orders_rollback_first() {
        let attribute = build_attribute(
            &["IOException".to_string()],
            &["io::".to_string()],
        )
        .unwrap();

        assert_eq!(attribute.rules().len(), 2);
        assert!(attribute.rules()[0].rolls_back());
        // 같은 깊이면 먼저 등록된 롤백 규칙이 이김
        assert!(attribute.rollback_on_type(&IO_EXCEPTION));
    }

    #[test]
    fn test_build_attribute_empty() {
        let attribute = build_attribute(&[], &[]).unwrap();
        assert!(attribute.rules().is_empty());
    }
}
