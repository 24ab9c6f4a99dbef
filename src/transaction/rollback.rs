//! # Rollback Rules
//!
//! 발생한 에러 타입이 설정된 패턴과 얼마나 가깝게 일치하는지를 계산합니다.
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `RollbackRuleAttribute` | [`RollbackRule`] |
//! | `NoRollbackRuleAttribute` | [`TransactionRule::NoRollback`] |
//! | `getDepth(Throwable)` | [`RollbackRule::depth_of`] |
//! | `ROLLBACK_ON_RUNTIME_EXCEPTIONS` | [`ROLLBACK_ON_RUNTIME_EXCEPTIONS`] |
//!
//! ## 매칭 정책
//!
//! 패턴은 **부분 문자열**로 비교됩니다. `"IOException"` 패턴은 정규화된 이름에
//! 그 문자열이 포함된 모든 타입과 일치합니다. `"Exception"`처럼 짧은 패턴은
//! 거의 모든 타입과 일치하므로 주의가 필요합니다.
//!
//! ```text
//! billing::PaymentDeclinedException   depth 0
//! lang::RuntimeException              depth 1  ← "RuntimeException" 패턴은 여기서 멈춤
//! lang::Exception                     depth 2
//! lang::Throwable                     depth 3  ← 여기까지 없으면 -1
//! ```

use std::fmt;

use log::trace;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::errors::{ContainerError, ContainerResult};
use crate::transaction::error_type::{Throwable, TypeDescriptor, RUNTIME_EXCEPTION};
use crate::utils::string_utils::is_valid_string;

/// 런타임 예외 계열에서 롤백하는 기본 규칙
pub static ROLLBACK_ON_RUNTIME_EXCEPTIONS: Lazy<RollbackRule> = Lazy::new(|| RollbackRule {
    pattern: RUNTIME_EXCEPTION.qualified_name().to_string(),
});

/// 에러 타입 패턴 하나를 담는 불변 규칙
///
/// 두 규칙은 패턴 문자열이 같을 때만 같습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RollbackRule {
    pattern: String,
}

impl RollbackRule {
    /// 구체 에러 타입으로부터 규칙을 만듭니다. 패턴은 타입의 정규화된 이름입니다.
    ///
    /// # Errors
    ///
    /// 에러 계층에 속하지 않는 타입이면 [`ContainerError::InvalidRule`]
    pub fn for_type(error_type: &TypeDescriptor) -> ContainerResult<Self> {
        if !error_type.is_error_type() {
            return Err(ContainerError::InvalidRule(format!(
                "cannot construct rollback rule from [{}]: it is not an error type",
                error_type.qualified_name()
            )));
        }
        Ok(Self {
            pattern: error_type.qualified_name().to_string(),
        })
    }

    /// 문자열 패턴으로 규칙을 만듭니다. 패턴은 가공 없이 그대로 사용됩니다.
    ///
    /// # Errors
    ///
    /// 빈 패턴이면 [`ContainerError::InvalidRule`]
    pub fn from_pattern(pattern: impl Into<String>) -> ContainerResult<Self> {
        let pattern = pattern.into();
        if !is_valid_string(&pattern) {
            return Err(ContainerError::InvalidRule(
                "rollback rule pattern must not be empty".to_string(),
            ));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// 에러 타입에서 패턴과 처음 일치하는 조상까지의 거리
    ///
    /// 자기 자신이 일치하면 0, 에러 루트까지 일치하는 조상이 없으면 -1 입니다.
    pub fn depth(&self, error_type: &TypeDescriptor) -> i32 {
        let mut depth = 0;
        for ancestor in error_type.ancestors() {
            if ancestor.qualified_name().contains(self.pattern.as_str()) {
                trace!("{} matched {} at depth {}", self, error_type, depth);
                return depth;
            }
            if ancestor.is_root_error() {
                break;
            }
            depth += 1;
        }
        -1
    }

    pub fn depth_of(&self, error: &dyn Throwable) -> i32 {
        self.depth(error.error_type())
    }
}

impl TryFrom<String> for RollbackRule {
    type Error = ContainerError;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Self::from_pattern(pattern)
    }
}

impl From<RollbackRule> for String {
    fn from(rule: RollbackRule) -> Self {
        rule.pattern
    }
}

impl fmt::Display for RollbackRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RollbackRule with pattern [{}]", self.pattern)
    }
}

/// 롤백 또는 커밋을 강제하는 규칙
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pattern", rename_all = "snake_case")]
pub enum TransactionRule {
    Rollback(RollbackRule),
    NoRollback(RollbackRule),
}

impl TransactionRule {
    pub fn rule(&self) -> &RollbackRule {
        match self {
            TransactionRule::Rollback(rule) | TransactionRule::NoRollback(rule) => rule,
        }
    }

    pub fn rolls_back(&self) -> bool {
        matches!(self, TransactionRule::Rollback(_))
    }

    pub fn depth(&self, error_type: &TypeDescriptor) -> i32 {
        self.rule().depth(error_type)
    }
}

impl fmt::Display for TransactionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionRule::Rollback(rule) => write!(f, "+{}", rule.pattern()),
            TransactionRule::NoRollback(rule) => write!(f, "-{}", rule.pattern()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::error_type::{ARITHMETIC, EXCEPTION, IO_EXCEPTION, OBJECT, THROWABLE};

    static PAYMENT_DECLINED: TypeDescriptor =
        TypeDescriptor::new("billing::PaymentDeclinedException", &RUNTIME_EXCEPTION);

    #[derive(Debug, thiserror::Error)]
    #[error("payment declined")]
    struct PaymentDeclined;

    impl Throwable for PaymentDeclined {
        fn error_type(&self) -> &'static TypeDescriptor {
            &PAYMENT_DECLINED
        }
    }

    #[test]
    fn test_rule_from_own_type_has_depth_zero() {
        let rule = RollbackRule::for_type(&PAYMENT_DECLINED).unwrap();
        assert_eq!(rule.depth(&PAYMENT_DECLINED), 0);
        assert_eq!(rule.pattern(), "billing::PaymentDeclinedException");
    }

    #[test]
    fn test_first_matching_ancestor_wins() {
        let rule = RollbackRule::from_pattern("RuntimeException").unwrap();
        assert_eq!(rule.depth_of(&PaymentDeclined), 1);

        // "Exception"은 자기 자신에서 먼저 일치
        let broad = RollbackRule::from_pattern("Exception").unwrap();
        assert_eq!(broad.depth(&PAYMENT_DECLINED), 0);
    }

    #[test]
    fn test_no_match_returns_minus_one() {
        let rule = RollbackRule::from_pattern("ServletException").unwrap();
        assert_eq!(rule.depth(&PAYMENT_DECLINED), -1);
        assert_eq!(rule.depth(&THROWABLE), -1);
    }

    #[test]
    fn test_walk_stops_at_error_root() {
        // Object는 Throwable 위에 있으므로 절대 일치하지 않음
        let rule = RollbackRule::from_pattern("lang::Object").unwrap();
        assert_eq!(rule.depth(&ARITHMETIC), -1);

        let root = RollbackRule::for_type(&THROWABLE).unwrap();
        assert_eq!(root.depth(&ARITHMETIC), 3);
    }

    #[test]
    fn test_substring_matching() {
        let rule = RollbackRule::from_pattern("io::").unwrap();
        assert_eq!(rule.depth(&IO_EXCEPTION), 0);
        assert_eq!(rule.depth(&ARITHMETIC), -1);
    }

    #[test]
    fn test_non_error_type_rejected() {
        let result = RollbackRule::for_type(&OBJECT);
        assert!(matches!(result, Err(ContainerError::InvalidRule(_))));
    }

    #[test]
    fn test_blank_pattern_rejected() {
        assert!(matches!(RollbackRule::from_pattern(""), Err(ContainerError::InvalidRule(_))));
        assert!(matches!(RollbackRule::from_pattern("  "), Err(ContainerError::InvalidRule(_))));
    }

    #[test]
    fn test_pattern_kept_verbatim() {
        let rule = RollbackRule::from_pattern(" Timeout").unwrap();
        assert_eq!(rule.pattern(), " Timeout");
    }

    #[test]
    fn test_equality_by_pattern() {
        let from_type = RollbackRule::for_type(&EXCEPTION).unwrap();
        let from_pattern = RollbackRule::from_pattern("lang::Exception").unwrap();
        assert_eq!(from_type, from_pattern);
        assert_ne!(from_type, RollbackRule::from_pattern("Exception").unwrap());
    }

    #[test]
    fn test_runtime_exception_constant() {
        assert_eq!(ROLLBACK_ON_RUNTIME_EXCEPTIONS.depth(&ARITHMETIC), 1);
        assert_eq!(ROLLBACK_ON_RUNTIME_EXCEPTIONS.depth(&IO_EXCEPTION), -1);
        assert_eq!(
            ROLLBACK_ON_RUNTIME_EXCEPTIONS.to_string(),
            "RollbackRule with pattern [lang::RuntimeException]"
        );
    }

    #[test]
    fn test_serde_validates_pattern() {
        let rule: TransactionRule =
            serde_json::from_str(r#"{"kind":"no_rollback","pattern":"IOException"}"#).unwrap();
        assert!(!rule.rolls_back());
        assert_eq!(rule.rule().pattern(), "IOException");

        let invalid = serde_json::from_str::<RollbackRule>(r#""""#);
        assert!(invalid.is_err());
    }
}
