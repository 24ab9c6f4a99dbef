//! 규칙 기반 트랜잭션 속성
//!
//! 여러 롤백/비롤백 규칙 중 발생한 에러와 가장 가깝게 일치하는 규칙 하나로
//! 롤백 여부를 결정합니다. 일치하는 규칙이 없으면 런타임 예외와 `Error` 계열만 롤백합니다.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::transaction::error_type::{Throwable, TypeDescriptor, ERROR, RUNTIME_EXCEPTION};
use crate::transaction::rollback::{RollbackRule, TransactionRule};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBasedTransactionAttribute {
    rules: Vec<TransactionRule>,
}

impl RuleBasedTransactionAttribute {
    pub fn new(rules: Vec<TransactionRule>) -> Self {
        Self { rules }
    }

    pub fn rollback_for(mut self, rule: RollbackRule) -> Self {
        self.rules.push(TransactionRule::Rollback(rule));
        self
    }

    pub fn no_rollback_for(mut self, rule: RollbackRule) -> Self {
        self.rules.push(TransactionRule::NoRollback(rule));
        self
    }

    pub fn rules(&self) -> &[TransactionRule] {
        &self.rules
    }

    /// 가장 얕은 깊이로 일치한 규칙. 깊이가 같으면 먼저 등록된 규칙이 이깁니다.
    pub fn winning_rule(&self, error_type: &TypeDescriptor) -> Option<&TransactionRule> {
        let mut winner: Option<(i32, &TransactionRule)> = None;
        for rule in &self.rules {
            let depth = rule.depth(error_type);
            if depth >= 0 && winner.is_none_or(|(best, _)| depth < best) {
                winner = Some((depth, rule));
            }
        }
        winner.map(|(_, rule)| rule)
    }

    pub fn rollback_on_type(&self, error_type: &TypeDescriptor) -> bool {
        match self.winning_rule(error_type) {
            Some(rule) => {
                trace!("Winning rule for {}: {}", error_type, rule);
                rule.rolls_back()
            }
            None => {
                trace!("No rule matched {}, using default policy", error_type);
                error_type.is_subtype_of(&RUNTIME_EXCEPTION) || error_type.is_subtype_of(&ERROR)
            }
        }
    }

    pub fn rollback_on(&self, error: &dyn Throwable) -> bool {
        self.rollback_on_type(error.error_type())
    }
}
