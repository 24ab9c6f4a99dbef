//! # Ordering
//!
//! 확장(post-processor)의 실행 순서를 결정하는 우선순위 모델입니다.
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `PriorityOrdered` 구현 | `OrderSpec::PriorityOrdered(order)` |
//! | `Ordered` 구현 | `OrderSpec::Ordered(order)` |
//! | 아무것도 구현하지 않음 | `OrderSpec::Unordered` |
//! | `OrderComparator.INSTANCE` | [`DefaultOrderComparator`] |
//! | `getDependencyComparator()` | `ComponentFactory::dependency_comparator()` |
//!
//! 정렬은 항상 안정 정렬이므로 같은 순서 값을 가진 확장은
//! 발견된 순서를 그대로 유지합니다.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

/// 가장 높은 우선순위 (가장 먼저 실행)
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// 가장 낮은 우선순위. 순서를 선언하지 않은 확장의 기본값
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// 정의가 선언한 순서 capability와 순서 값
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderSpec {
    /// 다른 모든 순서 선언보다 먼저 처리되는 우선 그룹
    PriorityOrdered(i32),
    /// 일반 순서 선언
    Ordered(i32),
    /// 순서를 선언하지 않음
    #[default]
    Unordered,
}

impl OrderSpec {
    pub fn priority(order: i32) -> Self {
        OrderSpec::PriorityOrdered(order)
    }

    pub fn ordered(order: i32) -> Self {
        OrderSpec::Ordered(order)
    }

    /// 선언된 capability로부터 우선순위 계층을 계산합니다.
    pub fn tier(&self) -> PriorityTier {
        match self {
            OrderSpec::PriorityOrdered(_) => PriorityTier::Highest,
            OrderSpec::Ordered(_) => PriorityTier::Ordered,
            OrderSpec::Unordered => PriorityTier::Unordered,
        }
    }

    /// 비교에 사용할 순서 값. 선언이 없으면 [`LOWEST_PRECEDENCE`]
    pub fn order_value(&self) -> i32 {
        match self {
            OrderSpec::PriorityOrdered(order) | OrderSpec::Ordered(order) => *order,
            OrderSpec::Unordered => LOWEST_PRECEDENCE,
        }
    }

    pub fn is_priority_ordered(&self) -> bool {
        matches!(self, OrderSpec::PriorityOrdered(_))
    }

    /// 우선 그룹도 일반 순서 선언의 한 종류로 취급합니다.
    pub fn is_ordered(&self) -> bool {
        !matches!(self, OrderSpec::Unordered)
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSpec::PriorityOrdered(order) => write!(f, "PriorityOrdered({})", order),
            OrderSpec::Ordered(order) => write!(f, "Ordered({})", order),
            OrderSpec::Unordered => write!(f, "Unordered"),
        }
    }
}

/// 우선순위 계층. 선언 순서가 곧 실행 순서입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriorityTier {
    Highest,
    Ordered,
    Unordered,
}

/// 두 순서 선언을 비교하는 전략
///
/// 팩토리가 자체 비교기를 제공하지 않으면 [`DefaultOrderComparator`]가 사용됩니다.
pub trait OrderComparator: Send + Sync {
    fn compare(&self, left: &OrderSpec, right: &OrderSpec) -> Ordering;
}

/// 기본 비교기
///
/// 1. 우선 그룹(`PriorityOrdered`)이 그 밖의 모든 선언보다 앞섭니다.
/// 2. 같은 그룹 안에서는 순서 값이 작을수록 앞섭니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOrderComparator;

impl OrderComparator for DefaultOrderComparator {
    fn compare(&self, left: &OrderSpec, right: &OrderSpec) -> Ordering {
        match (left.is_priority_ordered(), right.is_priority_ordered()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => left.order_value().cmp(&right.order_value()),
        }
    }
}

/// 전역 기본 비교기 인스턴스
pub static ORDER_COMPARATOR: Lazy<Arc<dyn OrderComparator>> =
    Lazy::new(|| Arc::new(DefaultOrderComparator));

/// 팩토리가 제공한 비교기가 없으면 기본 비교기를 돌려줍니다.
pub fn resolve_comparator(custom: Option<Arc<dyn OrderComparator>>) -> Arc<dyn OrderComparator> {
    custom.unwrap_or_else(|| ORDER_COMPARATOR.clone())
}

/// 순서 선언을 기준으로 안정 정렬합니다.
pub fn sort_by_order<T, K>(items: &mut [T], comparator: &dyn OrderComparator, key: K)
where
    K: Fn(&T) -> &OrderSpec,
{
    items.sort_by(|a, b| comparator.compare(key(a), key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_order_spec() {
        assert_eq!(OrderSpec::priority(5).tier(), PriorityTier::Highest);
        assert_eq!(OrderSpec::ordered(3).tier(), PriorityTier::Ordered);
        assert_eq!(OrderSpec::Unordered.tier(), PriorityTier::Unordered);
        assert!(PriorityTier::Highest < PriorityTier::Ordered);
        assert!(PriorityTier::Ordered < PriorityTier::Unordered);
    }

    #[test]
    fn test_priority_ordered_counts_as_ordered() {
        assert!(OrderSpec::priority(0).is_ordered());
        assert!(OrderSpec::ordered(0).is_ordered());
        assert!(!OrderSpec::Unordered.is_ordered());
    }

    #[test]
    fn test_priority_group_wins_over_lower_order_value() {
        let comparator = DefaultOrderComparator;
        assert_eq!(
            comparator.compare(&OrderSpec::priority(100), &OrderSpec::ordered(-100)),
            Ordering::Less
        );
    }

    #[test]
    fn test_unordered_sorts_last() {
        let comparator = DefaultOrderComparator;
        assert_eq!(
            comparator.compare(&OrderSpec::Unordered, &OrderSpec::ordered(LOWEST_PRECEDENCE - 1)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_orders() {
        let mut items = vec![
            ("b", OrderSpec::ordered(1)),
            ("a", OrderSpec::ordered(0)),
            ("c", OrderSpec::ordered(1)),
            ("d", OrderSpec::ordered(1)),
        ];
        sort_by_order(&mut items, &DefaultOrderComparator, |(_, spec)| spec);

        let names: Vec<_> = items.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_resolve_comparator_falls_back_to_default() {
        let comparator = resolve_comparator(None);
        assert_eq!(
            comparator.compare(&OrderSpec::ordered(1), &OrderSpec::ordered(2)),
            Ordering::Less
        );
    }
}
