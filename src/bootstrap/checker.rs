//! 인스턴스 후처리기 체인이 완성되기 전에 생성된 컴포넌트를 보고합니다.
//!
//! 인스턴스 후처리기 등록 단계에서 가장 먼저 체인에 추가됩니다. 다른 후처리기의
//! 생성 함수가 일반 컴포넌트를 요청하면, 그 컴포넌트는 아직 등록되지 않은
//! 후처리기를 거치지 못한 채 만들어집니다. 이 경우 info 로그를 남기고 계속 진행합니다.

use std::sync::{Mutex, MutexGuard};

use log::info;

use crate::core::errors::ContainerResult;
use crate::domain::definition::ComponentInstance;
use crate::domain::extension::{Extension, InstanceContext, InstancePostProcessor};

#[derive(Debug)]
pub struct PrematureInstantiationChecker {
    target_count: usize,
    reported: Mutex<Vec<String>>,
}

impl PrematureInstantiationChecker {
    /// `target_count`는 모든 후처리기 등록이 끝났을 때의 체인 길이입니다.
    pub fn new(target_count: usize) -> Self {
        Self {
            target_count,
            reported: Mutex::new(Vec::new()),
        }
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// 체인이 완성되기 전에 생성되어 보고된 컴포넌트 이름들
    pub fn reported(&self) -> Vec<String> {
        self.lock_reported().clone()
    }

    fn lock_reported(&self) -> MutexGuard<'_, Vec<String>> {
        self.reported.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Extension for PrematureInstantiationChecker {}

impl InstancePostProcessor for PrematureInstantiationChecker {
    fn after_initialization(
        &self,
        instance: ComponentInstance,
        context: &InstanceContext<'_>,
    ) -> ContainerResult<ComponentInstance> {
        if !context.is_infrastructure() && context.chain_len < self.target_count {
            let type_name = context
                .definition
                .map(|definition| definition.type_name())
                .unwrap_or("unknown");
            info!(
                "⚠️ Component '{}' of type [{}] is not eligible for getting processed by all instance post-processors ({}/{} registered)",
                context.name, type_name, context.chain_len, self.target_count
            );
            self.lock_reported().push(context.name.to_string());
        }
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::definition::{ComponentDefinition, MergedDefinition, Role};

    fn merged(role: Role) -> MergedDefinition {
        let definition = ComponentDefinition::component("clock", |_| Ok(1u32)).with_role(role);
        MergedDefinition::from_ancestry(&definition, &[])
    }

    #[test]
    fn test_reports_incomplete_chain() {
        let checker = PrematureInstantiationChecker::new(3);
        let definition = merged(Role::Application);
        let context = InstanceContext {
            name: "clock",
            definition: Some(&definition),
            chain_len: 1,
        };

        checker.after_initialization(Arc::new(1u32), &context).unwrap();

        assert_eq!(checker.reported(), vec!["clock"]);
    }

    #[test]
    fn test_infrastructure_and_complete_chain_not_reported() {
        let checker = PrematureInstantiationChecker::new(3);
        let infrastructure = merged(Role::Infrastructure);
        let application = merged(Role::Application);

        let early = InstanceContext {
            name: "clock",
            definition: Some(&infrastructure),
            chain_len: 1,
        };
        let complete = InstanceContext {
            name: "clock",
            definition: Some(&application),
            chain_len: 3,
        };
        checker.after_initialization(Arc::new(1u32), &early).unwrap();
        checker.after_initialization(Arc::new(1u32), &complete).unwrap();

        assert!(checker.reported().is_empty());
    }
}
