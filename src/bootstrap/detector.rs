//! 이벤트 리스너로 선언된 컴포넌트를 감지하는 인스턴스 후처리기
//!
//! Spring의 `ApplicationListenerDetector`에 해당하며, 항상 체인의 마지막에 등록됩니다.

use std::sync::{Mutex, MutexGuard};

use log::debug;

use crate::core::errors::ContainerResult;
use crate::domain::definition::{Capability, ComponentInstance};
use crate::domain::extension::{Extension, InstanceContext, InstancePostProcessor};

#[derive(Debug, Default)]
pub struct ListenerDetector {
    detected: Mutex<Vec<String>>,
}

impl ListenerDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 감지된 리스너 이름 (생성 순서)
    pub fn detected(&self) -> Vec<String> {
        self.lock_detected().clone()
    }

    fn lock_detected(&self) -> MutexGuard<'_, Vec<String>> {
        self.detected.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Extension for ListenerDetector {}

impl InstancePostProcessor for ListenerDetector {
    fn after_initialization(
        &self,
        instance: ComponentInstance,
        context: &InstanceContext<'_>,
    ) -> ContainerResult<ComponentInstance> {
        let is_listener = context
            .definition
            .is_some_and(|definition| definition.declares(Capability::EventListener));
        if is_listener {
            let mut detected = self.lock_detected();
            if !detected.iter().any(|name| name == context.name) {
                debug!("👂 Detected event listener '{}'", context.name);
                detected.push(context.name.to_string());
            }
        }
        Ok(instance)
    }
}
