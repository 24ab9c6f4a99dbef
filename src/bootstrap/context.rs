//! # Bootstrap Context
//!
//! 팩토리와 외부 확장 목록을 묶어 한 번의 `refresh`로 부트스트랩을 수행합니다.
//! Spring의 `GenericApplicationContext.refresh()` 흐름을 단순화한 형태입니다.
//!
//! ```text
//! refresh()
//! ├─ 1~6단계: 레지스트리/팩토리 후처리기 실행
//! ├─ 7단계: 인스턴스 후처리기 등록
//! ├─ 지연 초기화가 아닌 싱글톤 미리 생성
//! └─ BootstrapReport 작성
//! ```
//!
//! 컨텍스트는 한 번만 refresh 할 수 있습니다. 실패한 refresh 이후에도 다시 시도할 수 없습니다.

use std::any::Any;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{error, info};
use serde::Serialize;
use uuid::Uuid;

use crate::core::errors::{ContainerError, ContainerResult};
use crate::core::registry::{ComponentFactory, ComponentRegistry, DefaultComponentFactory};
use crate::domain::definition::ComponentDefinition;
use crate::domain::extension::ExtensionHandle;

use super::delegate::{run_bootstrap_extensions_with, BootstrapOptions};
use super::detector::ListenerDetector;

/// 부트스트랩 결과 요약
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapReport {
    pub context_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// 처리 순서대로의 레지스트리 후처리기 이름
    pub processed_extensions: Vec<String>,
    pub registry_passes: usize,
    pub factory_hooks_invoked: usize,
    /// 최종 인스턴스 후처리기 체인
    pub instance_post_processors: Vec<String>,
    pub singletons_created: usize,
    /// 체인이 완성되기 전에 생성된 컴포넌트
    pub premature_components: Vec<String>,
    pub event_listeners: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContextState {
    Created,
    Active,
    Failed,
}

pub struct BootstrapContext {
    id: Uuid,
    factory: DefaultComponentFactory,
    factory_post_processors: Vec<ExtensionHandle>,
    options: BootstrapOptions,
    state: ContextState,
    report: Option<BootstrapReport>,
    detector: Option<Arc<ListenerDetector>>,
}

impl Default for BootstrapContext {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapContext {
    pub fn new() -> Self {
        Self::with_factory(DefaultComponentFactory::new(), BootstrapOptions::default())
    }

    /// 환경 변수 설정(`CONTAINER_*`)을 반영한 컨텍스트
    pub fn from_env() -> ContainerResult<Self> {
        Ok(Self::with_factory(
            DefaultComponentFactory::from_env()?,
            BootstrapOptions::from_env()?,
        ))
    }

    pub fn with_factory(factory: DefaultComponentFactory, options: BootstrapOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            factory,
            factory_post_processors: Vec::new(),
            options,
            state: ContextState::Created,
            report: None,
            detector: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.state == ContextState::Active
    }

    pub fn factory(&self) -> &DefaultComponentFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut DefaultComponentFactory {
        &mut self.factory
    }

    pub fn register_definition(&mut self, definition: ComponentDefinition) -> ContainerResult<()> {
        self.factory.register_definition(definition)
    }

    /// refresh 시 1단계에서 사용할 외부 확장을 추가합니다.
    pub fn add_factory_post_processor(&mut self, handle: ExtensionHandle) -> ContainerResult<()> {
        self.assert_not_refreshed()?;
        handle.ensure_factory_capable()?;
        self.factory_post_processors.push(handle);
        Ok(())
    }

    pub fn refresh(&mut self) -> ContainerResult<&BootstrapReport> {
        self.assert_not_refreshed()?;

        info!("🚀 Refreshing context {}", self.id);
        match self.run_refresh() {
            Ok(report) => {
                self.state = ContextState::Active;
                info!(
                    "✅ Context {} refreshed: {} singletons, {} instance post-processors",
                    self.id,
                    report.singletons_created,
                    report.instance_post_processors.len()
                );
                Ok(&*self.report.insert(report))
            }
            Err(e) => {
                self.state = ContextState::Failed;
                error!("❌ Context {} refresh failed: {}", self.id, e);
                Err(e)
            }
        }
    }

    fn run_refresh(&mut self) -> ContainerResult<BootstrapReport> {
        let started_at = Utc::now();
        let outcome = run_bootstrap_extensions_with(&mut self.factory, &self.factory_post_processors, &self.options)?;
        self.detector = Some(outcome.detector.clone());

        let singletons_created = self.factory.preinstantiate_singletons()?;

        Ok(BootstrapReport {
            context_id: self.id,
            started_at,
            finished_at: Utc::now(),
            processed_extensions: outcome.processed.names().to_vec(),
            registry_passes: outcome.stats.registry_passes,
            factory_hooks_invoked: outcome.stats.factory_hooks_invoked,
            instance_post_processors: self.factory.instance_post_processor_names(),
            singletons_created,
            premature_components: outcome.checker.reported(),
            event_listeners: outcome.detector.detected(),
        })
    }

    fn assert_not_refreshed(&self) -> ContainerResult<()> {
        if self.state != ContextState::Created {
            return Err(ContainerError::InvalidState(format!(
                "context {} has already been refreshed",
                self.id
            )));
        }
        Ok(())
    }

    fn assert_active(&self) -> ContainerResult<()> {
        if self.state != ContextState::Active {
            return Err(ContainerError::InvalidState(format!(
                "context {} is not active",
                self.id
            )));
        }
        Ok(())
    }

    pub fn report(&self) -> Option<&BootstrapReport> {
        self.report.as_ref()
    }

    /// 지금까지 감지된 이벤트 리스너. refresh 이후 생성된 지연 컴포넌트도 포함됩니다.
    pub fn event_listeners(&self) -> Vec<String> {
        self.detector
            .as_ref()
            .map(|detector| detector.detected())
            .unwrap_or_default()
    }

    pub fn get_component_as<T: Any + Send + Sync>(&mut self, name: &str) -> ContainerResult<Arc<T>> {
        self.assert_active()?;
        self.factory.get_component_as(name)
    }
}
