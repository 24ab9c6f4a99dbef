//! # Extension Capabilities
//!
//! 부트스트랩 중 컨테이너에 개입하는 세 가지 확장 계열을 정의합니다.
//!
//! | Spring | 이 시스템 | 개입 시점 |
//! |--------|-----------|-----------|
//! | `BeanDefinitionRegistryPostProcessor` | [`RegistryPostProcessor`] | 정의 등록/제거 |
//! | `BeanFactoryPostProcessor` | [`FactoryPostProcessor`] | 정의 메타데이터 변경 |
//! | `BeanPostProcessor` | [`InstancePostProcessor`] | 인스턴스 생성 직후 |
//! | `MergedBeanDefinitionPostProcessor` | `InstancePostProcessor::is_merged_definition_aware` | 병합 정의 확정 직후 |
//!
//! `instanceof` 검사 대신, 확장은 인스턴스화 시점에 한 번 [`ExtensionHandle`]의
//! 변형으로 분류되고 이후에는 그 분류만 사용합니다.

use std::fmt;
use std::sync::Arc;

use crate::core::errors::{ContainerError, ContainerResult};
use crate::core::registry::{ComponentFactory, ComponentRegistry};
use crate::domain::definition::{Capability, ComponentInstance, MergedDefinition, Role};

/// 모든 확장의 공통 인터페이스
pub trait Extension: Send + Sync {
    /// 로그와 보고서에 표시할 이름. 기본값은 구현 타입의 전체 경로입니다.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// 팩토리 메타데이터를 변경하는 확장
pub trait FactoryPostProcessor: Extension {
    fn post_process_factory(&self, factory: &mut dyn ComponentFactory) -> ContainerResult<()>;
}

/// 레지스트리에 정의를 추가하거나 제거하는 확장
///
/// 레지스트리 훅이 먼저 실행되고, 모든 레지스트리 후처리가 끝난 뒤
/// 팩토리 훅이 한 번 더 실행됩니다.
pub trait RegistryPostProcessor: FactoryPostProcessor {
    fn post_process_registry(&self, registry: &mut dyn ComponentRegistry) -> ContainerResult<()>;
}

/// 인스턴스 후처리기에 전달되는 생성 정보
#[derive(Debug, Clone, Copy)]
pub struct InstanceContext<'a> {
    /// 생성 중인 컴포넌트 이름
    pub name: &'a str,
    /// 병합된 정의. 정의 없이 등록된 인스턴스면 `None`
    pub definition: Option<&'a MergedDefinition>,
    /// 생성 시점에 등록되어 있던 인스턴스 후처리기 수
    pub chain_len: usize,
}

impl InstanceContext<'_> {
    pub fn role(&self) -> Option<Role> {
        self.definition.map(|definition| definition.role())
    }

    pub fn is_infrastructure(&self) -> bool {
        self.role() == Some(Role::Infrastructure)
    }
}

/// 생성된 인스턴스를 가로채는 확장
///
/// 두 훅 모두 인스턴스를 그대로 돌려주는 것이 기본 동작이며,
/// 다른 인스턴스(예: 프록시)로 교체해 돌려줄 수도 있습니다.
pub trait InstancePostProcessor: Extension {
    fn before_initialization(
        &self,
        instance: ComponentInstance,
        _context: &InstanceContext<'_>,
    ) -> ContainerResult<ComponentInstance> {
        Ok(instance)
    }

    fn after_initialization(
        &self,
        instance: ComponentInstance,
        _context: &InstanceContext<'_>,
    ) -> ContainerResult<ComponentInstance> {
        Ok(instance)
    }

    /// 병합 정의 훅을 사용하는 후처리기인지 여부
    ///
    /// `true`인 후처리기는 등록 단계 마지막에 한 번 더 등록되어 체인 뒤쪽으로 이동합니다.
    fn is_merged_definition_aware(&self) -> bool {
        false
    }

    fn post_process_merged_definition(&self, _definition: &MergedDefinition, _name: &str) -> ContainerResult<()> {
        Ok(())
    }
}

/// 인스턴스화가 끝난 확장. 계열은 생성 시점에 한 번만 결정됩니다.
#[derive(Clone)]
pub enum ExtensionHandle {
    Registry(Arc<dyn RegistryPostProcessor>),
    Factory(Arc<dyn FactoryPostProcessor>),
    Instance(Arc<dyn InstancePostProcessor>),
}

impl ExtensionHandle {
    pub fn registry(processor: impl RegistryPostProcessor + 'static) -> Self {
        ExtensionHandle::Registry(Arc::new(processor))
    }

    pub fn factory(processor: impl FactoryPostProcessor + 'static) -> Self {
        ExtensionHandle::Factory(Arc::new(processor))
    }

    pub fn instance(processor: impl InstancePostProcessor + 'static) -> Self {
        ExtensionHandle::Instance(Arc::new(processor))
    }

    pub fn name(&self) -> &str {
        match self {
            ExtensionHandle::Registry(processor) => processor.name(),
            ExtensionHandle::Factory(processor) => processor.name(),
            ExtensionHandle::Instance(processor) => processor.name(),
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            ExtensionHandle::Registry(_) => Capability::RegistryPostProcessor,
            ExtensionHandle::Factory(_) => Capability::FactoryPostProcessor,
            ExtensionHandle::Instance(_) => Capability::InstancePostProcessor,
        }
    }

    pub fn as_registry(&self) -> Option<&Arc<dyn RegistryPostProcessor>> {
        match self {
            ExtensionHandle::Registry(processor) => Some(processor),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Arc<dyn InstancePostProcessor>> {
        match self {
            ExtensionHandle::Instance(processor) => Some(processor),
            _ => None,
        }
    }

    /// 팩토리 훅을 가진 확장인지 확인합니다.
    ///
    /// 인스턴스 후처리기는 외부 팩토리 확장으로 전달될 수 없습니다.
    pub fn ensure_factory_capable(&self) -> ContainerResult<()> {
        match self {
            ExtensionHandle::Instance(processor) => Err(ContainerError::TypeMismatch {
                name: processor.name().to_string(),
                expected: Capability::FactoryPostProcessor.to_string(),
                actual: Capability::InstancePostProcessor.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// 팩토리 훅을 실행합니다. 레지스트리 후처리기도 팩토리 훅을 가집니다.
    pub fn invoke_factory_hook(&self, factory: &mut dyn ComponentFactory) -> ContainerResult<()> {
        match self {
            ExtensionHandle::Registry(processor) => processor.post_process_factory(factory),
            ExtensionHandle::Factory(processor) => processor.post_process_factory(factory),
            ExtensionHandle::Instance(_) => self.ensure_factory_capable(),
        }
    }
}

impl fmt::Debug for ExtensionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionHandle")
            .field("name", &self.name())
            .field("capability", &self.capability())
            .finish()
    }
}
