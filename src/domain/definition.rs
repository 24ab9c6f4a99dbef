//! # Component Definition
//!
//! 컨테이너가 생성할 객체에 대한 이름 붙은 설명서입니다.
//! Spring의 `BeanDefinition`에서 부트스트랩 파이프라인이 실제로 참조하는
//! 부분(역할, 순서 선언, 생성 함수, 속성 값, 부모 정의)만 남겼습니다.
//!
//! 정의는 레지스트리가 소유하며, 부트스트랩 동안 레지스트리/팩토리
//! 후처리기에 의해 변경될 수 있습니다.

use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::core::errors::ContainerResult;
use crate::core::ordering::OrderSpec;
use crate::core::registry::ComponentFactory;
use crate::domain::extension::{FactoryPostProcessor, InstancePostProcessor, RegistryPostProcessor};

/// 컨테이너가 관리하는 일반 컴포넌트 인스턴스
pub type ComponentInstance = Arc<dyn Any + Send + Sync>;

/// 팩토리를 받아 인스턴스를 만드는 생성 함수
///
/// 생성 함수 안에서 다른 컴포넌트를 요청할 수 있도록 팩토리가 전달됩니다.
pub type Supplier<T> = Arc<dyn Fn(&mut dyn ComponentFactory) -> ContainerResult<T> + Send + Sync>;

/// 정의의 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// 애플리케이션이 직접 정의한 컴포넌트
    #[default]
    Application,
    /// 대규모 설정의 일부로 들어온 보조 컴포넌트
    Support,
    /// 컨테이너 내부 동작을 위한 인프라 컴포넌트
    Infrastructure,
}

/// 레지스트리에서 이름을 조회할 때 쓰는 capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Component,
    RegistryPostProcessor,
    FactoryPostProcessor,
    InstancePostProcessor,
    EventListener,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Capability::Component => "component",
            Capability::RegistryPostProcessor => "registry post-processor",
            Capability::FactoryPostProcessor => "factory post-processor",
            Capability::InstancePostProcessor => "instance post-processor",
            Capability::EventListener => "event listener",
        };
        f.write_str(label)
    }
}

/// 정의가 만들어 내는 객체의 종류와 생성 함수
#[derive(Clone)]
pub enum ComponentKind {
    Component(Supplier<ComponentInstance>),
    RegistryPostProcessor(Supplier<Arc<dyn RegistryPostProcessor>>),
    FactoryPostProcessor(Supplier<Arc<dyn FactoryPostProcessor>>),
    InstancePostProcessor(Supplier<Arc<dyn InstancePostProcessor>>),
}

impl ComponentKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ComponentKind::Component(_) => "component",
            ComponentKind::RegistryPostProcessor(_) => "registry post-processor",
            ComponentKind::FactoryPostProcessor(_) => "factory post-processor",
            ComponentKind::InstancePostProcessor(_) => "instance post-processor",
        }
    }

    /// 레지스트리 후처리기는 팩토리 후처리기 capability도 함께 가집니다.
    pub fn declares(&self, capability: Capability) -> bool {
        matches!(
            (self, capability),
            (ComponentKind::Component(_), Capability::Component)
                | (ComponentKind::RegistryPostProcessor(_), Capability::RegistryPostProcessor)
                | (ComponentKind::RegistryPostProcessor(_), Capability::FactoryPostProcessor)
                | (ComponentKind::FactoryPostProcessor(_), Capability::FactoryPostProcessor)
                | (ComponentKind::InstancePostProcessor(_), Capability::InstancePostProcessor)
        )
    }
}

/// 컴포넌트 정의
///
/// # Examples
///
/// ```rust,ignore
/// let definition = ComponentDefinition::component("dataSource", |_| Ok(DataSource::default()))
///     .with_role(Role::Infrastructure)
///     .with_attribute("url", "${db.url}");
///
/// let scanner = ComponentDefinition::registry_post_processor("scanner", |_| Ok(Scanner))
///     .with_order(OrderSpec::priority(0));
/// ```
#[derive(Clone)]
pub struct ComponentDefinition {
    name: String,
    type_name: String,
    kind: ComponentKind,
    role: Role,
    order: OrderSpec,
    parent: Option<String>,
    attributes: BTreeMap<String, String>,
    lazy_init: bool,
    abstract_template: bool,
    event_listener: bool,
}

impl ComponentDefinition {
    fn new(name: impl Into<String>, type_name: &str, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.to_string(),
            kind,
            role: Role::default(),
            order: OrderSpec::default(),
            parent: None,
            attributes: BTreeMap::new(),
            lazy_init: false,
            abstract_template: false,
            event_listener: false,
        }
    }

    /// 일반 컴포넌트 정의
    pub fn component<T, F>(name: impl Into<String>, supplier: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut dyn ComponentFactory) -> ContainerResult<T> + Send + Sync + 'static,
    {
        let supplier: Supplier<ComponentInstance> = Arc::new(move |factory: &mut dyn ComponentFactory| {
            supplier(factory).map(|instance| Arc::new(instance) as ComponentInstance)
        });
        Self::new(name, type_name::<T>(), ComponentKind::Component(supplier))
    }

    /// 레지스트리 후처리기 정의
    pub fn registry_post_processor<P, F>(name: impl Into<String>, supplier: F) -> Self
    where
        P: RegistryPostProcessor + 'static,
        F: Fn(&mut dyn ComponentFactory) -> ContainerResult<P> + Send + Sync + 'static,
    {
        let supplier: Supplier<Arc<dyn RegistryPostProcessor>> = Arc::new(move |factory: &mut dyn ComponentFactory| {
            supplier(factory).map(|processor| Arc::new(processor) as Arc<dyn RegistryPostProcessor>)
        });
        Self::new(name, type_name::<P>(), ComponentKind::RegistryPostProcessor(supplier))
    }

    /// 팩토리 후처리기 정의
    pub fn factory_post_processor<P, F>(name: impl Into<String>, supplier: F) -> Self
    where
        P: FactoryPostProcessor + 'static,
        F: Fn(&mut dyn ComponentFactory) -> ContainerResult<P> + Send + Sync + 'static,
    {
        let supplier: Supplier<Arc<dyn FactoryPostProcessor>> = Arc::new(move |factory: &mut dyn ComponentFactory| {
            supplier(factory).map(|processor| Arc::new(processor) as Arc<dyn FactoryPostProcessor>)
        });
        Self::new(name, type_name::<P>(), ComponentKind::FactoryPostProcessor(supplier))
    }

    /// 인스턴스 후처리기 정의
    pub fn instance_post_processor<P, F>(name: impl Into<String>, supplier: F) -> Self
    where
        P: InstancePostProcessor + 'static,
        F: Fn(&mut dyn ComponentFactory) -> ContainerResult<P> + Send + Sync + 'static,
    {
        let supplier: Supplier<Arc<dyn InstancePostProcessor>> = Arc::new(move |factory: &mut dyn ComponentFactory| {
            supplier(factory).map(|processor| Arc::new(processor) as Arc<dyn InstancePostProcessor>)
        });
        Self::new(name, type_name::<P>(), ComponentKind::InstancePostProcessor(supplier))
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_order(mut self, order: OrderSpec) -> Self {
        self.order = order;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn lazy(mut self, lazy_init: bool) -> Self {
        self.lazy_init = lazy_init;
        self
    }

    /// 자식 정의에 속성만 물려주는 템플릿으로 표시합니다. 직접 생성되지 않습니다.
    pub fn as_template(mut self) -> Self {
        self.abstract_template = true;
        self
    }

    pub fn as_event_listener(mut self) -> Self {
        self.event_listener = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 생성될 타입의 전체 경로 이름
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn is_infrastructure(&self) -> bool {
        self.role == Role::Infrastructure
    }

    pub fn order(&self) -> OrderSpec {
        self.order
    }

    pub fn set_order(&mut self, order: OrderSpec) {
        self.order = order;
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn is_lazy_init(&self) -> bool {
        self.lazy_init
    }

    pub fn set_lazy_init(&mut self, lazy_init: bool) {
        self.lazy_init = lazy_init;
    }

    pub fn is_template(&self) -> bool {
        self.abstract_template
    }

    /// 정의가 주어진 capability를 선언하는지 확인합니다.
    pub fn declares(&self, capability: Capability) -> bool {
        match capability {
            Capability::EventListener => self.event_listener,
            other => self.kind.declares(other),
        }
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("kind", &self.kind.describe())
            .field("role", &self.role)
            .field("order", &self.order)
            .field("parent", &self.parent)
            .field("attributes", &self.attributes)
            .field("lazy_init", &self.lazy_init)
            .field("abstract_template", &self.abstract_template)
            .field("event_listener", &self.event_listener)
            .finish()
    }
}

/// 부모 정의의 속성을 병합한 최종 정의
///
/// 병합 결과는 팩토리의 메타데이터 캐시에 보관되며,
/// `clear_metadata_cache()` 호출 전까지는 원본 정의의 변경이 반영되지 않습니다.
#[derive(Debug, Clone)]
pub struct MergedDefinition {
    definition: ComponentDefinition,
}

impl MergedDefinition {
    /// 가까운 부모부터 나열된 조상 목록으로 병합합니다.
    ///
    /// 속성은 가장 먼 조상부터 덮어쓰므로 자식의 값이 항상 우선합니다.
    /// 역할, 순서, 생성 함수 등 나머지 메타데이터는 자식의 것을 사용합니다.
    pub fn from_ancestry(definition: &ComponentDefinition, ancestors: &[&ComponentDefinition]) -> Self {
        let mut attributes = BTreeMap::new();
        for ancestor in ancestors.iter().rev() {
            attributes.extend(ancestor.attributes.clone());
        }
        attributes.extend(definition.attributes.clone());

        let mut merged = definition.clone();
        merged.attributes = attributes;
        Self { definition: merged }
    }

    pub fn into_inner(self) -> ComponentDefinition {
        self.definition
    }
}

impl Deref for MergedDefinition {
    type Target = ComponentDefinition;

    fn deref(&self) -> &Self::Target {
        &self.definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DataSource;

    #[test]
    fn test_component_definition_defaults() {
        let definition = ComponentDefinition::component("dataSource", |_| Ok(DataSource));

        assert_eq!(definition.name(), "dataSource");
        assert!(definition.type_name().ends_with("DataSource"));
        assert_eq!(definition.role(), Role::Application);
        assert_eq!(definition.order(), OrderSpec::Unordered);
        assert!(!definition.is_lazy_init());
        assert!(definition.declares(Capability::Component));
        assert!(!definition.declares(Capability::FactoryPostProcessor));
    }

    #[test]
    fn test_builder_sets_metadata() {
        let definition = ComponentDefinition::component("cache", |_| Ok(DataSource))
            .with_role(Role::Infrastructure)
            .with_order(OrderSpec::ordered(3))
            .with_parent("baseCache")
            .with_attribute("ttl", "60")
            .lazy(true)
            .as_event_listener();

        assert!(definition.is_infrastructure());
        assert_eq!(definition.order(), OrderSpec::ordered(3));
        assert_eq!(definition.parent(), Some("baseCache"));
        assert_eq!(definition.attribute("ttl"), Some("60"));
        assert!(definition.is_lazy_init());
        assert!(definition.declares(Capability::EventListener));
    }

    #[test]
    fn test_merged_definition_child_attributes_win() {
        let grandparent = ComponentDefinition::component("root", |_| Ok(DataSource))
            .with_attribute("pool", "4")
            .with_attribute("url", "jdbc:root");
        let parent = ComponentDefinition::component("base", |_| Ok(DataSource))
            .with_attribute("url", "jdbc:base")
            .with_attribute("timeout", "30");
        let child = ComponentDefinition::component("primary", |_| Ok(DataSource))
            .with_parent("base")
            .with_attribute("timeout", "5");

        let merged = MergedDefinition::from_ancestry(&child, &[&parent, &grandparent]);

        assert_eq!(merged.name(), "primary");
        assert_eq!(merged.attribute("pool"), Some("4"));
        assert_eq!(merged.attribute("url"), Some("jdbc:base"));
        assert_eq!(merged.attribute("timeout"), Some("5"));
    }

    #[test]
    fn test_capability_display() {
        assert_eq!(Capability::InstancePostProcessor.to_string(), "instance post-processor");
    }
}
