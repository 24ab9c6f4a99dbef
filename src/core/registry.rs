//! # Component Registry - 싱글톤 컴포넌트 컨테이너
//!
//! 이 모듈은 컴포넌트 정의를 보관하는 레지스트리와, 정의로부터 확장/컴포넌트
//! 인스턴스를 만드는 팩토리의 계약 및 기본 구현을 담당합니다.
//! Spring Framework의 `BeanDefinitionRegistry`와 `ConfigurableListableBeanFactory`,
//! 그리고 둘을 함께 구현한 `DefaultListableBeanFactory`에 해당합니다.
//!
//! ## Spring Framework와의 비교
//!
//! | Spring 개념 | 이 시스템 | 비고 |
//! |-------------|-----------|------|
//! | `BeanDefinitionRegistry` | [`ComponentRegistry`] | 삽입 순서 유지 |
//! | `ConfigurableListableBeanFactory` | [`ComponentFactory`] | 레지스트리를 상위 trait으로 가짐 |
//! | `DefaultListableBeanFactory` | [`DefaultComponentFactory`] | 기본 구현 |
//! | `getBeanNamesForType` | `names_for_capability` | 정의만 조회, 인스턴스화 없음 |
//! | `getBean(name, type)` | `instantiate_extension` / `get_component` | |
//! | `getMergedBeanDefinition` | `merged_definition` | 캐시됨 |
//! | `clearMetadataCache` | `clear_metadata_cache` | 병합 정의 캐시 비움 |
//! | `addBeanPostProcessor` | `add_instance_post_processor` | 기존 항목은 체인 끝으로 이동 |
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 정의 등록 (register_definition)
//!    ├─ 이름 검증 → 빈 이름 거부
//!    ├─ 덮어쓰기 정책 확인 → 허용 시 같은 위치에서 교체
//!    └─ 해당 이름의 캐시(병합 정의, 인스턴스) 제거
//!
//! 2. 확장 인스턴스화 (instantiate_extension)
//!    ├─ capability 검증 → 불일치 시 TypeMismatch
//!    ├─ 확장 캐시 확인 → 이미 만들었다면 재사용
//!    └─ supplier 호출 → ExtensionHandle 로 분류 후 캐시
//!
//! 3. 컴포넌트 생성 (get_component)
//!    ├─ 싱글톤 캐시 확인
//!    ├─ 병합 정의 계산 → 병합 정의 훅 실행
//!    ├─ 생성 중 표시 → 순환 참조 감지
//!    ├─ supplier 호출
//!    └─ 인스턴스 후처리기 체인 (before → after) 적용 후 캐시
//! ```

use std::any::{type_name, Any};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info};

use crate::config::ContainerConfig;
use crate::core::errors::{ContainerError, ContainerResult};
use crate::core::ordering::OrderComparator;
use crate::domain::definition::{
    Capability, ComponentDefinition, ComponentInstance, ComponentKind, MergedDefinition,
};
use crate::domain::extension::{ExtensionHandle, InstanceContext, InstancePostProcessor};
use crate::utils::string_utils::{is_valid_string, short_type_name};

/// 컴포넌트 정의 저장소
///
/// 모든 조회는 등록 순서를 유지합니다. 부트스트랩 도중 추가된 정의는
/// 이후의 조회에서 바로 보입니다.
pub trait ComponentRegistry {
    fn register_definition(&mut self, definition: ComponentDefinition) -> ContainerResult<()>;

    fn remove_definition(&mut self, name: &str) -> ContainerResult<ComponentDefinition>;

    fn definition(&self, name: &str) -> Option<&ComponentDefinition>;

    fn definition_mut(&mut self, name: &str) -> Option<&mut ComponentDefinition>;

    fn contains_definition(&self, name: &str) -> bool {
        self.definition(name).is_some()
    }

    fn definition_names(&self) -> Vec<String>;

    fn definition_count(&self) -> usize {
        self.definition_names().len()
    }

    /// 주어진 capability를 선언한 정의의 이름을 등록 순서대로 돌려줍니다.
    fn names_for_capability(&self, capability: Capability) -> Vec<String>;
}

/// 정의로부터 인스턴스를 만드는 팩토리
pub trait ComponentFactory: ComponentRegistry {
    /// 확장을 인스턴스화합니다. 같은 이름은 한 번만 생성됩니다.
    fn instantiate_extension(&mut self, name: &str, expected: Capability) -> ContainerResult<ExtensionHandle>;

    /// 일반 컴포넌트를 가져오거나 생성합니다.
    fn get_component(&mut self, name: &str) -> ContainerResult<ComponentInstance>;

    fn merged_definition(&mut self, name: &str) -> ContainerResult<MergedDefinition>;

    /// 인스턴스 후처리기를 체인 끝에 추가합니다.
    ///
    /// 이미 등록된 같은 인스턴스가 있으면 먼저 제거하므로 결과적으로 끝으로 이동합니다.
    fn add_instance_post_processor(&mut self, processor: Arc<dyn InstancePostProcessor>);

    fn instance_post_processor_count(&self) -> usize;

    fn instance_post_processor_names(&self) -> Vec<String>;

    fn clear_metadata_cache(&mut self);

    /// 확장 정렬에 사용할 비교기. `None`이면 기본 비교기를 사용합니다.
    fn dependency_comparator(&self) -> Option<Arc<dyn OrderComparator>> {
        None
    }
}

/// 기본 레지스트리 + 팩토리 구현
///
/// # 주요 기능
///
/// ## 1. 정의 관리
/// - **삽입 순서 유지**: 이름 목록을 별도로 유지하여 조회 순서를 보장
/// - **덮어쓰기 정책**: `CONTAINER_ALLOW_DEFINITION_OVERRIDING` 설정 반영
///
/// ## 2. 인스턴스 관리
/// - **싱글톤 보장**: 확장과 컴포넌트 모두 이름당 하나만 생성
/// - **순환 참조 감지**: 생성 중인 이름을 추적하여 재진입 시 에러 반환
pub struct DefaultComponentFactory {
    definitions: HashMap<String, ComponentDefinition>,
    /// 등록 순서를 보존하는 정의 이름 목록
    definition_names: Vec<String>,
    allow_definition_overriding: bool,
    merged_definitions: HashMap<String, MergedDefinition>,
    extensions: HashMap<String, ExtensionHandle>,
    singletons: HashMap<String, ComponentInstance>,
    /// 현재 생성 중인 이름들 (순환 참조 감지용)
    in_creation: HashSet<String>,
    instance_post_processors: Vec<Arc<dyn InstancePostProcessor>>,
    dependency_comparator: Option<Arc<dyn OrderComparator>>,
}

impl Default for DefaultComponentFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultComponentFactory {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
            definition_names: Vec::new(),
            allow_definition_overriding: true,
            merged_definitions: HashMap::new(),
            extensions: HashMap::new(),
            singletons: HashMap::new(),
            in_creation: HashSet::new(),
            instance_post_processors: Vec::new(),
            dependency_comparator: None,
        }
    }

    /// 환경 변수 설정을 반영한 팩토리를 생성합니다.
    pub fn from_env() -> ContainerResult<Self> {
        let mut factory = Self::new();
        factory.allow_definition_overriding = ContainerConfig::allow_definition_overriding()?;
        Ok(factory)
    }

    pub fn set_allow_definition_overriding(&mut self, allow: bool) {
        self.allow_definition_overriding = allow;
    }

    pub fn set_dependency_comparator(&mut self, comparator: Arc<dyn OrderComparator>) {
        self.dependency_comparator = Some(comparator);
    }

    pub fn contains_singleton(&self, name: &str) -> bool {
        self.singletons.contains_key(name)
    }

    pub fn singleton_count(&self) -> usize {
        self.singletons.len()
    }

    /// 컴포넌트를 가져와 구체 타입으로 변환합니다.
    ///
    /// ```rust,ignore
    /// let data_source: Arc<DataSource> = factory.get_component_as("dataSource")?;
    /// ```
    pub fn get_component_as<T: Any + Send + Sync>(&mut self, name: &str) -> ContainerResult<Arc<T>> {
        let instance = self.get_component(name)?;
        instance.downcast::<T>().map_err(|_| ContainerError::TypeMismatch {
            name: name.to_string(),
            expected: type_name::<T>().to_string(),
            actual: "instance of another type".to_string(),
        })
    }

    /// 지연 초기화가 아닌 모든 일반 컴포넌트를 미리 생성합니다.
    ///
    /// 템플릿 정의는 건너뜁니다. 생성한 컴포넌트 수를 돌려줍니다.
    pub fn preinstantiate_singletons(&mut self) -> ContainerResult<usize> {
        let names: Vec<String> = self
            .definition_names
            .iter()
            .filter(|name| {
                self.definitions.get(*name).is_some_and(|definition| {
                    definition.declares(Capability::Component)
                        && !definition.is_lazy_init()
                        && !definition.is_template()
                })
            })
            .cloned()
            .collect();

        for name in &names {
            self.get_component(name)?;
        }

        debug!("Pre-instantiated {} singleton components", names.len());
        Ok(names.len())
    }

    fn evict(&mut self, name: &str) {
        self.merged_definitions.remove(name);
        self.extensions.remove(name);
        self.singletons.remove(name);
    }

    fn create_component(
        &mut self,
        name: &str,
        merged: &MergedDefinition,
        supplier: &crate::domain::definition::Supplier<ComponentInstance>,
    ) -> ContainerResult<ComponentInstance> {
        let merged_hooks: Vec<_> = self
            .instance_post_processors
            .iter()
            .filter(|processor| processor.is_merged_definition_aware())
            .cloned()
            .collect();
        for processor in merged_hooks {
            processor.post_process_merged_definition(merged, name)?;
        }

        let mut instance = supplier(self)?;

        // supplier가 체인을 바꿨을 수 있으므로 생성 직후의 체인을 사용
        let chain = self.instance_post_processors.clone();
        let context = InstanceContext {
            name,
            definition: Some(merged),
            chain_len: chain.len(),
        };
        for processor in &chain {
            instance = processor.before_initialization(instance, &context)?;
        }
        for processor in &chain {
            instance = processor.after_initialization(instance, &context)?;
        }
        Ok(instance)
    }
}

impl ComponentRegistry for DefaultComponentFactory {
    fn register_definition(&mut self, definition: ComponentDefinition) -> ContainerResult<()> {
        if !is_valid_string(definition.name()) {
            return Err(ContainerError::InvalidDefinition(
                "definition name must not be blank".to_string(),
            ));
        }
        let name = definition.name().to_string();
        if definition.parent() == Some(name.as_str()) {
            return Err(ContainerError::InvalidDefinition(format!(
                "'{}' cannot be its own parent",
                name
            )));
        }

        if self.definitions.contains_key(&name) {
            if !self.allow_definition_overriding {
                return Err(ContainerError::DuplicateDefinition(name));
            }
            info!("🔁 Overriding component definition '{}'", name);
            self.evict(&name);
        } else {
            self.definition_names.push(name.clone());
        }

        debug!("📦 Registering definition '{}' ({})", name, definition.kind().describe());
        self.definitions.insert(name, definition);
        Ok(())
    }

    fn remove_definition(&mut self, name: &str) -> ContainerResult<ComponentDefinition> {
        let definition = self
            .definitions
            .remove(name)
            .ok_or_else(|| ContainerError::NoSuchDefinition(name.to_string()))?;
        self.definition_names.retain(|existing| existing != name);
        self.evict(name);
        debug!("Removed definition '{}'", name);
        Ok(definition)
    }

    fn definition(&self, name: &str) -> Option<&ComponentDefinition> {
        self.definitions.get(name)
    }

    fn definition_mut(&mut self, name: &str) -> Option<&mut ComponentDefinition> {
        self.definitions.get_mut(name)
    }

    fn definition_names(&self) -> Vec<String> {
        self.definition_names.clone()
    }

    fn definition_count(&self) -> usize {
        self.definition_names.len()
    }

    fn names_for_capability(&self, capability: Capability) -> Vec<String> {
        self.definition_names
            .iter()
            .filter(|name| {
                self.definitions
                    .get(*name)
                    .is_some_and(|definition| definition.declares(capability))
            })
            .cloned()
            .collect()
    }
}

impl ComponentFactory for DefaultComponentFactory {
    fn instantiate_extension(&mut self, name: &str, expected: Capability) -> ContainerResult<ExtensionHandle> {
        let definition = self
            .definitions
            .get(name)
            .ok_or_else(|| ContainerError::NoSuchDefinition(name.to_string()))?;
        if !definition.declares(expected) {
            return Err(ContainerError::TypeMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: definition.kind().describe().to_string(),
            });
        }
        if let Some(handle) = self.extensions.get(name) {
            return Ok(handle.clone());
        }

        let kind = definition.kind().clone();
        if !self.in_creation.insert(name.to_string()) {
            return Err(ContainerError::CircularReference(name.to_string()));
        }

        let result = match kind {
            ComponentKind::RegistryPostProcessor(supplier) => supplier(self).map(ExtensionHandle::Registry),
            ComponentKind::FactoryPostProcessor(supplier) => supplier(self).map(ExtensionHandle::Factory),
            ComponentKind::InstancePostProcessor(supplier) => supplier(self).map(ExtensionHandle::Instance),
            ComponentKind::Component(_) => Err(ContainerError::TypeMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: Capability::Component.to_string(),
            }),
        };
        self.in_creation.remove(name);

        let handle = result?;
        debug!("Instantiated extension '{}' as {}", name, handle.capability());
        self.extensions.insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    fn get_component(&mut self, name: &str) -> ContainerResult<ComponentInstance> {
        if let Some(instance) = self.singletons.get(name) {
            return Ok(instance.clone());
        }

        let merged = self.merged_definition(name)?;
        if merged.is_template() {
            return Err(ContainerError::InvalidDefinition(format!(
                "'{}' is a template definition and cannot be instantiated",
                name
            )));
        }
        let supplier = match merged.kind() {
            ComponentKind::Component(supplier) => supplier.clone(),
            other => {
                return Err(ContainerError::TypeMismatch {
                    name: name.to_string(),
                    expected: Capability::Component.to_string(),
                    actual: other.describe().to_string(),
                })
            }
        };

        if !self.in_creation.insert(name.to_string()) {
            return Err(ContainerError::CircularReference(name.to_string()));
        }
        let result = self.create_component(name, &merged, &supplier);
        self.in_creation.remove(name);

        let instance = result?;
        self.singletons.insert(name.to_string(), instance.clone());
        Ok(instance)
    }

    fn merged_definition(&mut self, name: &str) -> ContainerResult<MergedDefinition> {
        if let Some(merged) = self.merged_definitions.get(name) {
            return Ok(merged.clone());
        }

        let definition = self
            .definitions
            .get(name)
            .ok_or_else(|| ContainerError::NoSuchDefinition(name.to_string()))?;

        let mut ancestors = Vec::new();
        let mut visited = HashSet::from([name.to_string()]);
        let mut parent = definition.parent();
        while let Some(parent_name) = parent {
            if !visited.insert(parent_name.to_string()) {
                return Err(ContainerError::CircularReference(name.to_string()));
            }
            let parent_definition = self
                .definitions
                .get(parent_name)
                .ok_or_else(|| ContainerError::NoSuchDefinition(parent_name.to_string()))?;
            ancestors.push(parent_definition);
            parent = parent_definition.parent();
        }

        let merged = MergedDefinition::from_ancestry(definition, &ancestors);
        self.merged_definitions.insert(name.to_string(), merged.clone());
        Ok(merged)
    }

    fn add_instance_post_processor(&mut self, processor: Arc<dyn InstancePostProcessor>) {
        self.instance_post_processors
            .retain(|existing| !std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(&processor)));
        self.instance_post_processors.push(processor);
    }

    fn instance_post_processor_count(&self) -> usize {
        self.instance_post_processors.len()
    }

    fn instance_post_processor_names(&self) -> Vec<String> {
        self.instance_post_processors
            .iter()
            .map(|processor| short_type_name(processor.name()))
            .collect()
    }

    fn clear_metadata_cache(&mut self) {
        debug!("Clearing {} merged definitions", self.merged_definitions.len());
        self.merged_definitions.clear();
    }

    fn dependency_comparator(&self) -> Option<Arc<dyn OrderComparator>> {
        self.dependency_comparator.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ordering::OrderSpec;
    use crate::domain::definition::Role;
    use crate::domain::extension::{Extension, FactoryPostProcessor, RegistryPostProcessor};

    #[derive(Debug, PartialEq)]
    struct DataSource {
        url: String,
    }

    struct NoopRegistryProcessor;

    impl Extension for NoopRegistryProcessor {}

    impl FactoryPostProcessor for NoopRegistryProcessor {
        fn post_process_factory(&self, _factory: &mut dyn ComponentFactory) -> ContainerResult<()> {
            Ok(())
        }
    }

    impl RegistryPostProcessor for NoopRegistryProcessor {
        fn post_process_registry(&self, _registry: &mut dyn ComponentRegistry) -> ContainerResult<()> {
            Ok(())
        }
    }

    struct Tagger;

    impl Extension for Tagger {}

    impl InstancePostProcessor for Tagger {}

    fn data_source(name: &str, url: &str) -> ComponentDefinition {
        let url = url.to_string();
        ComponentDefinition::component(name, move |_| Ok(DataSource { url: url.clone() }))
    }

    #[test]
    fn test_register_keeps_insertion_order() {
        let mut factory = DefaultComponentFactory::new();
        factory.register_definition(data_source("b", "b")).unwrap();
        factory.register_definition(data_source("a", "a")).unwrap();
        factory.register_definition(data_source("c", "c")).unwrap();

        assert_eq!(factory.definition_names(), vec!["b", "a", "c"]);
        assert_eq!(factory.definition_count(), 3);
    }

    #[test]
    fn test_overriding_replaces_in_place() {
        let mut factory = DefaultComponentFactory::new();
        factory.register_definition(data_source("primary", "jdbc:one")).unwrap();
        factory.register_definition(data_source("replica", "jdbc:two")).unwrap();
        factory.register_definition(data_source("primary", "jdbc:three")).unwrap();

        assert_eq!(factory.definition_names(), vec!["primary", "replica"]);
        let primary: Arc<DataSource> = factory.get_component_as("primary").unwrap();
        assert_eq!(primary.url, "jdbc:three");
    }

    #[test]
    fn test_duplicate_rejected_when_overriding_disabled() {
        let mut factory = DefaultComponentFactory::new();
        factory.set_allow_definition_overriding(false);
        factory.register_definition(data_source("primary", "jdbc:one")).unwrap();

        let result = factory.register_definition(data_source("primary", "jdbc:two"));
        assert_eq!(result, Err(ContainerError::DuplicateDefinition("primary".to_string())));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut factory = DefaultComponentFactory::new();
        let result = factory.register_definition(data_source("   ", "jdbc"));
        assert!(matches!(result, Err(ContainerError::InvalidDefinition(_))));
    }

    #[test]
    fn test_remove_definition() {
        let mut factory = DefaultComponentFactory::new();
        factory.register_definition(data_source("primary", "jdbc")).unwrap();

        let removed = factory.remove_definition("primary").unwrap();
        assert_eq!(removed.name(), "primary");
        assert!(!factory.contains_definition("primary"));
        assert_eq!(
            factory.remove_definition("primary").unwrap_err(),
            ContainerError::NoSuchDefinition("primary".to_string())
        );
    }

    #[test]
    fn test_registry_processor_matches_factory_capability() {
        let mut factory = DefaultComponentFactory::new();
        factory.register_definition(data_source("dataSource", "jdbc")).unwrap();
        factory
            .register_definition(ComponentDefinition::registry_post_processor("scanner", |_| {
                Ok(NoopRegistryProcessor)
            }))
            .unwrap();

        assert_eq!(factory.names_for_capability(Capability::RegistryPostProcessor), vec!["scanner"]);
        assert_eq!(factory.names_for_capability(Capability::FactoryPostProcessor), vec!["scanner"]);
        assert_eq!(factory.names_for_capability(Capability::Component), vec!["dataSource"]);
    }

    #[test]
    fn test_event_listener_capability_query() {
        let mut factory = DefaultComponentFactory::new();
        factory.register_definition(data_source("dataSource", "jdbc")).unwrap();
        factory
            .register_definition(ComponentDefinition::component("auditLog", |_| Ok(0u8)).as_event_listener())
            .unwrap();

        assert_eq!(factory.names_for_capability(Capability::EventListener), vec!["auditLog"]);
        assert_eq!(
            factory.names_for_capability(Capability::Component),
            vec!["dataSource", "auditLog"]
        );
    }

    #[test]
    fn test_extension_instantiated_once() {
        let created = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = created.clone();
        let mut factory = DefaultComponentFactory::new();
        factory
            .register_definition(ComponentDefinition::registry_post_processor("scanner", move |_| {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Ok(NoopRegistryProcessor)
            }))
            .unwrap();

        factory.instantiate_extension("scanner", Capability::RegistryPostProcessor).unwrap();
        let handle = factory
            .instantiate_extension("scanner", Capability::FactoryPostProcessor)
            .unwrap();

        assert!(handle.as_registry().is_some());
        assert_eq!(created.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_instantiate_extension_rejects_wrong_capability() {
        let mut factory = DefaultComponentFactory::new();
        factory.register_definition(data_source("dataSource", "jdbc")).unwrap();

        let result = factory.instantiate_extension("dataSource", Capability::FactoryPostProcessor);
        assert!(matches!(result, Err(ContainerError::TypeMismatch { .. })));
    }

    #[test]
    fn test_circular_reference_detected() {
        let mut factory = DefaultComponentFactory::new();
        factory
            .register_definition(ComponentDefinition::component("a", |factory| {
                factory.get_component("b").map(|_| 1u8)
            }))
            .unwrap();
        factory
            .register_definition(ComponentDefinition::component("b", |factory| {
                factory.get_component("a").map(|_| 2u8)
            }))
            .unwrap();

        let result = factory.get_component("a");
        assert_eq!(result.unwrap_err(), ContainerError::CircularReference("a".to_string()));
        assert!(!factory.contains_singleton("a"));
    }

    #[test]
    fn test_merged_definition_cached_until_cleared() {
        let mut factory = DefaultComponentFactory::new();
        factory
            .register_definition(data_source("base", "jdbc").with_attribute("pool", "4").as_template())
            .unwrap();
        factory
            .register_definition(data_source("primary", "jdbc").with_parent("base"))
            .unwrap();

        assert_eq!(factory.merged_definition("primary").unwrap().attribute("pool"), Some("4"));

        factory.definition_mut("base").unwrap().set_attribute("pool", "16");
        assert_eq!(factory.merged_definition("primary").unwrap().attribute("pool"), Some("4"));

        factory.clear_metadata_cache();
        assert_eq!(factory.merged_definition("primary").unwrap().attribute("pool"), Some("16"));
    }

    #[test]
    fn test_missing_parent_reported() {
        let mut factory = DefaultComponentFactory::new();
        factory
            .register_definition(data_source("primary", "jdbc").with_parent("ghost"))
            .unwrap();

        assert_eq!(
            factory.merged_definition("primary").unwrap_err(),
            ContainerError::NoSuchDefinition("ghost".to_string())
        );
    }

    #[test]
    fn test_template_is_not_instantiated() {
        let mut factory = DefaultComponentFactory::new();
        factory.register_definition(data_source("base", "jdbc").as_template()).unwrap();
        factory
            .register_definition(data_source("lazy", "jdbc").lazy(true))
            .unwrap();
        factory
            .register_definition(data_source("primary", "jdbc").with_role(Role::Infrastructure))
            .unwrap();

        assert_eq!(factory.preinstantiate_singletons().unwrap(), 1);
        assert!(factory.contains_singleton("primary"));
        assert!(!factory.contains_singleton("lazy"));
        assert!(matches!(factory.get_component("base"), Err(ContainerError::InvalidDefinition(_))));
    }

    #[test]
    fn test_re_adding_processor_moves_it_to_end() {
        let mut factory = DefaultComponentFactory::new();
        let first: Arc<dyn InstancePostProcessor> = Arc::new(Tagger);
        let second: Arc<dyn InstancePostProcessor> = Arc::new(Tagger);

        factory.add_instance_post_processor(first.clone());
        factory.add_instance_post_processor(second.clone());
        factory.add_instance_post_processor(first.clone());

        assert_eq!(factory.instance_post_processor_count(), 2);
        assert_eq!(factory.instance_post_processor_names(), vec!["Tagger", "Tagger"]);
    }

    #[test]
    fn test_get_component_as_wrong_type() {
        let mut factory = DefaultComponentFactory::new();
        factory.register_definition(data_source("primary", "jdbc")).unwrap();

        let result = factory.get_component_as::<String>("primary");
        assert!(matches!(result, Err(ContainerError::TypeMismatch { .. })));
    }

    #[test]
    fn test_custom_comparator_exposed() {
        let mut factory = DefaultComponentFactory::new();
        assert!(factory.dependency_comparator().is_none());

        factory.set_dependency_comparator(Arc::new(crate::core::ordering::DefaultOrderComparator));
        let comparator = factory.dependency_comparator().unwrap();
        assert_eq!(
            comparator.compare(&OrderSpec::ordered(1), &OrderSpec::priority(9)),
            std::cmp::Ordering::Greater
        );
    }
}
