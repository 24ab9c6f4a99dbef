//! # Post-Processor Orchestration
//!
//! 부트스트랩 시점에 세 가지 확장 계열을 정해진 순서로 실행/등록합니다.
//! Spring의 `PostProcessorRegistrationDelegate`에 해당합니다.
//!
//! ## 단계
//!
//! ```text
//! invoke_factory_post_processors
//! ├─ 1. 외부에서 전달된 확장: 레지스트리 계열은 즉시 레지스트리 훅 실행, 나머지는 보류
//! ├─ 2. 발견된 레지스트리 후처리기 중 PriorityOrdered → 정렬 → 실행
//! ├─ 3. 다시 조회, 처리되지 않은 Ordered(PriorityOrdered 포함) → 정렬 → 실행
//! ├─ 4. 새로 발견되는 레지스트리 후처리기가 없을 때까지 반복
//! ├─ 5. 1~4에서 처리한 레지스트리 후처리기의 팩토리 훅, 이어서 보류된 외부 확장의 팩토리 훅
//! └─ 6. 남은 팩토리 후처리기: PriorityOrdered → Ordered → 무순서, 이후 메타데이터 캐시 비움
//!
//! register_instance_post_processors
//! └─ 7. 검사기 → PriorityOrdered → Ordered → 무순서 → 병합 정의 후처리기 재등록 → 리스너 감지기
//! ```
//!
//! 처리된 이름 집합([`ProcessedNames`])은 단계 사이에 명시적으로 전달되며,
//! 레지스트리 계열 확장이 한 부트스트랩 안에서 두 번 실행되지 않도록 보장합니다.
//!
//! 확장이 실패하면 그 에러를 그대로 돌려주고 부트스트랩을 중단합니다.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};

use crate::config::ContainerConfig;
use crate::core::errors::{ContainerError, ContainerResult};
use crate::core::ordering::{resolve_comparator, sort_by_order, OrderComparator, OrderSpec, PriorityTier};
use crate::core::registry::ComponentFactory;
use crate::domain::definition::Capability;
use crate::domain::extension::{ExtensionHandle, InstancePostProcessor, RegistryPostProcessor};

use super::checker::PrematureInstantiationChecker;
use super::detector::ListenerDetector;

/// 한 부트스트랩 동안 이미 처리된 확장 이름
///
/// 처리 순서를 함께 보관합니다. 한 번 추가된 이름은 제거되지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct ProcessedNames {
    names: HashSet<String>,
    order: Vec<String>,
}

impl ProcessedNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// 처음 추가된 이름이면 `true`
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.insert(name.to_string()) {
            self.order.push(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 처리된 순서대로의 이름 목록
    pub fn names(&self) -> &[String] {
        &self.order
    }
}

/// 부트스트랩 옵션
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapOptions {
    /// 4단계 반복 횟수 상한. `None`이면 무제한입니다.
    pub max_registry_passes: Option<usize>,
}

impl BootstrapOptions {
    pub fn from_env() -> ContainerResult<Self> {
        Ok(Self {
            max_registry_passes: ContainerConfig::max_registry_passes()?,
        })
    }
}

/// 1~6단계 실행 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactoryPhaseStats {
    /// 4단계에서 새 확장을 실행한 반복 횟수
    pub registry_passes: usize,
    /// 실행된 팩토리 훅 수
    pub factory_hooks_invoked: usize,
}

/// 전체 부트스트랩 결과
#[derive(Debug)]
pub struct BootstrapOutcome {
    pub processed: ProcessedNames,
    pub stats: FactoryPhaseStats,
    pub checker: Arc<PrematureInstantiationChecker>,
    pub detector: Arc<ListenerDetector>,
}

/// 정렬 대상 확장
struct Candidate<T> {
    name: String,
    order: OrderSpec,
    processor: T,
}

/// 기본 옵션으로 1~7단계를 실행합니다.
pub fn run_bootstrap_extensions<F: ComponentFactory>(
    factory: &mut F,
    external: &[ExtensionHandle],
) -> ContainerResult<BootstrapOutcome> {
    run_bootstrap_extensions_with(factory, external, &BootstrapOptions::default())
}

pub fn run_bootstrap_extensions_with<F: ComponentFactory>(
    factory: &mut F,
    external: &[ExtensionHandle],
    options: &BootstrapOptions,
) -> ContainerResult<BootstrapOutcome> {
    let mut processed = ProcessedNames::new();
    let stats = invoke_factory_post_processors(factory, external, options, &mut processed)?;

    let detector = Arc::new(ListenerDetector::new());
    let checker = register_instance_post_processors(factory, &processed, detector.clone())?;

    Ok(BootstrapOutcome {
        processed,
        stats,
        checker,
        detector,
    })
}

/// 1~6단계: 레지스트리/팩토리 후처리기 실행
pub fn invoke_factory_post_processors<F: ComponentFactory>(
    factory: &mut F,
    external: &[ExtensionHandle],
    options: &BootstrapOptions,
    processed: &mut ProcessedNames,
) -> ContainerResult<FactoryPhaseStats> {
    let comparator = resolve_comparator(factory.dependency_comparator());
    let mut stats = FactoryPhaseStats::default();

    // 1단계: 훅을 하나라도 실행하기 전에 외부 확장을 검증
    for handle in external {
        handle.ensure_factory_capable()?;
    }
    let mut registry_processors: Vec<Arc<dyn RegistryPostProcessor>> = Vec::new();
    let mut regular_processors: Vec<&ExtensionHandle> = Vec::new();
    for handle in external {
        match handle.as_registry() {
            Some(processor) => {
                debug!("🧩 Invoking supplied registry post-processor '{}'", processor.name());
                processor.post_process_registry(factory)?;
                registry_processors.push(processor.clone());
            }
            None => regular_processors.push(handle),
        }
    }

    // 2단계
    let mut current = collect_registry_processors(factory, processed, comparator.as_ref(), |order| {
        order.is_priority_ordered()
    })?;
    invoke_registry_processors(factory, &current)?;
    registry_processors.extend(current.drain(..).map(|candidate| candidate.processor));

    // 3단계
    let mut current =
        collect_registry_processors(factory, processed, comparator.as_ref(), |order| order.is_ordered())?;
    invoke_registry_processors(factory, &current)?;
    registry_processors.extend(current.drain(..).map(|candidate| candidate.processor));

    // 4단계
    loop {
        let current = collect_registry_processors(factory, processed, comparator.as_ref(), |_| true)?;
        if current.is_empty() {
            break;
        }
        if let Some(limit) = options.max_registry_passes {
            if stats.registry_passes >= limit {
                return Err(ContainerError::RegistryPassLimitExceeded(limit));
            }
        }
        stats.registry_passes += 1;
        debug!(
            "🔁 Registry pass {} found {} new post-processors",
            stats.registry_passes,
            current.len()
        );
        invoke_registry_processors(factory, &current)?;
        registry_processors.extend(current.into_iter().map(|candidate| candidate.processor));
    }

    // 5단계
    for processor in &registry_processors {
        processor.post_process_factory(factory)?;
        stats.factory_hooks_invoked += 1;
    }
    for handle in regular_processors {
        handle.invoke_factory_hook(factory)?;
        stats.factory_hooks_invoked += 1;
    }

    // 6단계
    let mut priority_names = Vec::new();
    let mut ordered_names = Vec::new();
    let mut unordered_names = Vec::new();
    for name in factory.names_for_capability(Capability::FactoryPostProcessor) {
        if processed.contains(&name) {
            continue;
        }
        match order_of(factory, &name).tier() {
            PriorityTier::Highest => priority_names.push(name),
            PriorityTier::Ordered => ordered_names.push(name),
            PriorityTier::Unordered => unordered_names.push(name),
        }
    }

    // 우선 그룹은 분류 직후 인스턴스화하고, 나머지는 앞 그룹 실행 뒤에 인스턴스화합니다.
    let priority = instantiate_factory_processors(factory, &priority_names, Some(comparator.as_ref()))?;
    stats.factory_hooks_invoked += invoke_factory_hooks(factory, &priority)?;

    let ordered = instantiate_factory_processors(factory, &ordered_names, Some(comparator.as_ref()))?;
    stats.factory_hooks_invoked += invoke_factory_hooks(factory, &ordered)?;

    let unordered = instantiate_factory_processors(factory, &unordered_names, None)?;
    stats.factory_hooks_invoked += invoke_factory_hooks(factory, &unordered)?;

    factory.clear_metadata_cache();

    info!(
        "✅ Factory post-processing finished: {} registry post-processors, {} factory hooks",
        registry_processors.len(),
        stats.factory_hooks_invoked
    );
    Ok(stats)
}

/// 7단계: 인스턴스 후처리기 등록
///
/// 체인 맨 앞의 검사기를 돌려줍니다. `detector`는 항상 마지막에 추가됩니다.
pub fn register_instance_post_processors<F: ComponentFactory>(
    factory: &mut F,
    processed: &ProcessedNames,
    detector: Arc<dyn InstancePostProcessor>,
) -> ContainerResult<Arc<PrematureInstantiationChecker>> {
    let comparator = resolve_comparator(factory.dependency_comparator());
    let names: Vec<String> = factory
        .names_for_capability(Capability::InstancePostProcessor)
        .into_iter()
        .filter(|name| !processed.contains(name))
        .collect();

    let target_count = factory.instance_post_processor_count() + 1 + names.len();
    let checker = Arc::new(PrematureInstantiationChecker::new(target_count));
    factory.add_instance_post_processor(checker.clone());

    let mut priority = Vec::new();
    let mut ordered_names = Vec::new();
    let mut unordered_names = Vec::new();
    let mut internal = Vec::new();

    for name in names {
        let order = order_of(factory, &name);
        match order.tier() {
            PriorityTier::Highest => {
                let candidate = instantiate_instance_processor(factory, name, order)?;
                track_internal(&candidate, &mut internal);
                priority.push(candidate);
            }
            PriorityTier::Ordered => ordered_names.push(name),
            PriorityTier::Unordered => unordered_names.push(name),
        }
    }
    sort_by_order(&mut priority, comparator.as_ref(), |candidate| &candidate.order);
    register_chain(factory, &priority);

    let mut ordered = Vec::with_capacity(ordered_names.len());
    for name in ordered_names {
        let order = order_of(factory, &name);
        let candidate = instantiate_instance_processor(factory, name, order)?;
        track_internal(&candidate, &mut internal);
        ordered.push(candidate);
    }
    sort_by_order(&mut ordered, comparator.as_ref(), |candidate| &candidate.order);
    register_chain(factory, &ordered);

    let mut unordered = Vec::with_capacity(unordered_names.len());
    for name in unordered_names {
        let order = order_of(factory, &name);
        let candidate = instantiate_instance_processor(factory, name, order)?;
        track_internal(&candidate, &mut internal);
        unordered.push(candidate);
    }
    register_chain(factory, &unordered);

    // 병합 정의 후처리기는 체인 끝으로 다시 이동
    sort_by_order(&mut internal, comparator.as_ref(), |candidate| &candidate.order);
    register_chain(factory, &internal);

    factory.add_instance_post_processor(detector);

    info!(
        "✅ Registered {} instance post-processors",
        factory.instance_post_processor_count()
    );
    Ok(checker)
}

fn order_of<F: ComponentFactory>(factory: &F, name: &str) -> OrderSpec {
    factory
        .definition(name)
        .map(|definition| definition.order())
        .unwrap_or_default()
}

/// 처리되지 않은 레지스트리 후처리기 중 조건에 맞는 것을 인스턴스화하고 정렬합니다.
fn collect_registry_processors<F, P>(
    factory: &mut F,
    processed: &mut ProcessedNames,
    comparator: &dyn OrderComparator,
    accept: P,
) -> ContainerResult<Vec<Candidate<Arc<dyn RegistryPostProcessor>>>>
where
    F: ComponentFactory,
    P: Fn(&OrderSpec) -> bool,
{
    let mut current = Vec::new();
    for name in factory.names_for_capability(Capability::RegistryPostProcessor) {
        let order = order_of(factory, &name);
        if processed.contains(&name) || !accept(&order) {
            continue;
        }
        let handle = factory.instantiate_extension(&name, Capability::RegistryPostProcessor)?;
        let processor = handle
            .as_registry()
            .cloned()
            .ok_or_else(|| ContainerError::TypeMismatch {
                name: name.clone(),
                expected: Capability::RegistryPostProcessor.to_string(),
                actual: handle.capability().to_string(),
            })?;
        processed.insert(&name);
        current.push(Candidate { name, order, processor });
    }
    sort_by_order(&mut current, comparator, |candidate| &candidate.order);
    Ok(current)
}

fn invoke_registry_processors<F: ComponentFactory>(
    factory: &mut F,
    processors: &[Candidate<Arc<dyn RegistryPostProcessor>>],
) -> ContainerResult<()> {
    for candidate in processors {
        debug!("🧩 Invoking registry post-processor '{}' ({})", candidate.name, candidate.order);
        candidate.processor.post_process_registry(factory)?;
    }
    Ok(())
}

/// `comparator`가 없으면 발견 순서를 유지합니다.
fn instantiate_factory_processors<F: ComponentFactory>(
    factory: &mut F,
    names: &[String],
    comparator: Option<&dyn OrderComparator>,
) -> ContainerResult<Vec<Candidate<ExtensionHandle>>> {
    let mut candidates = Vec::with_capacity(names.len());
    for name in names {
        let processor = factory.instantiate_extension(name, Capability::FactoryPostProcessor)?;
        candidates.push(Candidate {
            name: name.clone(),
            order: order_of(factory, name),
            processor,
        });
    }
    if let Some(comparator) = comparator {
        sort_by_order(&mut candidates, comparator, |candidate| &candidate.order);
    }
    Ok(candidates)
}

fn invoke_factory_hooks<F: ComponentFactory>(
    factory: &mut F,
    processors: &[Candidate<ExtensionHandle>],
) -> ContainerResult<usize> {
    for candidate in processors {
        debug!("🔧 Invoking factory post-processor '{}' ({})", candidate.name, candidate.order);
        candidate.processor.invoke_factory_hook(factory)?;
    }
    Ok(processors.len())
}

fn instantiate_instance_processor<F: ComponentFactory>(
    factory: &mut F,
    name: String,
    order: OrderSpec,
) -> ContainerResult<Candidate<Arc<dyn InstancePostProcessor>>> {
    let handle = factory.instantiate_extension(&name, Capability::InstancePostProcessor)?;
    let processor = handle
        .as_instance()
        .cloned()
        .ok_or_else(|| ContainerError::TypeMismatch {
            name: name.clone(),
            expected: Capability::InstancePostProcessor.to_string(),
            actual: handle.capability().to_string(),
        })?;
    Ok(Candidate { name, order, processor })
}

fn track_internal(
    candidate: &Candidate<Arc<dyn InstancePostProcessor>>,
    internal: &mut Vec<Candidate<Arc<dyn InstancePostProcessor>>>,
) {
    if candidate.processor.is_merged_definition_aware() {
        internal.push(Candidate {
            name: candidate.name.clone(),
            order: candidate.order,
            processor: candidate.processor.clone(),
        });
    }
}

fn register_chain<F: ComponentFactory>(factory: &mut F, processors: &[Candidate<Arc<dyn InstancePostProcessor>>]) {
    for candidate in processors {
        debug!("⛓️ Registering instance post-processor '{}'", candidate.name);
        factory.add_instance_post_processor(candidate.processor.clone());
    }
}
