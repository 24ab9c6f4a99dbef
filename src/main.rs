//! 컨테이너 부트스트랩 데모 애플리케이션
//!
//! 예제 정의들로 컨텍스트를 refresh 하고, 부트스트랩 보고서와
//! 롤백 규칙 평가 결과를 출력합니다.

use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use bean_container::bootstrap::BootstrapContext;
use bean_container::config::{Environment, TransactionConfig};
use bean_container::core::errors::{ContainerError, ContainerResult, ErrorContext};
use bean_container::core::ordering::OrderSpec;
use bean_container::core::registry::{ComponentFactory, ComponentRegistry};
use bean_container::domain::definition::{ComponentDefinition, MergedDefinition, Role};
use bean_container::domain::extension::{
    Extension, FactoryPostProcessor, InstancePostProcessor, RegistryPostProcessor,
};
use bean_container::transaction::error_type::{ARITHMETIC, ILLEGAL_ARGUMENT, IO_EXCEPTION, RUNTIME_EXCEPTION};
use bean_container::transaction::{RollbackRule, TypeDescriptor};
use bean_container::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

static PAYMENT_DECLINED: TypeDescriptor = TypeDescriptor::new("billing::PaymentDeclinedException", &RUNTIME_EXCEPTION);

struct DataSource {
    url: String,
}

struct OrderService {
    data_source: Arc<DataSource>,
}

struct AuditLog;

/// 감사 로그 리스너 정의를 추가하는 레지스트리 후처리기
struct AuditConfiguration;

impl Extension for AuditConfiguration {}

impl FactoryPostProcessor for AuditConfiguration {
    fn post_process_factory(&self, _factory: &mut dyn ComponentFactory) -> ContainerResult<()> {
        Ok(())
    }
}

impl RegistryPostProcessor for AuditConfiguration {
    fn post_process_registry(&self, registry: &mut dyn ComponentRegistry) -> ContainerResult<()> {
        registry.register_definition(ComponentDefinition::component("auditLog", |_| Ok(AuditLog)).as_event_listener())
    }
}

/// `${...}` 형태의 속성 값을 실제 값으로 치환하는 팩토리 후처리기
struct PlaceholderResolver;

impl Extension for PlaceholderResolver {}

impl FactoryPostProcessor for PlaceholderResolver {
    fn post_process_factory(&self, factory: &mut dyn ComponentFactory) -> ContainerResult<()> {
        for name in factory.definition_names() {
            if let Some(definition) = factory.definition_mut(&name) {
                if definition.attribute("url") == Some("${db.url}") {
                    let url = std::env::var("DB_URL").unwrap_or_else(|_| "jdbc:h2:mem:demo".to_string());
                    definition.set_attribute("url", url);
                }
            }
        }
        Ok(())
    }
}

/// 생성 직전 병합 정의를 로그로 남기는 인스턴스 후처리기
struct CreationTracer;

impl Extension for CreationTracer {}

impl InstancePostProcessor for CreationTracer {
    fn is_merged_definition_aware(&self) -> bool {
        true
    }

    fn post_process_merged_definition(&self, definition: &MergedDefinition, name: &str) -> ContainerResult<()> {
        info!("🔍 Creating '{}' ({} attributes)", name, definition.attributes().len());
        Ok(())
    }
}

fn main() {
    // 환경 설정 및 로깅 초기화
    let environment = Environment::current();
    // RUST_LOG가 프로필 파일에 있을 수 있으므로 로깅보다 먼저 로드
    let loaded = load_env_file(&environment);
    init_logging(&environment);
    info!("Current profile: {:?} ({} 파일 로드 됨)", environment, loaded);

    if let Err(e) = run() {
        error!("❌ 부트스트랩 실패: {}", e);
        std::process::exit(1);
    }
}

fn run() -> ContainerResult<()> {
    print_boxed_title("Container Bootstrap");

    print_step_start(1, "Registering definitions");
    let mut context = BootstrapContext::from_env()?;
    register_sample_definitions(&mut context)?;
    print_step_complete(1, "Definitions registered", context.factory().definition_count());

    print_step_start(2, "Refreshing context");
    let report = context.refresh()?.clone();
    for name in &report.instance_post_processors {
        print_sub_task(name, "registered");
    }
    print_step_complete(2, "Context refreshed", report.processed_extensions.len());

    let service = context.get_component_as::<OrderService>("orderService")?;
    info!("🛒 orderService uses {}", service.data_source.url);
    info!("👂 Event listeners: {:?}", context.event_listeners());

    let json = serde_json::to_string_pretty(&report).context("보고서 직렬화 실패")?;
    println!("{}", json);

    print_step_start(3, "Evaluating rollback rules");
    evaluate_rollback_rules()?;

    print_final_summary(&report);
    Ok(())
}

fn register_sample_definitions(context: &mut BootstrapContext) -> ContainerResult<()> {
    context.register_definition(
        ComponentDefinition::registry_post_processor("auditConfiguration", |_| Ok(AuditConfiguration))
            .with_order(OrderSpec::priority(0)),
    )?;
    context.register_definition(
        ComponentDefinition::factory_post_processor("placeholderResolver", |_| Ok(PlaceholderResolver))
            .with_order(OrderSpec::ordered(10)),
    )?;
    context.register_definition(ComponentDefinition::instance_post_processor("creationTracer", |_| {
        Ok(CreationTracer)
    }))?;

    context.register_definition(
        ComponentDefinition::component("dataSourceTemplate", |_| {
            Ok(DataSource {
                url: String::new(),
            })
        })
        .with_attribute("url", "${db.url}")
        .as_template(),
    )?;
    context.register_definition(
        ComponentDefinition::component("dataSource", |factory| {
            let merged = factory.merged_definition("dataSource")?;
            Ok(DataSource {
                url: merged.attribute("url").unwrap_or_default().to_string(),
            })
        })
        .with_parent("dataSourceTemplate")
        .with_role(Role::Infrastructure),
    )?;
    context.register_definition(ComponentDefinition::component("orderService", |factory| {
        let data_source = factory
            .get_component("dataSource")?
            .downcast::<DataSource>()
            .map_err(|_| ContainerError::TypeMismatch {
                name: "dataSource".to_string(),
                expected: "DataSource".to_string(),
                actual: "instance of another type".to_string(),
            })?;
        Ok(OrderService { data_source })
    }))?;
    Ok(())
}

fn evaluate_rollback_rules() -> ContainerResult<()> {
    let attribute = TransactionConfig::default_attribute()?;
    let attribute = if attribute.rules().is_empty() {
        attribute
            .rollback_for(RollbackRule::from_pattern("IOException")?)
            .no_rollback_for(RollbackRule::for_type(&PAYMENT_DECLINED)?)
    } else {
        attribute
    };

    for error_type in [&PAYMENT_DECLINED, &IO_EXCEPTION, &ARITHMETIC, &ILLEGAL_ARGUMENT] {
        let decision = if attribute.rollback_on_type(error_type) {
            "rollback"
        } else {
            "commit"
        };
        print_sub_task(error_type.simple_name(), decision);
    }
    print_step_complete(3, "Rollback rules evaluated", attribute.rules().len());
    Ok(())
}

/// 환경별 `.env` 프로필 파일을 로드하고, 실제로 로드한 파일 이름을 반환합니다
///
/// 프로필 파일이 없으면 기본 `.env` 파일을 시도합니다.
/// 로거 초기화 전에 호출되므로 여기서는 로그를 남기지 않습니다.
fn load_env_file(environment: &Environment) -> &'static str {
    match dotenv::from_filename(environment.profile_file()) {
        Ok(_) => environment.profile_file(),
        Err(_) => {
            // 기본 .env 파일 로드
            dotenv().ok();
            ".env"
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 우선 사용하며, 없으면 환경별 기본 레벨을 사용합니다.
///
/// # Examples
///
/// ```bash
/// # 부트스트랩 단계별 로그 확인
/// RUST_LOG=bean_container=debug cargo run
///
/// # 롤백 규칙 평가 로그까지 확인
/// RUST_LOG=bean_container::transaction=trace cargo run
/// ```
fn init_logging(environment: &Environment) {
    env_logger::init_from_env(Env::default().default_filter_or(environment.default_log_filter()));
}
