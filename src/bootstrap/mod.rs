//! # Bootstrap Module
//!
//! 컨테이너 부트스트랩 파이프라인을 담당합니다.
//!
//! ## 모듈 구성
//!
//! - [`delegate`] - 1~7단계 후처리기 실행/등록 순서
//! - [`checker`] - 체인 완성 전 생성된 컴포넌트 보고
//! - [`detector`] - 이벤트 리스너 감지
//! - [`context`] - 한 번의 refresh로 전체 파이프라인 실행
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `PostProcessorRegistrationDelegate` | [`delegate`] |
//! | `BeanPostProcessorChecker` | [`PrematureInstantiationChecker`] |
//! | `ApplicationListenerDetector` | [`ListenerDetector`] |
//! | `AbstractApplicationContext.refresh()` | [`BootstrapContext::refresh`] |

pub mod checker;
pub mod context;
pub mod delegate;
pub mod detector;

pub use checker::PrematureInstantiationChecker;
pub use context::{BootstrapContext, BootstrapReport};
pub use delegate::{
    invoke_factory_post_processors, register_instance_post_processors, run_bootstrap_extensions,
    run_bootstrap_extensions_with, BootstrapOptions, BootstrapOutcome, FactoryPhaseStats, ProcessedNames,
};
pub use detector::ListenerDetector;
