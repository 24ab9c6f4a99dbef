//! 터미널 출력 포맷팅 유틸리티
//!
//! 컨테이너 부트스트랩 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료 요약 등을 시각적으로 표현합니다.

use crate::bootstrap::BootstrapReport;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// Unicode 박스 문자를 사용하여 시각적으로 눈에 띄는 제목을 출력합니다.
/// 텍스트는 자동으로 중앙 정렬됩니다.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::utils::display_terminal::print_boxed_title;
///
/// print_boxed_title("Container Bootstrap");
/// ```
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║               Container Bootstrap                ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// Output:
/// ```text
/// → Step 1: Running bootstrap extensions
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
///
/// 처리된 항목 수를 함께 표시합니다.
///
/// Output:
/// ```text
/// ✓ Step 1: Extensions processed (5 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 서브 작업의 상태를 표시합니다
///
/// Output:
/// ```text
///    ├─ PrematureInstantiationChecker: registered
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 부트스트랩 완료 요약을 출력합니다
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║          🎉 CONTAINER BOOTSTRAP FINISHED          ║
/// ╚══════════════════════════════════════════════════╝
///    🧩 Registry passes: 2
///    🔧 Factory hooks invoked: 4
///    ⛓️ Instance post-processors: 3
///    📦 Singletons: 5
/// ```
pub fn print_final_summary(report: &BootstrapReport) {
    println!();
    print_boxed_title("🎉 CONTAINER BOOTSTRAP FINISHED");
    println!("   🧩 Registry passes: {}", report.registry_passes);
    println!("   🔧 Factory hooks invoked: {}", report.factory_hooks_invoked);
    println!("   ⛓️ Instance post-processors: {}", report.instance_post_processors.len());
    println!("   📦 Singletons: {}", report.singletons_created);
    println!();
}
