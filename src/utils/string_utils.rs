//! # 문자열 유틸리티
//!
//! 정의 이름 검증, 타입 이름 정리, 패턴 목록 파싱 등 문자열 처리와 관련된
//! 공통 유틸리티 함수들입니다.

/// 문자열이 유효한지 확인 (빈 문자열이 아니고 공백만으로 구성되지 않음)
///
/// # 인자
/// * `value` - 확인할 문자열
///
/// # 반환값
/// * `true` - 유효한 문자열
/// * `false` - 빈 문자열이거나 공백만 있는 경우
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::is_valid_string;
///
/// assert_eq!(is_valid_string("Hello"), true);
/// assert_eq!(is_valid_string("   "), false);
/// assert_eq!(is_valid_string(""), false);
/// ```
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 전체 경로가 포함된 타입 이름에서 마지막 세그먼트만 추출합니다.
///
/// `std::any::type_name::<T>()`는 전체 모듈 경로를 포함하므로
/// (예: `bean_container::bootstrap::checker::PrematureInstantiationChecker`),
/// 로그와 보고서에는 실제 타입 이름만 사용합니다. 제네릭 인자는 그대로 둡니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(short_type_name("a::b::Checker"), "Checker");
/// assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper<b::Inner>");
/// ```
pub fn short_type_name(type_name: &str) -> String {
    let path_end = type_name.find('<').unwrap_or(type_name.len());
    match type_name[..path_end].rfind("::") {
        Some(pos) => type_name[pos + 2..].to_string(),
        None => type_name.to_string(),
    }
}

/// 쉼표로 구분된 패턴 목록을 파싱합니다.
///
/// 각 항목의 앞뒤 공백을 제거하고 빈 항목은 버립니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(split_patterns(" IOException, ,Timeout "), vec!["IOException", "Timeout"]);
/// ```
pub fn split_patterns(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|pattern| is_valid_string(pattern))
        .map(str::to_string)
        .collect()
}
