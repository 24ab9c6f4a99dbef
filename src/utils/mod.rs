//! 공통 유틸리티 함수 모듈
//!
//! 크레이트 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//! 문자열 처리, 터미널 출력 등의 기능을 포함합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 타입 이름 정리, 패턴 목록 파싱
//! - [`display_terminal`] - 부트스트랩 진행 상황 출력 함수들

pub mod string_utils;
pub mod display_terminal;
