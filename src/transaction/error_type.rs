//! # Error Type Hierarchy
//!
//! 롤백 규칙 매칭에 사용되는 에러 타입 계층을 정적 데이터로 표현합니다.
//! 각 [`TypeDescriptor`]는 정규화된 이름과 부모 타입에 대한 `'static` 참조를 가지며,
//! 모든 체인은 루트 센티널 [`OBJECT`]에서 끝납니다.
//!
//! ```text
//! lang::Object
//! └── lang::Throwable                 ← 에러 계층의 루트
//!     ├── lang::Error
//!     │   └── lang::OutOfMemoryError
//!     └── lang::Exception
//!         ├── io::IOException
//!         └── lang::RuntimeException
//!             ├── lang::IllegalArgumentException
//!             ├── lang::IllegalStateException
//!             └── lang::ArithmeticException
//! ```
//!
//! 애플리케이션 에러 타입은 같은 방식으로 `static`을 선언해 계층에 연결합니다.
//!
//! ```rust,ignore
//! pub static PAYMENT_DECLINED: TypeDescriptor =
//!     TypeDescriptor::new("billing::PaymentDeclinedException", &RUNTIME_EXCEPTION);
//! ```

use std::fmt;

/// 에러 타입 하나에 대한 정적 설명
#[derive(Debug)]
pub struct TypeDescriptor {
    qualified_name: &'static str,
    parent: Option<&'static TypeDescriptor>,
}

pub static OBJECT: TypeDescriptor = TypeDescriptor::root("lang::Object");
pub static THROWABLE: TypeDescriptor = TypeDescriptor::new("lang::Throwable", &OBJECT);
pub static ERROR: TypeDescriptor = TypeDescriptor::new("lang::Error", &THROWABLE);
pub static EXCEPTION: TypeDescriptor = TypeDescriptor::new("lang::Exception", &THROWABLE);
pub static RUNTIME_EXCEPTION: TypeDescriptor = TypeDescriptor::new("lang::RuntimeException", &EXCEPTION);
pub static ILLEGAL_ARGUMENT: TypeDescriptor =
    TypeDescriptor::new("lang::IllegalArgumentException", &RUNTIME_EXCEPTION);
pub static ILLEGAL_STATE: TypeDescriptor = TypeDescriptor::new("lang::IllegalStateException", &RUNTIME_EXCEPTION);
pub static ARITHMETIC: TypeDescriptor = TypeDescriptor::new("lang::ArithmeticException", &RUNTIME_EXCEPTION);
pub static IO_EXCEPTION: TypeDescriptor = TypeDescriptor::new("io::IOException", &EXCEPTION);
pub static OUT_OF_MEMORY: TypeDescriptor = TypeDescriptor::new("lang::OutOfMemoryError", &ERROR);

impl TypeDescriptor {
    pub const fn new(qualified_name: &'static str, parent: &'static TypeDescriptor) -> Self {
        Self {
            qualified_name,
            parent: Some(parent),
        }
    }

    const fn root(qualified_name: &'static str) -> Self {
        Self {
            qualified_name,
            parent: None,
        }
    }

    pub fn qualified_name(&self) -> &'static str {
        self.qualified_name
    }

    /// `::` 뒤의 마지막 세그먼트
    pub fn simple_name(&self) -> &'static str {
        match self.qualified_name.rfind("::") {
            Some(pos) => &self.qualified_name[pos + 2..],
            None => self.qualified_name,
        }
    }

    pub fn parent(&self) -> Option<&'static TypeDescriptor> {
        self.parent
    }

    /// 자기 자신부터 루트까지 차례로 돌려주는 반복자
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    pub fn is_root_error(&self) -> bool {
        self == &THROWABLE
    }

    /// 에러 계층 ([`THROWABLE`] 이하)에 속하는지 여부
    pub fn is_error_type(&self) -> bool {
        self.is_subtype_of(&THROWABLE)
    }

    pub fn is_subtype_of(&self, other: &TypeDescriptor) -> bool {
        self.ancestors().any(|ancestor| ancestor == other)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name)
    }
}

/// [`TypeDescriptor::ancestors`]의 반복자. 루트 센티널에서 끝납니다.
pub struct Ancestors<'a> {
    next: Option<&'a TypeDescriptor>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent;
        Some(current)
    }
}

/// 롤백 판단 대상이 될 수 있는 에러
///
/// ```rust,ignore
/// #[derive(Debug, thiserror::Error)]
/// #[error("payment declined: {0}")]
/// struct PaymentDeclined(String);
///
/// impl Throwable for PaymentDeclined {
///     fn error_type(&self) -> &'static TypeDescriptor {
///         &PAYMENT_DECLINED
///     }
/// }
/// ```
pub trait Throwable: std::error::Error {
    fn error_type(&self) -> &'static TypeDescriptor;
}
