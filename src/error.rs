//! Error types and cross-language mappings for `hashreduce`.
//!
//! The core has no recoverable error states in the usual sense (see
//! SPEC_FULL.md §7): almost every operation is total and panic-free, with
//! malformed ranges silently dropped and null handles defensively rejected.
//! `HrError` exists for the handful of genuinely fallible entry points
//! (parsing a malformed hex digest, the debug-only trie consistency
//! checker) and for mapping those into stable C ABI status codes.

/// Canonical error for the crate.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum HrError {
    /// Caller provided invalid argument(s) (e.g. a hex string that isn't
    /// exactly 32 hex digits).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The debug consistency checker found a propagation inconsistency.
    #[error("integrity violation: {0}")]
    IntegrityViolation(&'static str),
    /// A null/absent handle was passed where a write operation requires one.
    #[error("null handle: {0}")]
    NullHandle(&'static str),
}

/// Stable C FFI status codes (see `ffi` module).
///
/// Keep these values stable across releases -- they're part of the public ABI.
pub mod ffi_codes {
    pub const OK: i32 = 0;
    pub const INVALID_ARGUMENT: i32 = 1;
    pub const NULL_HANDLE: i32 = 2;
    pub const INTEGRITY_VIOLATION: i32 = 3;
    pub const INTERNAL: i32 = 255;
}

impl HrError {
    /// Convert to a stable C FFI status code.
    pub fn to_ffi_code(&self) -> i32 {
        use ffi_codes::*;
        match self {
            HrError::InvalidArgument(_) => INVALID_ARGUMENT,
            HrError::NullHandle(_) => NULL_HANDLE,
            HrError::IntegrityViolation(_) => INTEGRITY_VIOLATION,
        }
    }
}

/// Map `Result<T, HrError>` into a C status code.
/// Returns `ffi_codes::OK` on `Ok(_)`, or the mapped error code on `Err`.
pub fn result_to_code<T>(res: Result<T, HrError>) -> i32 {
    match res {
        Ok(_) => ffi_codes::OK,
        Err(e) => e.to_ffi_code(),
    }
}

/// Convenience alias for results that use `HrError`.
pub type HrResult<T> = Result<T, HrError>;
