//! Parameter error types

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Name exceeds the key capacity
    NameTooLong,
    /// No parameter registered under this name
    UnknownParameter,
    /// Value type differs from the registered type
    TypeMismatch,
    /// Store is full
    StoreFull,
}

impl ParameterError {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterError::NameTooLong => "NameTooLong",
            ParameterError::UnknownParameter => "UnknownParameter",
            ParameterError::TypeMismatch => "TypeMismatch",
            ParameterError::StoreFull => "StoreFull",
        }
    }
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::NameTooLong => write!(f, "parameter name too long"),
            ParameterError::UnknownParameter => write!(f, "unknown parameter"),
            ParameterError::TypeMismatch => write!(f, "parameter type mismatch"),
            ParameterError::StoreFull => write!(f, "parameter store full"),
        }
    }
}
