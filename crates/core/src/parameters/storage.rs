//! Named parameter store
//!
//! Typed values keyed by short ASCII names, held in RAM for the life of the
//! process. A parameter keeps the type it was registered with.

use super::error::ParameterError;
use core::mem::discriminant;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Longest accepted parameter name, in bytes
pub const PARAM_NAME_LEN: usize = 16;

/// Store capacity (the index map needs a power of two)
pub const MAX_PARAMS: usize = 32;

/// Parameter key
pub type ParamName = String<PARAM_NAME_LEN>;

/// A typed parameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl ParamValue {
    /// Whether `other` holds the same variant
    pub fn same_kind(&self, other: &ParamValue) -> bool {
        discriminant(self) == discriminant(other)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "Bool",
            ParamValue::Int(_) => "Int",
            ParamValue::Float(_) => "Float",
        }
    }
}

fn name_of(name: &str) -> Result<ParamName, ParameterError> {
    let mut key = ParamName::new();
    key.push_str(name).map_err(|_| ParameterError::NameTooLong)?;
    Ok(key)
}

/// Fixed-capacity parameter store
#[derive(Debug, Default)]
pub struct ParameterStore {
    entries: FnvIndexMap<ParamName, ParamValue, MAX_PARAMS>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter holding `default`.
    ///
    /// Registering a name twice keeps the existing value.
    pub fn register(&mut self, name: &str, default: ParamValue) -> Result<(), ParameterError> {
        let key = name_of(name)?;
        if self.entries.contains_key(&key) {
            return Ok(());
        }
        self.entries
            .insert(key, default)
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Current value, or `None` for an unknown name
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = name_of(name).ok()?;
        self.entries.get(&key)
    }

    /// Replace the value of a registered parameter.
    ///
    /// `value` must be the same variant the parameter was registered with.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = name_of(name)?;
        let current = self
            .entries
            .get_mut(&key)
            .ok_or(ParameterError::UnknownParameter)?;
        if !current.same_kind(&value) {
            return Err(ParameterError::TypeMismatch);
        }
        *current = value;
        Ok(())
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
