//! Construction schemas and the factories bound to them

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::record::{Arguments, Record};

/// Builds a `T` from positional arguments
///
/// Implemented for every `Fn(Arguments) -> Result<T, BoxError>`; implement it
/// by hand when a factory carries state of its own.
pub trait Factory<T>: Send + Sync {
    fn construct(&self, args: Arguments) -> Result<T, BoxError>;
}

impl<T, F> Factory<T> for F
where
    F: Fn(Arguments) -> Result<T, BoxError> + Send + Sync,
{
    fn construct(&self, args: Arguments) -> Result<T, BoxError> {
        self(args)
    }
}

/// A declared factory of a target type, before validation
///
/// Each parameter carries its declared name, or `None` when it has none.
pub struct FactoryDecl<T> {
    label: String,
    params: Vec<Option<String>>,
    factory: Arc<dyn Factory<T>>,
}

impl<T> FactoryDecl<T> {
    /// Declare a factory with per-parameter names
    pub fn new<F>(label: impl Into<String>, params: Vec<Option<String>>, factory: F) -> Self
    where
        F: Fn(Arguments) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self::from_factory(label, params, Arc::new(factory))
    }

    /// Declare a factory whose every parameter is named
    pub fn named<I, S, F>(label: impl Into<String>, names: I, factory: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Arguments) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let params = names.into_iter().map(|name| Some(name.into())).collect();
        Self::new(label, params, factory)
    }

    /// Declare a factory that takes part in no schema
    pub fn unnamed<F>(label: impl Into<String>, arity: usize, factory: F) -> Self
    where
        F: Fn(Arguments) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self::new(label, vec![None; arity], factory)
    }

    pub fn from_factory(
        label: impl Into<String>,
        params: Vec<Option<String>>,
        factory: Arc<dyn Factory<T>>,
    ) -> Self {
        Self {
            label: label.into(),
            params,
            factory,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn params(&self) -> &[Option<String>] {
        &self.params
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Option<String>>, Arc<dyn Factory<T>>) {
        (self.label, self.params, self.factory)
    }
}

impl<T> fmt::Debug for FactoryDecl<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryDecl")
            .field("label", &self.label)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A validated, ordered set of parameter names bound to one factory
pub struct ConstructionSchema<T> {
    label: String,
    names: Vec<String>,
    factory: Arc<dyn Factory<T>>,
}

impl<T> ConstructionSchema<T> {
    /// `names` must already be case folded, non-blank and unique
    pub(crate) fn new(label: String, names: Vec<String>, factory: Arc<dyn Factory<T>>) -> Self {
        Self {
            label,
            names,
            factory,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Parameter names in declaration order
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether both schemas hold the same names, in any order
    #[must_use]
    pub fn same_names(&self, other: &Self) -> bool {
        self.names.len() == other.names.len()
            && self.names.iter().all(|name| other.names.contains(name))
    }

    /// Whether every name is a key of `record`
    #[must_use]
    pub fn is_satisfied_by(&self, record: &Record) -> bool {
        record.len() >= self.names.len() && self.names.iter().all(|name| record.contains_key(name))
    }

    pub(crate) fn factory(&self) -> &dyn Factory<T> {
        self.factory.as_ref()
    }
}

impl<T> Clone for ConstructionSchema<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            names: self.names.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Display for ConstructionSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label, self.names.join(", "))
    }
}

impl<T> fmt::Debug for ConstructionSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructionSchema")
            .field("label", &self.label)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}
