//! Positional arguments handed to a factory

use smallvec::SmallVec;

use super::value::{FromValue, Value, ValueError};

/// Ordered argument values extracted for one schema
///
/// Factories consume them front to back with [`Arguments::next`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments {
    values: SmallVec<[Value; 8]>,
    cursor: usize,
}

impl Arguments {
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Take the next argument as `T`
    pub fn next<T: FromValue>(&mut self) -> Result<T, ValueError> {
        let position = self.cursor;
        let available = self.values.len();
        let slot = self
            .values
            .get_mut(position)
            .ok_or(ValueError::MissingArgument {
                position,
                available,
            })?;
        self.cursor += 1;
        T::from_value(std::mem::take(slot))
    }

    /// Peek at an argument without consuming it
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of arguments not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.cursor)
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values.into_vec()
    }
}
