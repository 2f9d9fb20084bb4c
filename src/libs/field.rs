//! Tri-state column value for partial updates.
//!
//! A plain `Option` cannot express the difference between "leave this column
//! alone" and "set this column to NULL", so update payloads carry a
//! [`Field`] per attribute instead. Only columns that are [`Field::Null`] or
//! [`Field::Set`] end up in the generated `UPDATE` statement.

use serde::{Deserialize, Deserializer};

/// The state of a single column in a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    /// The caller did not mention this column; it is left untouched.
    #[default]
    Unset,
    /// The caller asked for this column to be cleared to NULL.
    Null,
    /// The caller supplied a new value for this column.
    Set(T),
}

impl<T> Field<T> {
    /// Returns true when the column is not part of the update.
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    /// Returns the value when one was supplied.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Field::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    /// Collapses a plain optional into `Null`/`Set`. Used where "absent"
    /// already means "clear", e.g. full-replace requests.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Set(value),
            None => Field::Null,
        }
    }
}

/// JSON `null` deserializes to [`Field::Null`], any other value to
/// [`Field::Set`]. An absent key never reaches this impl; pair it with
/// `#[serde(default)]` so absence stays [`Field::Unset`].
impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}
