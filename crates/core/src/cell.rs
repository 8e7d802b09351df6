//! Three-state declarative value slots.
//!
//! A [`Cell`] is what the plugin host hands to a mapper for every attribute:
//! the user either omitted the value (`Null`), the host has not resolved it yet
//! (`Unknown`, e.g. a computed attribute during planning), or it is `Present`.
//! Mappers treat `Null` and `Unknown` identically on input ("absent") and always
//! choose explicitly between `Null` and `Present` on output.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Cell<T> {
    /// Omitted by the user.
    Null,
    /// Not yet resolved by the host.
    Unknown,
    Present(T),
}

impl<T> Default for Cell<T> {
    fn default() -> Self {
        Cell::Null
    }
}

impl<T> Cell<T> {
    pub fn present(value: T) -> Self {
        Cell::Present(value)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Cell::Unknown)
    }

    /// True for both `Null` and `Unknown`.
    pub fn is_absent(&self) -> bool {
        !self.is_present()
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Cell::Present(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Cell::Present(v) => Some(v),
            Cell::Null | Cell::Unknown => None,
        }
    }

    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        match self {
            Cell::Present(v) => Some(v),
            Cell::Null | Cell::Unknown => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Cell::Present(v) => Some(v),
            Cell::Null | Cell::Unknown => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Cell<U> {
        match self {
            Cell::Present(v) => Cell::Present(f(v)),
            Cell::Null => Cell::Null,
            Cell::Unknown => Cell::Unknown,
        }
    }
}

impl<T> From<Option<T>> for Cell<T> {
    fn from(value: Option<T>) -> Self {
        optional_to_cell(value)
    }
}

/// Absent iff the cell is null or unknown.
pub fn cell_to_optional<T: Clone>(cell: &Cell<T>) -> Option<T> {
    cell.as_option().cloned()
}

/// Null iff the optional is absent.
pub fn optional_to_cell<T>(value: Option<T>) -> Cell<T> {
    match value {
        Some(v) => Cell::Present(v),
        None => Cell::Null,
    }
}

/// Like [`optional_to_cell`], but an empty string on the wire also becomes null.
pub fn non_empty_string_cell(value: Option<&str>) -> Cell<String> {
    match value {
        Some(v) if !v.is_empty() => Cell::Present(v.to_string()),
        _ => Cell::Null,
    }
}

/// Absent or empty strings map to `None`.
pub fn non_empty_string(cell: &Cell<String>) -> Option<String> {
    cell.as_option().filter(|s| !s.is_empty()).cloned()
}

// ── serde ───────────────────────────────────────────────────────────
//
// Unknown never leaves the host, so it serializes as null like `Null` does.

impl<T: Serialize> Serialize for Cell<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Present(v) => serializer.serialize_some(v),
            Cell::Null | Cell::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Cell<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(optional_to_cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_unknown_are_both_absent() {
        let null: Cell<String> = Cell::Null;
        let unknown: Cell<String> = Cell::Unknown;
        assert_eq!(cell_to_optional(&null), cell_to_optional(&unknown));
        assert!(null.is_absent());
        assert!(unknown.is_absent());
    }

    #[test]
    fn optional_round_trips_through_cell() {
        assert_eq!(optional_to_cell(Some(5)), Cell::Present(5));
        assert_eq!(optional_to_cell::<i64>(None), Cell::Null);
        assert_eq!(cell_to_optional(&Cell::Present("x".to_string())), Some("x".to_string()));
    }

    #[test]
    fn empty_wire_strings_become_null() {
        assert_eq!(non_empty_string_cell(Some("")), Cell::Null);
        assert_eq!(non_empty_string_cell(None), Cell::Null);
        assert_eq!(non_empty_string_cell(Some("#ops")), Cell::Present("#ops".to_string()));
        assert_eq!(non_empty_string(&Cell::Present(String::new())), None);
    }

    #[test]
    fn serde_uses_null_for_absent_cells() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Doc {
            #[serde(default)]
            a: Cell<i64>,
            #[serde(default)]
            b: Cell<String>,
        }

        let doc: Doc = serde_json::from_str(r#"{"a": 3}"#).unwrap();
        assert_eq!(doc.a, Cell::Present(3));
        assert_eq!(doc.b, Cell::Null);

        let unknown = Doc { a: Cell::Unknown, b: Cell::Present("v".into()) };
        assert_eq!(serde_json::to_string(&unknown).unwrap(), r#"{"a":null,"b":"v"}"#);
    }
}
