//! Structural parse events consumed by the indexing pass.
//!
//! [`ParseEvent`] is the contract with the upstream streaming tokenizer: one
//! event per structural callback, each annotated with the path of the value
//! it concerns. [`PathComponent`] represents a key or index in such a path.
//!
//! # Examples
//!
//! Events a tokenizer would emit for `["foo"]`:
//!
//! ```
//! use jsonindex::{ParseEvent, PathComponent, path};
//!
//! let events = vec![
//!     ParseEvent::ArrayStart { path: path![] },
//!     ParseEvent::String {
//!         path: path![0],
//!         value: "foo".to_string(),
//!     },
//!     ParseEvent::ArrayEnd { path: path![] },
//! ];
//! assert_eq!(events[1], ParseEvent::String {
//!     path: vec![PathComponent::Index(0)],
//!     value: "foo".to_string(),
//! });
//! ```

use crate::path::Path;

/// A component in the path to a JSON value.
///
/// Paths are sequences of keys or indices (for objects and arrays,
/// respectively) used in [`ParseEvent`] to indicate the location of a value
/// within a JSON document.
///
/// # Examples
///
/// ```
/// use jsonindex::PathComponent;
///
/// let key = PathComponent::Key("foo".to_string());
/// assert_eq!(key.as_key(), Some(&"foo".to_string()));
///
/// let idx = PathComponent::Index(3);
/// assert_eq!(idx.as_index(), Some(&3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// An object member key.
    Key(String),
    /// A zero-based array element index.
    Index(usize),
}

// Convenient conversions so users can write `path![0, "foo"]` etc.
macro_rules! impl_from_int_for_pathcomponent {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PathComponent {
                #[allow(clippy::cast_possible_truncation)]
                fn from(i: $t) -> Self {
                    PathComponent::Index(i as usize)
                }
            }
        )*
    };
}

impl_from_int_for_pathcomponent!(u8, u16, u32, u64, usize);

impl From<&str> for PathComponent {
    fn from(s: &str) -> Self {
        Self::Key(s.to_string())
    }
}

impl From<String> for PathComponent {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

/// Conversion used by the [`path!`](crate::path) macro to accept keys and
/// indices in one argument list.
#[doc(hidden)]
pub trait PathComponentFrom<T> {
    /// Converts `value` into a [`PathComponent`].
    fn from_path_component(value: T) -> PathComponent;
}

macro_rules! impl_integer_as_path_component {
    ($($t:ty),+) => {
        $(
            impl PathComponentFrom<$t> for PathComponent {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn from_path_component(value: $t) -> Self {
                    PathComponent::Index(value as usize)
                }
            }
        )+
    };
}
impl_integer_as_path_component!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl PathComponentFrom<&str> for PathComponent {
    fn from_path_component(value: &str) -> Self {
        PathComponent::Key(value.to_string())
    }
}

impl PathComponentFrom<String> for PathComponent {
    fn from_path_component(value: String) -> Self {
        PathComponent::Key(value)
    }
}

// Custom (de)serialization so that a `Path` becomes e.g. `["foo", 0, "bar"]`
// instead of the default tagged representation.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{Error, Unexpected, Visitor},
    };

    use super::PathComponent;

    impl Serialize for PathComponent {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                PathComponent::Key(k) => serializer.serialize_str(k),
                PathComponent::Index(i) => serializer.serialize_u64(*i as u64),
            }
        }
    }

    struct PathComponentVisitor;

    impl Visitor<'_> for PathComponentVisitor {
        type Value = PathComponent;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or unsigned integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(PathComponent::Key(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(PathComponent::Key(value))
        }

        #[allow(clippy::cast_possible_truncation)]
        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(PathComponent::Index(value as usize))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value < 0 {
                return Err(Error::invalid_value(
                    Unexpected::Signed(value),
                    &"non-negative index",
                ));
            }

            Ok(PathComponent::Index(usize::try_from(value).unwrap_or(usize::MAX)))
        }
    }

    impl<'de> Deserialize<'de> for PathComponent {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(PathComponentVisitor)
        }
    }
}

impl PathComponent {
    #[must_use]
    /// Returns the index if this component is an index, otherwise `None`.
    pub fn as_index(&self) -> Option<&usize> {
        if let Self::Index(v) = self {
            Some(v)
        } else {
            None
        }
    }

    #[must_use]
    /// Returns the key if this component is a key, otherwise `None`.
    pub fn as_key(&self) -> Option<&String> {
        if let Self::Key(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

/// A structural event reported by a streaming JSON tokenizer.
///
/// One event per structural callback. The `path` is a sequence of
/// [`PathComponent`] starting at the root: container events carry the
/// container's own path, scalar events carry the scalar's path, and [`Key`]
/// events carry the path of the object the key belongs to.
///
/// Scalar text arrives *decoded* (strings fully unescaped); numbers arrive as
/// their original source lexeme so the minified output can reproduce them
/// byte for byte.
///
/// [`Key`]: ParseEvent::Key
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(any(test, feature = "serde"), serde(tag = "kind"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// Marks the start of a JSON object.
    ObjectBegin {
        /// The path to the object.
        path: Path,
    },
    /// Marks the end of a JSON object.
    ObjectEnd {
        /// The path to the object.
        path: Path,
    },
    /// Marks the start of a JSON array.
    ArrayStart {
        /// The path to the array.
        path: Path,
    },
    /// Marks the end of a JSON array.
    ArrayEnd {
        /// The path to the array.
        path: Path,
    },
    /// An object member key. The value that follows is reported by its own
    /// event; a key is not itself a value.
    Key {
        /// The path to the enclosing object.
        path: Path,
        /// The decoded (unescaped) key text.
        name: String,
    },
    /// A JSON `null` value.
    Null {
        /// The path to the value.
        path: Path,
    },
    /// A JSON `true` or `false` value.
    Boolean {
        /// The path to the value.
        path: Path,
        /// The boolean value.
        value: bool,
    },
    /// A JSON number value.
    Number {
        /// The path to the value.
        path: Path,
        /// The number's original source lexeme, e.g. `1.0e+5`. Emitted
        /// verbatim; re-deriving the text from a decoded float would alter
        /// exponents and trailing fractional zeros.
        literal: String,
    },
    /// A JSON string value.
    String {
        /// The path to the value.
        path: Path,
        /// The decoded (unescaped) string content.
        value: String,
    },
}

impl ParseEvent {
    /// Returns the path carried by this event.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::ObjectBegin { path }
            | Self::ObjectEnd { path }
            | Self::ArrayStart { path }
            | Self::ArrayEnd { path }
            | Self::Key { path, .. }
            | Self::Null { path }
            | Self::Boolean { path, .. }
            | Self::Number { path, .. }
            | Self::String { path, .. } => path,
        }
    }

    /// Returns `true` for `ObjectEnd` and `ArrayEnd`.
    #[must_use]
    pub fn is_container_close(&self) -> bool {
        matches!(self, Self::ObjectEnd { .. } | Self::ArrayEnd { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn path_accessor_covers_all_variants() {
        let p = path!["a", 0];
        let events = [
            ParseEvent::ObjectBegin { path: p.clone() },
            ParseEvent::Key {
                path: p.clone(),
                name: "k".into(),
            },
            ParseEvent::Number {
                path: p.clone(),
                literal: "1".into(),
            },
            ParseEvent::ObjectEnd { path: p.clone() },
        ];
        for event in &events {
            assert_eq!(event.path(), &p);
        }
        assert!(events[3].is_container_close());
        assert!(!events[2].is_container_close());
    }

    #[test]
    fn path_components_serialize_bare() {
        let event = ParseEvent::String {
            path: path!["geometry", "coordinates", 0],
            value: "x".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"String","path":["geometry","coordinates",0],"value":"x"}"#
        );
        let back: ParseEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn component_accessors() {
        assert_eq!(PathComponent::from("foo").as_key(), Some(&"foo".to_string()));
        assert_eq!(PathComponent::from(2u32).as_index(), Some(&2));
        assert_eq!(PathComponent::from("foo").as_index(), None);
    }
}
