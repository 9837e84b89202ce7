//! Path rendering: the dotted string notation used as index keys.

use std::fmt::Write as _;

use crate::PathComponent;

/// The structural path to a JSON value, from the document root.
pub type Path = Vec<PathComponent>;

/// Renders a path in the dotted notation used as index keys and selector
/// inputs: object keys joined with `.`, array elements as their decimal
/// index. The root path renders as the empty string.
///
/// # Examples
///
/// ```
/// use jsonindex::{path, path_string};
///
/// assert_eq!(path_string(&path![]), "");
/// assert_eq!(path_string(&path!["geometry", "coordinates"]), "geometry.coordinates");
/// assert_eq!(path_string(&path!["rows", 2, "id"]), "rows.2.id");
/// ```
#[must_use]
pub fn path_string(path: &[PathComponent]) -> String {
    let mut out = String::new();
    for (i, component) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        match component {
            PathComponent::Key(k) => out.push_str(k),
            PathComponent::Index(n) => {
                // Infallible for String.
                let _ = write!(out, "{n}");
            }
        }
    }
    out
}
