//! Project identity model.

use serde::{Deserialize, Serialize};

use crate::error::{StackgenError, StackgenResult};

/// The resolved canonical name of a generated project and its derived
/// casing forms. Derived once at composition time, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentity {
    /// Name exactly as resolved (explicit, git remote, or directory).
    pub raw_name: String,
    /// PascalCase form used for the generated stack class.
    pub class_name: String,
    /// Lowercased form used for generated file paths.
    pub file_base: String,
}

impl ProjectIdentity {
    /// Derive the casing forms from a raw name.
    ///
    /// Fails when the name contains no alphanumeric characters, since no
    /// usable class name can be derived from it.
    pub fn from_raw(raw_name: impl Into<String>) -> StackgenResult<Self> {
        let raw_name = raw_name.into();
        let class_name = pascal_case(&raw_name);
        if class_name.is_empty() {
            return Err(StackgenError::InvalidName(raw_name));
        }
        let file_base = raw_name.to_lowercase();
        Ok(Self {
            raw_name,
            class_name,
            file_base,
        })
    }
}

/// PascalCase transform: every maximal run of non-alphanumeric characters
/// acts as a separator; each remaining segment is capitalized on its first
/// character and lowercased on the rest.
pub fn pascal_case(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            // Split segments are non-empty by the filter above.
            match chars.next() {
                Some(first) => {
                    format!("{}{}", first.to_ascii_uppercase(), chars.as_str().to_ascii_lowercase())
                }
                None => String::new(),
            }
        })
        .collect()
}
