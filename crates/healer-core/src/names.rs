use crate::error::{HealerError, HealerResult};
use crate::layer::Layer;

/// Databases owned by the server itself.
pub const SYSTEM_DATABASES: [&str; 3] = ["admin", "local", "config"];

const DATABASE_FORBIDDEN: &[char] = &['/', '\\', '.', ' ', '"', '$', '*', '<', '>', ':', '|', '?', '\0'];
const MAX_DATABASE_NAME_BYTES: usize = 63;

pub fn is_system_database(name: &str) -> bool {
    SYSTEM_DATABASES.contains(&name)
}

pub fn is_system_collection(name: &str) -> bool {
    name.starts_with("system.")
}

/// Exact membership test over a list of names.
pub fn contains_name<S: AsRef<str>>(names: &[S], name: &str) -> bool {
    names.iter().any(|n| n.as_ref() == name)
}

/// `NotFound` unless `name` is one of `names`.
pub fn require_listed<S: AsRef<str>>(names: &[S], layer: Layer, name: &str) -> HealerResult<()> {
    if contains_name(names, name) {
        Ok(())
    } else {
        Err(HealerError::not_found(layer, name))
    }
}

/// `AlreadyExists` if `name` is one of `names`.
pub fn require_unlisted<S: AsRef<str>>(names: &[S], layer: Layer, name: &str) -> HealerResult<()> {
    if contains_name(names, name) {
        Err(HealerError::already_exists(layer, name))
    } else {
        Ok(())
    }
}

pub fn validate_database_name(name: &str) -> HealerResult<()> {
    let invalid = |reason: &str| HealerError::InvalidName {
        layer: Layer::Database,
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.len() > MAX_DATABASE_NAME_BYTES {
        return Err(invalid("name is longer than 63 bytes"));
    }
    if let Some(c) = name.chars().find(|c| DATABASE_FORBIDDEN.contains(c)) {
        return Err(invalid(&format!("character {c:?} is not allowed")));
    }
    Ok(())
}

pub fn validate_collection_name(name: &str) -> HealerResult<()> {
    let invalid = |reason: &str| HealerError::InvalidName {
        layer: Layer::Collection,
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains('$') || name.contains('\0') {
        return Err(invalid("'$' and NUL are not allowed"));
    }
    if is_system_collection(name) {
        return Err(invalid("the 'system.' prefix is reserved"));
    }
    Ok(())
}
