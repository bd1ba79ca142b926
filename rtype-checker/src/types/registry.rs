use std::collections::BTreeSet;

use thiserror::Error;

use super::BaseType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("'{0}' is already a builtin type tag")]
    Builtin(String),
    #[error("'{0}' is not a valid type tag")]
    InvalidTag(String),
}

/// Custom type tags known to the inferrer, e.g. project-specific S3 classes.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    custom: BTreeSet<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, S>(tags: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for tag in tags {
            registry.register(tag.as_ref())?;
        }
        Ok(registry)
    }

    /// Registers `tag`; registering the same tag twice is a no-op.
    pub fn register(&mut self, tag: &str) -> Result<BaseType, RegistryError> {
        if BaseType::builtin(tag).is_some() {
            return Err(RegistryError::Builtin(tag.to_string()));
        }
        if !is_valid_tag(tag) {
            return Err(RegistryError::InvalidTag(tag.to_string()));
        }
        self.custom.insert(tag.to_string());
        Ok(BaseType::Custom(tag.to_string()))
    }

    pub fn resolve(&self, tag: &str) -> Option<BaseType> {
        BaseType::builtin(tag).or_else(|| {
            self.custom
                .contains(tag)
                .then(|| BaseType::Custom(tag.to_string()))
        })
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.custom.contains(tag)
    }

    pub fn custom_tags(&self) -> impl Iterator<Item = &str> {
        self.custom.iter().map(String::as_str)
    }
}

fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '.' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '_')
}
