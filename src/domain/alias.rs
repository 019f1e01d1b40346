//! Alias domain: the account's known aliases and alias name rules.

use crate::sources::AliasRegistry;
use async_lock::RwLock;
use async_trait::async_trait;
use thiserror::Error;

pub const MIN_ALIAS_LENGTH: usize = 4;
pub const MAX_ALIAS_LENGTH: usize = 30;

/// Why an alias name was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("Alias shorter than 4 characters")]
    TooShort,

    #[error("Alias longer than 30 characters")]
    TooLong,

    #[error("Alias may only contain a-z, 0-9, '-', '@', '_' and '.'")]
    InvalidCharacter,

    #[error("Alias already belongs to this account")]
    AlreadyOwned,
}

fn is_alias_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-' | '@' | '_' | '.')
}

/// Check an alias name against the length and charset rules.
pub fn validate_alias(name: &str) -> Result<(), AliasError> {
    let len = name.chars().count();
    if len < MIN_ALIAS_LENGTH {
        return Err(AliasError::TooShort);
    }
    if len > MAX_ALIAS_LENGTH {
        return Err(AliasError::TooLong);
    }
    if !name.chars().all(is_alias_char) {
        return Err(AliasError::InvalidCharacter);
    }
    Ok(())
}

/// Strip the `alias:<chain>:` prefix the node puts on alias strings.
pub fn alias_name(full: &str) -> &str {
    full.rsplit(':').next().unwrap_or(full)
}

/// In-memory alias list, replaced wholesale on every balance refresh.
#[derive(Default)]
pub struct AliasBook {
    aliases: RwLock<Vec<String>>,
}

impl AliasBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<String> {
        self.aliases.read().await.clone()
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.aliases
            .read()
            .await
            .iter()
            .any(|alias| alias_name(alias) == name)
    }

    /// Validate a new alias for this account, including ownership.
    pub async fn check_new(&self, name: &str) -> Result<(), AliasError> {
        validate_alias(name)?;
        if self.contains(name).await {
            return Err(AliasError::AlreadyOwned);
        }
        Ok(())
    }
}

#[async_trait]
impl AliasRegistry for AliasBook {
    async fn replace(&self, aliases: Vec<String>) {
        *self.aliases.write().await = aliases;
    }
}
