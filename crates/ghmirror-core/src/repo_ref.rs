//! `RepoRef` -- identifies the single repository a store/fetcher/engine
//! operate against.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// A `owner/name` GitHub repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// A filesystem-safe identifier used for the mirror database's filename,
    /// e.g. `owner_repo`.
    pub fn slug(&self) -> String {
        format!("{}_{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let (owner, name) = s.split_once('/').ok_or_else(|| CoreError::InvalidRepoRef {
            input: s.to_string(),
        })?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(CoreError::InvalidRepoRef {
                input: s.to_string(),
            });
        }
        Ok(Self::new(owner, name))
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
