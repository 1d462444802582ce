//! Content-addressed keys for cached resources
//!
//! Every resource URL is reduced to a [`CacheKey`] before it touches the
//! loader's maps. The key is the SHA-256 digest of the raw URL bytes, so two
//! byte-identical URLs always share an entry and distinct URLs never do in
//! practice.
//!
//! # Examples
//!
//! ```
//! use xsolla_utils::CacheKey;
//!
//! let a = CacheKey::normalize("https://cdn.example.com/item.png").unwrap();
//! let b = CacheKey::normalize("https://cdn.example.com/item.png").unwrap();
//! assert_eq!(a, b);
//! assert!(a.as_str().starts_with("XsollaUtilsImage_"));
//! ```

use crate::error::LoadError;
use sha2::{Digest, Sha256};
use std::fmt;

/// Prefix shared by every generated resource name
pub const CACHE_KEY_PREFIX: &str = "XsollaUtilsImage_";

/// Normalized identifier of a cached resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a raw resource identifier.
    ///
    /// Returns [`LoadError::EmptyKey`] for an empty identifier.
    pub fn normalize(raw: &str) -> Result<Self, LoadError> {
        if raw.is_empty() {
            return Err(LoadError::EmptyKey);
        }

        let digest = Sha256::digest(raw.as_bytes());
        Ok(Self(format!("{}{}", CACHE_KEY_PREFIX, hex::encode(digest))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digest without the prefix
    pub fn digest(&self) -> &str {
        &self.0[CACHE_KEY_PREFIX.len()..]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
