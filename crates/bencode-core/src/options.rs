//! Decoder configuration: hardening limits and strict key checking.

use serde::{Deserialize, Serialize};

/// Largest byte string accepted by default (64 MiB).
pub const DEFAULT_MAX_STRING_LEN: usize = 64 * 1024 * 1024;

/// Deepest list/dictionary nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs for a decode call.
///
/// Deserializable with every field optional, so it can sit inside a caller's
/// own configuration file:
///
/// ```
/// use bencode_core::DecodeOptions;
///
/// let opts: DecodeOptions = serde_json::from_str(r#"{"strict": true}"#).unwrap();
/// assert!(opts.strict);
/// assert_eq!(opts.max_depth, bencode_core::options::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Byte strings declaring a longer length fail with `SizeLimitExceeded`.
    pub max_string_len: usize,
    /// Containers nested deeper than this fail with `NestingTooDeep`.
    pub max_depth: usize,
    /// Fail on duplicate or unsorted dictionary keys instead of reporting them.
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

impl DecodeOptions {
    /// Default limits with strict dictionary key checking.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
