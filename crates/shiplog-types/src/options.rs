use serde::{Deserialize, Serialize};

/// Optional parameters for creating a log group.
///
/// Defaults: `overwrite = false`, `max_len = 0` (unbounded).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Delete existing groups with the same `(id, name, type)` first.
    pub overwrite: bool,
    /// Maximum number of retained entries; `0` means unbounded.
    pub max_len: usize,
}

impl CreateOptions {
    /// Set the overwrite flag.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the entry bound (`0` for unbounded).
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }
}

/// Normalise a caller-supplied bound: negative values floor to `0`, which
/// means unbounded.
pub fn clamp_max_len(raw: i64) -> usize {
    usize::try_from(raw.max(0)).unwrap_or(usize::MAX)
}

/// Normalise a caller-supplied id: the empty string means "unnamed".
pub fn normalize_id(id: &str) -> Option<String> {
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
