//! Durability mode for store file writes.
//!
//! Defines when a mutation reaches the disk.

use std::str::FromStr;

/// Durability mode for store file writes.
///
/// # Mode Comparison
///
/// | Mode | Write happens | Failure handling | Use case |
/// |------|---------------|------------------|----------|
/// | None | never | n/a | Tests, scratch stores |
/// | Async | background thread, latest snapshot wins | logged | Default |
/// | Strict | inside the mutation, fsynced | mutation rolled back, error returned | Data that must not diverge |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// No durability - nothing is read or written.
    None,

    /// Fire-and-forget rewrite after every mutation.
    ///
    /// The caller never waits for the disk. Writes are serialized on one
    /// thread and a newer snapshot replaces any snapshot not yet written,
    /// so the file always converges to the latest mutation. A failed write
    /// is logged and memory keeps the mutation.
    #[default]
    Async,

    /// Synchronous rewrite with fsync before the mutation returns.
    ///
    /// A failed write undoes the in-memory mutation and is reported to
    /// the caller.
    Strict,
}

impl DurabilityMode {
    /// Check if this mode touches the store file at all.
    pub fn requires_file(&self) -> bool {
        !matches!(self, DurabilityMode::None)
    }

    /// Check if this mode writes and fsyncs before a mutation returns.
    pub fn requires_immediate_fsync(&self) -> bool {
        matches!(self, DurabilityMode::Strict)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            DurabilityMode::None => "none",
            DurabilityMode::Async => "async",
            DurabilityMode::Strict => "strict",
        }
    }

    /// Human-readable description of the mode.
    pub fn description(&self) -> &'static str {
        match self {
            DurabilityMode::None => "No durability (in-memory only)",
            DurabilityMode::Async => "Background rewrite (latest snapshot wins)",
            DurabilityMode::Strict => "Synchronous rewrite with fsync",
        }
    }
}

impl std::fmt::Display for DurabilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurabilityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "memory" => Ok(DurabilityMode::None),
            "async" => Ok(DurabilityMode::Async),
            "strict" | "sync" => Ok(DurabilityMode::Strict),
            other => Err(format!(
                "unknown durability mode `{}` (expected none, async or strict)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_mode() {
        let mode = DurabilityMode::None;
        assert!(!mode.requires_file());
        assert!(!mode.requires_immediate_fsync());
    }

    #[test]
    fn test_strict_mode() {
        let mode = DurabilityMode::Strict;
        assert!(mode.requires_file());
        assert!(mode.requires_immediate_fsync());
    }

    #[test]
    fn test_default_is_async() {
        let mode = DurabilityMode::default();
        assert_eq!(mode, DurabilityMode::Async);
        assert!(mode.requires_file());
        assert!(!mode.requires_immediate_fsync());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("none".parse::<DurabilityMode>().unwrap(), DurabilityMode::None);
        assert_eq!("ASYNC".parse::<DurabilityMode>().unwrap(), DurabilityMode::Async);
        assert_eq!(" strict ".parse::<DurabilityMode>().unwrap(), DurabilityMode::Strict);
        assert!("fast".parse::<DurabilityMode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [DurabilityMode::None, DurabilityMode::Async, DurabilityMode::Strict] {
            assert_eq!(mode.to_string().parse::<DurabilityMode>().unwrap(), mode);
        }
    }
}
