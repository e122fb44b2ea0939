//! Game identifier generation.

use crate::repository::GameId;
use std::sync::atomic::{AtomicU32, Ordering};

/// Source of fresh game identifiers.
///
/// Any `Fn() -> GameId` closure is a generator, which lets tests pin ids.
pub trait GameIdGenerator: Send + Sync {
    /// Returns an identifier no previous call has returned.
    fn generate(&self) -> GameId;
}

impl<F> GameIdGenerator for F
where
    F: Fn() -> GameId + Send + Sync,
{
    fn generate(&self) -> GameId {
        self()
    }
}

/// Sequence shared by every generator in the process.
static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Generates 32-char lowercase hex ids from the UTC clock, the process id
/// and a process-wide counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampIdGenerator;

impl TimestampIdGenerator {
    /// Creates a generator.
    pub fn new() -> Self {
        Self
    }
}

impl GameIdGenerator for TimestampIdGenerator {
    fn generate(&self) -> GameId {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("{:016x}{:08x}{:08x}", nanos, std::process::id(), sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_hex_and_unique() {
        let generator = TimestampIdGenerator::new();
        let ids: HashSet<GameId> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 1000);
        for id in &ids {
            assert_eq!(id.len(), 32);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_generators_share_the_sequence() {
        let first = TimestampIdGenerator::new();
        let second = TimestampIdGenerator::new();
        let a = first.generate();
        let b = second.generate();
        assert_ne!(a, b);
        // Last 8 hex chars are the sequence number.
        let seq = |id: &str| u32::from_str_radix(&id[24..], 16).unwrap();
        assert!(seq(&b) > seq(&a) || seq(&a) == u32::MAX);
    }

    #[test]
    fn test_closure_generator() {
        let generator = || "fixed".to_string();
        assert_eq!(generator.generate(), "fixed");
    }
}
