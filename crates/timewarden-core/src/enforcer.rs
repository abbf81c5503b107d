//! Limit enforcement policy
//!
//! One pure decision applied at two call sites: reactively when a session
//! closes (the duration is already committed, in-progress is zero) and
//! periodically while a session stays open (in-progress is the elapsed
//! time not yet committed).

pub const MILLIS_PER_MINUTE: u64 = 60_000;

/// Enforcement decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Block,
    NoBlock,
}

/// Evaluate a group's usage against its allowance.
///
/// A zero allowance means "always blocked once touched": it blocks as soon
/// as any nonzero usage exists for the group, committed or in-progress,
/// but not before.
pub fn evaluate(limit_minutes: u64, committed_millis: u64, in_progress_millis: u64) -> Verdict {
    let total = committed_millis.saturating_add(in_progress_millis);

    if limit_minutes == 0 {
        if total > 0 {
            return Verdict::Block;
        }
        return Verdict::NoBlock;
    }

    let limit_millis = limit_minutes * MILLIS_PER_MINUTE;
    if total >= limit_millis {
        Verdict::Block
    } else {
        Verdict::NoBlock
    }
}
