//! Thread-local registry of live achievement instances.
//!
//! The registry persists across renderer calls and tracks:
//! - a monotonically increasing id counter,
//! - which stacking slot each floating instance occupies per anchor,
//! - when the last trigger was admitted, for the optional interruption guard.
//!
//! All instances live on the browser's single UI thread, so plain
//! `RefCell`s behind `thread_local!` are enough.

use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Process-unique identity of one displayed achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AchievementId(u64);

impl AchievementId {
    pub fn from_raw(raw: u64) -> Self {
        AchievementId(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "achievement_{}", self.0)
    }
}

/// Groups instances that compete for the same screen edge or container.
pub type SlotKey = String;

/// Assigns each live instance the lowest free slot within its group.
#[derive(Debug, Default)]
pub struct StackRegistry {
    groups: HashMap<SlotKey, BTreeSet<usize>>,
    owners: HashMap<AchievementId, (SlotKey, usize)>,
}

impl StackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the lowest free slot in `key` for `id`. Claiming twice returns the existing slot.
    pub fn claim(&mut self, id: AchievementId, key: &str) -> usize {
        if let Some((_, slot)) = self.owners.get(&id) {
            return *slot;
        }
        let taken = self.groups.entry(key.to_string()).or_default();
        let slot = (0..).find(|s| !taken.contains(s)).unwrap_or(0);
        taken.insert(slot);
        self.owners.insert(id, (key.to_string(), slot));
        debug!("{} claimed slot {} in '{}'", id, slot, key);
        slot
    }

    /// Free the slot held by `id`. Returns whether anything was released.
    pub fn release(&mut self, id: AchievementId) -> bool {
        match self.owners.remove(&id) {
            Some((key, slot)) => {
                if let Some(taken) = self.groups.get_mut(&key) {
                    taken.remove(&slot);
                    if taken.is_empty() {
                        self.groups.remove(&key);
                    }
                }
                true
            }
            None => false,
        }
    }

    /// Ids currently holding a slot in `key`, in slot order.
    pub fn members(&self, key: &str) -> Vec<AchievementId> {
        let mut members: Vec<(usize, AchievementId)> = self
            .owners
            .iter()
            .filter(|(_, owner)| owner.0 == key)
            .map(|(id, (_, slot))| (*slot, *id))
            .collect();
        members.sort();
        members.into_iter().map(|(_, id)| id).collect()
    }

    pub fn live_count(&self) -> usize {
        self.owners.len()
    }

    pub fn is_live(&self, id: AchievementId) -> bool {
        self.owners.contains_key(&id)
    }
}

/// Rejects triggers that arrive too soon after the previous admitted one
/// while that one is still on screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct TriggerGuard {
    last_admitted: Option<f64>,
}

impl TriggerGuard {
    /// `Ok(())` if a trigger at `now_ms` may proceed, otherwise the time since the last admitted one.
    pub fn check(&self, now_ms: f64, min_interval_ms: u32, any_live: bool) -> Result<(), u32> {
        if min_interval_ms > 0 && any_live {
            if let Some(last) = self.last_admitted {
                let since = (now_ms - last).max(0.0);
                if since < min_interval_ms as f64 {
                    warn!(
                        "Suppressing achievement: {:.0} ms since the last one (minimum {} ms)",
                        since, min_interval_ms
                    );
                    return Err(since as u32);
                }
            }
        }
        Ok(())
    }

    /// Start a new interval at `now_ms`. Call once the trigger has been shown.
    pub fn record(&mut self, now_ms: f64) {
        self.last_admitted = Some(now_ms);
    }
}

thread_local! {
    static NEXT_ID: Cell<u64> = const { Cell::new(1) };

    /// Global stacking slots that survive renderer lifetimes.
    pub static STACK_STORE: RefCell<StackRegistry> = RefCell::new(StackRegistry::new());

    pub static TRIGGER_GUARD: RefCell<TriggerGuard> = RefCell::new(TriggerGuard::default());
}

/// Allocate a fresh id.
pub fn next_id() -> AchievementId {
    NEXT_ID.with(|n| {
        let id = n.get();
        n.set(id + 1);
        AchievementId(id)
    })
}

pub fn claim_slot(id: AchievementId, key: &str) -> usize {
    STACK_STORE.with(|s| s.borrow_mut().claim(id, key))
}

pub fn release_slot(id: AchievementId) -> bool {
    STACK_STORE.with(|s| s.borrow_mut().release(id))
}

pub fn slot_members(key: &str) -> Vec<AchievementId> {
    STACK_STORE.with(|s| s.borrow().members(key))
}

pub fn check_trigger(now_ms: f64, min_interval_ms: u32) -> Result<(), u32> {
    let any_live = STACK_STORE.with(|s| s.borrow().live_count() > 0);
    TRIGGER_GUARD.with(|g| g.borrow().check(now_ms, min_interval_ms, any_live))
}

pub fn record_trigger(now_ms: f64) {
    TRIGGER_GUARD.with(|g| g.borrow_mut().record(now_ms));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> AchievementId {
        AchievementId::from_raw(n)
    }

    #[test]
    fn claims_lowest_free_slot() {
        let mut reg = StackRegistry::new();
        assert_eq!(reg.claim(id(1), "top"), 0);
        assert_eq!(reg.claim(id(2), "top"), 1);
        assert_eq!(reg.claim(id(3), "bottom"), 0);

        assert!(reg.release(id(1)));
        assert_eq!(reg.claim(id(4), "top"), 0);
        assert_eq!(reg.members("top"), vec![id(4), id(2)]);
    }

    #[test]
    fn claim_is_stable_for_same_id() {
        let mut reg = StackRegistry::new();
        assert_eq!(reg.claim(id(1), "top"), 0);
        assert_eq!(reg.claim(id(1), "top"), 0);
        assert_eq!(reg.live_count(), 1);
    }

    #[test]
    fn release_twice_is_noop() {
        let mut reg = StackRegistry::new();
        reg.claim(id(9), "middle");
        assert!(reg.release(id(9)));
        assert!(!reg.release(id(9)));
        assert!(!reg.is_live(id(9)));
        assert!(reg.members("middle").is_empty());
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = next_id();
        let b = next_id();
        assert!(b > a);
        assert_eq!(b.to_string(), format!("achievement_{}", b.raw()));
    }

    #[test]
    fn guard_disabled_by_default_interval() {
        let mut guard = TriggerGuard::default();
        guard.record(0.0);
        assert!(guard.check(1.0, 0, true).is_ok());
    }

    #[test]
    fn guard_rejects_rapid_triggers_while_live() {
        let mut guard = TriggerGuard::default();
        assert!(guard.check(1_000.0, 1_000, false).is_ok());
        guard.record(1_000.0);
        assert_eq!(guard.check(1_400.0, 1_000, true), Err(400));
        // The rejected trigger does not reset the window
        assert!(guard.check(2_000.0, 1_000, true).is_ok());
    }

    #[test]
    fn guard_admits_when_nothing_is_live() {
        let mut guard = TriggerGuard::default();
        guard.record(0.0);
        assert!(guard.check(10.0, 1_000, false).is_ok());
    }

    #[test]
    fn unrecorded_trigger_does_not_open_a_window() {
        let mut guard = TriggerGuard::default();
        // Passes the check but fails to show, so it is never recorded
        assert!(guard.check(500.0, 1_000, true).is_ok());
        assert!(guard.check(900.0, 1_000, true).is_ok());

        guard.record(900.0);
        assert_eq!(guard.check(1_200.0, 1_000, true), Err(300));
    }
}
