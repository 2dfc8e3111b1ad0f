use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use solana_program::clock::{DEFAULT_MS_PER_SLOT, Slot};

/// Source of the current slot.
pub trait SlotClock: Send + Sync {
    fn slot(&self) -> Slot;
}

/// Slot advanced by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    slot: AtomicU64,
}

impl ManualClock {
    pub fn new(slot: Slot) -> Self {
        Self {
            slot: AtomicU64::new(slot),
        }
    }

    pub fn set(&self, slot: Slot) {
        self.slot.store(slot, Ordering::SeqCst);
    }

    /// Moves the clock forward, pinning at `Slot::MAX`. Returns the new slot.
    pub fn advance(&self, slots: Slot) -> Slot {
        let previous = self
            .slot
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |slot| {
                Some(slot.saturating_add(slots))
            })
            .unwrap_or_else(|slot| slot);
        previous.saturating_add(slots)
    }
}

impl SlotClock for ManualClock {
    fn slot(&self) -> Slot {
        self.slot.load(Ordering::SeqCst)
    }
}

/// Wall-clock slots at the cluster's nominal slot duration.
#[derive(Debug)]
pub struct SystemSlotClock {
    genesis_slot: Slot,
    started: Instant,
}

impl SystemSlotClock {
    pub fn starting_at(genesis_slot: Slot) -> Self {
        Self {
            genesis_slot,
            started: Instant::now(),
        }
    }
}

impl SlotClock for SystemSlotClock {
    fn slot(&self) -> Slot {
        let elapsed_ms = self.started.elapsed().as_millis();
        let slots = elapsed_ms / u128::from(DEFAULT_MS_PER_SLOT);
        self.genesis_slot
            .saturating_add(u64::try_from(slots).unwrap_or(u64::MAX))
    }
}
