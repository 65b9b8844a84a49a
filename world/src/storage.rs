//! Build-budget ledger tracking how many factories of each type remain.

use std::collections::BTreeMap;

use battery_grid_core::{BatteryType, StorageAllocation};

/// Remaining build counts per battery type for the active task attempt.
///
/// Counts never go negative: a build is refused once the count for its type
/// reaches zero, and demolishing returns the count to the ledger.
#[derive(Clone, Debug)]
pub(crate) struct Storage {
    counts: BTreeMap<BatteryType, u32>,
}

impl Storage {
    /// Builds a ledger from the allocations of a task template. Duplicate
    /// entries for the same battery type accumulate.
    pub(crate) fn from_allocations(allocations: &[StorageAllocation]) -> Self {
        let mut counts: BTreeMap<BatteryType, u32> = BTreeMap::new();
        for allocation in allocations {
            let slot = counts.entry(allocation.battery).or_insert(0);
            *slot = slot.saturating_add(allocation.count);
        }
        Self { counts }
    }

    /// Remaining build count for the provided battery type.
    pub(crate) fn remaining(&self, battery: BatteryType) -> u32 {
        self.counts.get(&battery).copied().unwrap_or(0)
    }

    /// Consumes one build from the ledger. Returns `false` when the count for
    /// the type is already exhausted, leaving the ledger untouched.
    pub(crate) fn take(&mut self, battery: BatteryType) -> bool {
        match self.counts.get_mut(&battery) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Returns one build to the ledger after a demolition.
    pub(crate) fn put_back(&mut self, battery: BatteryType) {
        let slot = self.counts.entry(battery).or_insert(0);
        *slot = slot.saturating_add(1);
    }

    /// Captures the ledger as allocations sorted by battery type.
    pub(crate) fn allocations(&self) -> Vec<StorageAllocation> {
        self.counts
            .iter()
            .map(|(battery, count)| StorageAllocation {
                battery: *battery,
                count: *count,
            })
            .collect()
    }
}
