//! Authoritative factory state management utilities.

use std::collections::BTreeMap;

use battery_grid_core::{BatteryType, FactoryId, Vec2};

/// Snapshot of a factory stored inside the world.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FactoryState {
    /// Identifier allocated by the world for the factory.
    pub(crate) id: FactoryId,
    /// Battery type the factory supplies.
    pub(crate) battery: BatteryType,
    /// World-space location of the factory.
    pub(crate) position: Vec2,
}

/// Registry that stores factories and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct FactoryRegistry {
    entries: BTreeMap<FactoryId, FactoryState>,
    next_factory_id: FactoryId,
}

impl FactoryRegistry {
    /// Creates an empty factory registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_factory_id: FactoryId::new(0),
        }
    }

    /// Stores a new factory and returns the identifier allocated for it.
    pub(crate) fn insert(&mut self, battery: BatteryType, position: Vec2) -> FactoryId {
        let id = self.next_factory_id;
        self.next_factory_id = FactoryId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            FactoryState {
                id,
                battery,
                position,
            },
        );
        id
    }

    /// Removes the factory with the provided identifier, yielding its state.
    pub(crate) fn remove(&mut self, id: FactoryId) -> Option<FactoryState> {
        self.entries.remove(&id)
    }

    /// Iterates over stored factories in ascending identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &FactoryState> {
        self.entries.values()
    }
}
