#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Battery Grid.
//!
//! A [`World`] holds one task attempt: the cities copied out of the task
//! template, the factories placed so far, and the remaining build storage.
//! Adapters and systems mutate it exclusively through [`apply`] and observe
//! it exclusively through [`query`].

mod factories;
mod storage;
mod supply;

use battery_grid_core::{
    BatteryType, BuildError, Command, DemolishError, Event, TaskSpec, Vec2, DEFAULT_MAP_SIZE,
    MIN_PLACEMENT_DISTANCE, SUPPLY_RADIUS, WELCOME_BANNER,
};

use factories::FactoryRegistry;
use storage::Storage;

/// City inhabiting the active task attempt.
///
/// The `supplied` flag is a cache of "at least one same-type factory lies
/// within supply range". It is refreshed exactly at build and demolish time,
/// never during reads.
#[derive(Clone, Debug)]
pub(crate) struct City {
    pub(crate) battery: BatteryType,
    pub(crate) position: Vec2,
    pub(crate) name: String,
    pub(crate) supplied: bool,
}

impl City {
    fn from_spec(spec: &battery_grid_core::CitySpec) -> Self {
        Self {
            battery: spec.battery,
            position: spec.position,
            name: spec.name.clone(),
            supplied: false,
        }
    }
}

/// Represents the authoritative state of one task attempt.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    title: String,
    description: String,
    map_size: Vec2,
    cities: Vec<City>,
    factories: FactoryRegistry,
    storage: Storage,
}

impl World {
    /// Starts a fresh attempt by value-copying the provided task template.
    ///
    /// The template is never referenced afterwards, so replays and restarts
    /// cannot leak mutations between attempts.
    #[must_use]
    pub fn from_task(task: &TaskSpec) -> Self {
        Self {
            banner: WELCOME_BANNER,
            title: task.title.clone(),
            description: task.description.clone(),
            map_size: DEFAULT_MAP_SIZE,
            cities: task.cities.iter().map(City::from_spec).collect(),
            factories: FactoryRegistry::new(),
            storage: Storage::from_allocations(&task.storage),
        }
    }

    fn placement_error(&self, battery: BatteryType, position: Vec2) -> Option<BuildError> {
        if self.storage.remaining(battery) == 0 {
            return Some(BuildError::OutOfStorage);
        }
        if supply::cities_in_range(&self.cities, position, MIN_PLACEMENT_DISTANCE, None)
            .next()
            .is_some()
        {
            return Some(BuildError::TooCloseToCity);
        }
        if supply::factories_in_range(self.factories.iter(), position, MIN_PLACEMENT_DISTANCE, None)
            .next()
            .is_some()
        {
            return Some(BuildError::TooCloseToFactory);
        }
        None
    }

    /// Re-derives the supply cache for same-type cities around a removed
    /// factory. Evaluated from each city's perspective so that a second
    /// in-range supplier keeps the city supplied.
    fn refresh_supply_around(&mut self, battery: BatteryType, position: Vec2) {
        let factories = &self.factories;
        for city in self.cities.iter_mut() {
            if city.battery != battery || !supply::within(position, city.position, SUPPLY_RADIUS) {
                continue;
            }
            city.supplied = supply::factories_in_range(
                factories.iter(),
                city.position,
                SUPPLY_RADIUS,
                Some(battery),
            )
            .next()
            .is_some();
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BuildFactory { battery, position } => {
            if let Some(reason) = world.placement_error(battery, position) {
                out_events.push(Event::BuildRejected {
                    battery,
                    position,
                    reason,
                });
                return;
            }

            let factory = world.factories.insert(battery, position);
            let _ = world.storage.take(battery);
            for city in world.cities.iter_mut() {
                if city.battery == battery
                    && supply::within(position, city.position, SUPPLY_RADIUS)
                {
                    city.supplied = true;
                }
            }
            out_events.push(Event::FactoryBuilt {
                factory,
                battery,
                position,
            });
        }
        Command::DemolishFactory { factory } => match world.factories.remove(factory) {
            None => out_events.push(Event::DemolishRejected {
                factory,
                reason: DemolishError::MissingFactory,
            }),
            Some(removed) => {
                world.storage.put_back(removed.battery);
                world.refresh_supply_around(removed.battery, removed.position);
                out_events.push(Event::FactoryDemolished {
                    factory,
                    battery: removed.battery,
                    position: removed.position,
                });
            }
        },
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::cmp::Ordering;

    use super::{supply, World};
    use battery_grid_core::{
        BatteryType, BuildError, FactoryId, StorageAllocation, Vec2, BUILDING_SIZE,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Title of the task the attempt was started from.
    #[must_use]
    pub fn task_title(world: &World) -> &str {
        &world.title
    }

    /// Objective description of the task the attempt was started from.
    #[must_use]
    pub fn task_description(world: &World) -> &str {
        &world.description
    }

    /// Extent of the playable map in world units.
    #[must_use]
    pub fn map_size(world: &World) -> Vec2 {
        world.map_size
    }

    /// Captures a read-only view of the cities in the attempt, in authoring
    /// order.
    #[must_use]
    pub fn city_view(world: &World) -> CityView {
        CityView {
            snapshots: world
                .cities
                .iter()
                .map(|city| CitySnapshot {
                    battery: city.battery,
                    position: city.position,
                    name: city.name.clone(),
                    supplied: city.supplied,
                })
                .collect(),
        }
    }

    /// Captures a read-only view of the placed factories in ascending
    /// identifier order.
    #[must_use]
    pub fn factory_view(world: &World) -> FactoryView {
        FactoryView {
            snapshots: world
                .factories
                .iter()
                .map(|factory| FactorySnapshot {
                    id: factory.id,
                    battery: factory.battery,
                    position: factory.position,
                })
                .collect(),
        }
    }

    /// Remaining build storage per battery type, sorted by type.
    #[must_use]
    pub fn storage(world: &World) -> Vec<StorageAllocation> {
        world.storage.allocations()
    }

    /// Remaining build count for a single battery type.
    #[must_use]
    pub fn remaining(world: &World, battery: BatteryType) -> u32 {
        world.storage.remaining(battery)
    }

    /// Reports whether every city in the attempt is supplied. Vacuously true
    /// for a task with zero cities.
    #[must_use]
    pub fn is_task_complete(world: &World) -> bool {
        world.cities.iter().all(|city| city.supplied)
    }

    /// Reason the provided placement would be rejected, if any.
    #[must_use]
    pub fn placement_error(
        world: &World,
        battery: BatteryType,
        position: Vec2,
    ) -> Option<BuildError> {
        world.placement_error(battery, position)
    }

    /// Reports whether a factory of the provided type may be built at the
    /// provided world position.
    #[must_use]
    pub fn can_build(world: &World, battery: BatteryType, position: Vec2) -> bool {
        world.placement_error(battery, position).is_none()
    }

    /// Nearest factory whose footprint covers the provided world position.
    /// Ties on distance resolve to the smaller identifier.
    #[must_use]
    pub fn factory_at(world: &World, position: Vec2) -> Option<FactoryId> {
        supply::factories_in_range(world.factories.iter(), position, BUILDING_SIZE, None)
            .min_by(|a, b| {
                let near = position.distance_to(a.position);
                let far = position.distance_to(b.position);
                near.partial_cmp(&far)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|factory| factory.id)
    }

    /// Cities within `radius` of `point`, optionally restricted to one
    /// battery type.
    #[must_use]
    pub fn cities_in_range(
        world: &World,
        point: Vec2,
        radius: f32,
        battery: Option<BatteryType>,
    ) -> Vec<CitySnapshot> {
        supply::cities_in_range(&world.cities, point, radius, battery)
            .map(|city| CitySnapshot {
                battery: city.battery,
                position: city.position,
                name: city.name.clone(),
                supplied: city.supplied,
            })
            .collect()
    }

    /// Factories within `radius` of `point`, optionally restricted to one
    /// battery type.
    #[must_use]
    pub fn factories_in_range(
        world: &World,
        point: Vec2,
        radius: f32,
        battery: Option<BatteryType>,
    ) -> Vec<FactorySnapshot> {
        supply::factories_in_range(world.factories.iter(), point, radius, battery)
            .map(|factory| FactorySnapshot {
                id: factory.id,
                battery: factory.battery,
                position: factory.position,
            })
            .collect()
    }

    /// Read-only snapshot describing all cities within the attempt.
    #[derive(Clone, Debug)]
    pub struct CityView {
        snapshots: Vec<CitySnapshot>,
    }

    impl CityView {
        /// Iterator over the captured city snapshots in authoring order.
        pub fn iter(&self) -> impl Iterator<Item = &CitySnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<CitySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single city's state used for queries.
    #[derive(Clone, Debug, PartialEq)]
    pub struct CitySnapshot {
        /// Battery type the city must be supplied with.
        pub battery: BatteryType,
        /// World-space location of the city.
        pub position: Vec2,
        /// Display name shown next to the city.
        pub name: String,
        /// Cached supply state as of the last build or demolish.
        pub supplied: bool,
    }

    /// Read-only snapshot describing all factories within the attempt.
    #[derive(Clone, Debug, Default)]
    pub struct FactoryView {
        snapshots: Vec<FactorySnapshot>,
    }

    impl FactoryView {
        /// Iterator over the captured factory snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &FactorySnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<FactorySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single factory's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct FactorySnapshot {
        /// Identifier allocated to the factory by the world.
        pub id: FactoryId,
        /// Battery type the factory supplies.
        pub battery: BatteryType,
        /// World-space location of the factory.
        pub position: Vec2,
    }
}
