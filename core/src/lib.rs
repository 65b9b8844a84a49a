#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Battery Grid engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Systems consume query snapshots and respond exclusively
//! with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Battery Grid.";

/// Distance within which a factory supplies cities of its battery type,
/// expressed in world units. Inclusive: a city exactly on the boundary counts
/// as supplied.
pub const SUPPLY_RADIUS: f32 = 100.0;

/// Edge length of the square city and factory icons in world units. Used as
/// the pick radius when resolving which factory sits under the cursor.
pub const BUILDING_SIZE: f32 = 25.0;

/// Minimum distance between a new factory and any existing entity, expressed
/// in world units: the visual footprint radius (half of [`BUILDING_SIZE`]).
/// Placement at exactly this distance is still illegal. Independent of
/// [`SUPPLY_RADIUS`]; the two must never be conflated.
pub const MIN_PLACEMENT_DISTANCE: f32 = 12.5;

/// Default extent of the playable map in world units.
pub const DEFAULT_MAP_SIZE: Vec2 = Vec2::new(1600.0, 900.0);

/// Immutable 2D point or displacement expressed in world units.
///
/// Every operation returns a new value; nothing mutates in place. Division
/// by zero is not guarded here — zoom factors are bounded away from zero by
/// the viewport clamp before they ever reach this type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    x: f32,
    y: f32,
}

impl Vec2 {
    /// Creates a new vector from explicit components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the vector.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component of the vector.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Componentwise sum of two vectors.
    #[must_use]
    pub fn add(self, other: Vec2) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Componentwise difference of two vectors.
    #[must_use]
    pub fn subtract(self, other: Vec2) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Scales both components by the provided scalar.
    #[must_use]
    pub fn multiply(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    /// Divides both components by the provided scalar.
    #[must_use]
    pub fn divide(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_to(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Scales a world-space point into zoomed map space.
    #[must_use]
    pub fn scaled_by_zoom(self, zoom: f32) -> Self {
        self.multiply(zoom)
    }
}

/// Category tag matching cities to the factories able to supply them.
///
/// Types are mutually exclusive: a factory of one type never supplies a city
/// of another.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BatteryType(u8);

impl BatteryType {
    /// Creates a new battery type identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Unique identifier assigned to a factory by the world.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct FactoryId(u32);

impl FactoryId {
    /// Creates a new factory identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Index of a task within the ordered catalog.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TaskId(u32);

impl TaskId {
    /// Creates a new task identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier of the task that directly follows this one in the catalog.
    #[must_use]
    pub const fn successor(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Requests construction of a factory at the provided world position.
    BuildFactory {
        /// Battery type of the factory to construct.
        battery: BatteryType,
        /// World-space location of the proposed factory.
        position: Vec2,
    },
    /// Requests removal of an existing factory from the world.
    DemolishFactory {
        /// Identifier of the factory targeted for removal.
        factory: FactoryId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a factory was constructed.
    FactoryBuilt {
        /// Identifier allocated to the factory by the world.
        factory: FactoryId,
        /// Battery type of the constructed factory.
        battery: BatteryType,
        /// World-space location of the constructed factory.
        position: Vec2,
    },
    /// Reports that a build request was rejected.
    BuildRejected {
        /// Battery type requested for construction.
        battery: BatteryType,
        /// World-space location provided in the build request.
        position: Vec2,
        /// Specific reason the build failed.
        reason: BuildError,
    },
    /// Confirms that a factory was demolished.
    FactoryDemolished {
        /// Identifier of the factory that was removed.
        factory: FactoryId,
        /// Battery type of the removed factory.
        battery: BatteryType,
        /// World-space location the factory occupied.
        position: Vec2,
    },
    /// Reports that a demolish request was rejected.
    DemolishRejected {
        /// Identifier of the factory targeted for removal.
        factory: FactoryId,
        /// Specific reason the removal failed.
        reason: DemolishError,
    },
}

/// Reasons a build request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildError {
    /// The storage budget for the requested battery type is exhausted.
    OutOfStorage,
    /// A city lies within the building footprint of the requested location.
    TooCloseToCity,
    /// A factory lies within the building footprint of the requested location.
    TooCloseToFactory,
}

/// Reasons a demolish request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemolishError {
    /// No factory with the provided identifier exists.
    MissingFactory,
}

/// Authoring-time description of a single city within a task template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CitySpec {
    /// Battery type the city must be supplied with.
    pub battery: BatteryType,
    /// World-space location of the city.
    pub position: Vec2,
    /// Display name shown next to the city.
    #[serde(default = "default_city_name")]
    pub name: String,
}

fn default_city_name() -> String {
    "City".to_owned()
}

/// Build budget granted for a single battery type within a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageAllocation {
    /// Battery type the allocation applies to.
    pub battery: BatteryType,
    /// Number of factories of that type the player may place.
    pub count: u32,
}

/// Immutable template describing one playable task.
///
/// Starting a task value-copies the template into a fresh world so that
/// mutations during play never leak back into the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Short title shown in the task list.
    pub title: String,
    /// Longer description of the task's objective.
    pub description: String,
    /// Cities that must all be supplied to complete the task.
    pub cities: Vec<CitySpec>,
    /// Build budget granted per battery type.
    pub storage: Vec<StorageAllocation>,
    /// Tasks unlocked when this one is completed.
    #[serde(default)]
    pub unlocks: Vec<TaskId>,
}

#[cfg(test)]
mod tests {
    use super::{
        BatteryType, BuildError, CitySpec, DemolishError, FactoryId, StorageAllocation, TaskId,
        TaskSpec, Vec2,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn vector_arithmetic_produces_new_values() {
        let base = Vec2::new(3.0, 4.0);
        let moved = base.add(Vec2::new(1.0, -2.0));

        assert_eq!(moved, Vec2::new(4.0, 2.0));
        assert_eq!(base, Vec2::new(3.0, 4.0));
        assert_eq!(base.subtract(Vec2::new(3.0, 4.0)), Vec2::new(0.0, 0.0));
        assert_eq!(base.multiply(2.0), Vec2::new(6.0, 8.0));
        assert_eq!(base.divide(2.0), Vec2::new(1.5, 2.0));
    }

    #[test]
    fn distance_is_euclidean_and_symmetric() {
        let origin = Vec2::new(0.0, 0.0);
        let point = Vec2::new(3.0, 4.0);

        assert!((origin.distance_to(point) - 5.0).abs() < f32::EPSILON);
        assert!((point.distance_to(origin) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zoom_scaling_matches_scalar_multiplication() {
        let point = Vec2::new(400.0, 300.0);
        assert_eq!(point.scaled_by_zoom(1.5), point.multiply(1.5));
    }

    #[test]
    fn task_successor_advances_by_one() {
        assert_eq!(TaskId::new(0).successor(), TaskId::new(1));
        assert_eq!(TaskId::new(6).successor(), TaskId::new(7));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn battery_type_round_trips_through_bincode() {
        assert_round_trip(&BatteryType::new(2));
    }

    #[test]
    fn factory_id_round_trips_through_bincode() {
        assert_round_trip(&FactoryId::new(42));
    }

    #[test]
    fn build_error_round_trips_through_bincode() {
        assert_round_trip(&BuildError::TooCloseToFactory);
    }

    #[test]
    fn demolish_error_round_trips_through_bincode() {
        assert_round_trip(&DemolishError::MissingFactory);
    }

    #[test]
    fn task_spec_round_trips_through_json() {
        let spec = TaskSpec {
            title: "tutorial".to_owned(),
            description: "supply each city".to_owned(),
            cities: vec![CitySpec {
                battery: BatteryType::new(0),
                position: Vec2::new(373.0, 296.0),
                name: "Voltberg".to_owned(),
            }],
            storage: vec![StorageAllocation {
                battery: BatteryType::new(0),
                count: 1,
            }],
            unlocks: vec![TaskId::new(1)],
        };

        let json = serde_json::to_string(&spec).expect("serialize");
        let restored: TaskSpec = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, spec);
    }

    #[test]
    fn city_spec_name_defaults_when_absent() {
        let json = r#"{"battery":0,"position":{"x":10.0,"y":20.0}}"#;
        let spec: CitySpec = serde_json::from_str(json).expect("deserialize");
        assert_eq!(spec.name, "City");
    }
}
