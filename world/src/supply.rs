//! Spatial range matching between cities and factories.
//!
//! Queries are plain linear scans: task city and factory counts stay in the
//! tens, so a full pass per query is the correct design at this scale.

use battery_grid_core::{BatteryType, Vec2};

use crate::{factories::FactoryState, City};

/// Inclusive range test: a point exactly on the boundary is in range.
pub(crate) fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_to(b) <= radius
}

/// Cities within `radius` of `point`, optionally restricted to one battery
/// type.
pub(crate) fn cities_in_range<'a>(
    cities: &'a [City],
    point: Vec2,
    radius: f32,
    battery: Option<BatteryType>,
) -> impl Iterator<Item = &'a City> {
    cities.iter().filter(move |city| {
        battery.map_or(true, |wanted| city.battery == wanted)
            && within(point, city.position, radius)
    })
}

/// Factories within `radius` of `point`, optionally restricted to one battery
/// type.
pub(crate) fn factories_in_range<'a>(
    factories: impl Iterator<Item = &'a FactoryState>,
    point: Vec2,
    radius: f32,
    battery: Option<BatteryType>,
) -> impl Iterator<Item = &'a FactoryState> {
    factories.filter(move |factory| {
        battery.map_or(true, |wanted| factory.battery == wanted)
            && within(point, factory.position, radius)
    })
}
