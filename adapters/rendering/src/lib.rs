#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Battery Grid adapters.
//!
//! [`compose`] flattens the read-only world queries, the viewport transform,
//! and the builder selection into a [`Scene`]: a declarative, screen-space
//! description that a backend can draw without touching the simulation.
//! The core never calls into presentation code; backends pull a fresh scene
//! whenever they need one.

use anyhow::Result as AnyResult;
use battery_grid_core::{BatteryType, Vec2 as WorldVec2, BUILDING_SIZE, SUPPLY_RADIUS};
use battery_grid_system_builder::Builder;
use battery_grid_system_viewport::Viewport;
use battery_grid_world::{query, World};
use glam::Vec2;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

const BATTERY_PALETTE: [Color; 4] = [
    Color::from_rgb_u8(0x2f, 0x95, 0x32),
    Color::from_rgb_u8(0xc8, 0x2a, 0x36),
    Color::from_rgb_u8(0xff, 0xc1, 0x07),
    Color::from_rgb_u8(0x58, 0x47, 0xff),
];

/// Display color associated with a battery type.
#[must_use]
pub fn battery_color(battery: BatteryType) -> Color {
    BATTERY_PALETTE[battery.get() as usize % BATTERY_PALETTE.len()]
}

/// Converts a world-space point into screen space under the given transform.
#[must_use]
pub fn to_screen(point: WorldVec2, viewport: &Viewport) -> Vec2 {
    let scaled = point.scaled_by_zoom(viewport.zoom()).add(viewport.pan());
    Vec2::new(scaled.x(), scaled.y())
}

/// City marker within a composed scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneCity {
    /// Screen-space centre of the city icon.
    pub position: Vec2,
    /// Battery type the city demands.
    pub battery: BatteryType,
    /// Whether the city is currently supplied.
    pub supplied: bool,
    /// Name label drawn underneath the icon.
    pub name: String,
    /// Icon edge length in screen pixels.
    pub icon_size: f32,
}

/// Factory marker within a composed scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFactory {
    /// Screen-space centre of the factory icon.
    pub position: Vec2,
    /// Battery type the factory supplies.
    pub battery: BatteryType,
    /// Icon edge length in screen pixels.
    pub icon_size: f32,
}

/// Line drawn between a factory and a city it supplies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SupplyLink {
    /// Screen-space start of the line, at the factory.
    pub from: Vec2,
    /// Screen-space end of the line, at the city.
    pub to: Vec2,
    /// Stroke color, derived from the battery type.
    pub color: Color,
}

/// Build cursor preview within a composed scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePreview {
    /// Screen-space centre of the preview circle.
    pub position: Vec2,
    /// Radius of the supply circle in screen pixels.
    pub supply_radius: f32,
    /// Battery type armed for placement.
    pub battery: BatteryType,
    /// Whether the hovered location is legal to build on.
    pub placeable: bool,
}

/// One row of the storage readout panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StorageReadout {
    /// Battery type the row describes.
    pub battery: BatteryType,
    /// Builds remaining for that type.
    pub remaining: u32,
    /// Whether the row's build button is currently armed.
    pub selected: bool,
}

/// Declarative, screen-space description of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Title of the active task.
    pub task_title: String,
    /// Objective description of the active task.
    pub task_description: String,
    /// Whether every city is supplied.
    pub task_complete: bool,
    /// Extent of the zoomed map in screen pixels.
    pub map_extent: Vec2,
    /// Active pan offset in screen pixels.
    pub pan: Vec2,
    /// Active zoom factor.
    pub zoom: f32,
    /// City markers.
    pub cities: Vec<SceneCity>,
    /// Factory markers.
    pub factories: Vec<SceneFactory>,
    /// Factory-to-city supply lines.
    pub supply_links: Vec<SupplyLink>,
    /// Build cursor preview, when a battery type is armed.
    pub preview: Option<ScenePreview>,
    /// Storage readout rows, sorted by battery type.
    pub storage: Vec<StorageReadout>,
}

/// Composes a scene from the world, the view transform, and the builder
/// selection. `cursor_world` is the pointer position in world units, if the
/// pointer is over the map.
#[must_use]
pub fn compose(
    world: &World,
    viewport: &Viewport,
    builder: &Builder,
    cursor_world: Option<WorldVec2>,
) -> Scene {
    let zoom = viewport.zoom();
    let icon_size = BUILDING_SIZE * zoom;

    let cities = query::city_view(world)
        .into_vec()
        .into_iter()
        .map(|city| SceneCity {
            position: to_screen(city.position, viewport),
            battery: city.battery,
            supplied: city.supplied,
            name: city.name,
            icon_size,
        })
        .collect();

    let mut factories = Vec::new();
    let mut supply_links = Vec::new();
    for factory in query::factory_view(world).iter() {
        let from = to_screen(factory.position, viewport);
        factories.push(SceneFactory {
            position: from,
            battery: factory.battery,
            icon_size,
        });
        for city in query::cities_in_range(
            world,
            factory.position,
            SUPPLY_RADIUS,
            Some(factory.battery),
        ) {
            supply_links.push(SupplyLink {
                from,
                to: to_screen(city.position, viewport),
                color: battery_color(factory.battery),
            });
        }
    }

    let preview = if viewport.is_dragging() {
        // No build cursor while panning.
        None
    } else {
        builder
            .preview(cursor_world, |battery, position| {
                query::can_build(world, battery, position)
            })
            .map(|preview| ScenePreview {
                position: to_screen(preview.position, viewport),
                supply_radius: SUPPLY_RADIUS * zoom,
                battery: preview.battery,
                placeable: preview.placeable,
            })
    };

    let storage = query::storage(world)
        .into_iter()
        .map(|allocation| StorageReadout {
            battery: allocation.battery,
            remaining: allocation.count,
            selected: builder.selected() == Some(allocation.battery),
        })
        .collect();

    let extent = viewport.map_extent();
    let pan = viewport.pan();
    Scene {
        task_title: query::task_title(world).to_owned(),
        task_description: query::task_description(world).to_owned(),
        task_complete: query::is_task_complete(world),
        map_extent: Vec2::new(extent.x(), extent.y()),
        pan: Vec2::new(pan.x(), pan.y()),
        zoom,
        cities,
        factories,
        supply_links,
        preview,
        storage,
    }
}

/// Rendering backend capable of presenting Battery Grid scenes.
pub trait ScenePresenter {
    /// Presents one composed scene.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use battery_grid_core::{
        BatteryType, CitySpec, Command, StorageAllocation, TaskSpec, Vec2 as WorldVec2,
    };
    use battery_grid_world::apply;

    fn sample_task() -> TaskSpec {
        TaskSpec {
            title: "sample".to_owned(),
            description: "supply the city".to_owned(),
            cities: vec![CitySpec {
                battery: BatteryType::new(0),
                position: WorldVec2::new(400.0, 300.0),
                name: "Voltwick".to_owned(),
            }],
            storage: vec![StorageAllocation {
                battery: BatteryType::new(0),
                count: 2,
            }],
            unlocks: Vec::new(),
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(WorldVec2::new(1600.0, 900.0), WorldVec2::new(1600.0, 900.0))
    }

    #[test]
    fn composed_positions_are_zoomed_then_panned() {
        let world = World::from_task(&sample_task());
        let mut viewport = viewport();
        viewport.set_zoom(-1.0, WorldVec2::new(0.0, 0.0));
        let builder = Builder::new();

        let scene = compose(&world, &viewport, &builder, None);

        let expected = to_screen(WorldVec2::new(400.0, 300.0), &viewport);
        assert_eq!(scene.cities[0].position, expected);
        assert_eq!(scene.zoom, 1.25);
        assert!((scene.cities[0].icon_size - BUILDING_SIZE * 1.25).abs() < f32::EPSILON);
    }

    #[test]
    fn supply_links_connect_factories_to_in_range_cities() {
        let mut world = World::from_task(&sample_task());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::BuildFactory {
                battery: BatteryType::new(0),
                position: WorldVec2::new(420.0, 300.0),
            },
            &mut events,
        );
        let builder = Builder::new();

        let scene = compose(&world, &viewport(), &builder, None);

        assert_eq!(scene.factories.len(), 1);
        assert_eq!(scene.supply_links.len(), 1);
        assert!(scene.cities[0].supplied);
        assert!(scene.task_complete);
    }

    #[test]
    fn preview_follows_the_armed_selection() {
        let world = World::from_task(&sample_task());
        let mut builder = Builder::new();
        builder.select_battery(BatteryType::new(0));

        let scene = compose(
            &world,
            &viewport(),
            &builder,
            Some(WorldVec2::new(600.0, 300.0)),
        );

        let preview = scene.preview.expect("armed selection yields a preview");
        assert!(preview.placeable);
        assert_eq!(preview.supply_radius, SUPPLY_RADIUS);
        assert!(scene.storage[0].selected);
    }

    #[test]
    fn preview_is_suppressed_while_dragging() {
        let world = World::from_task(&sample_task());
        let mut viewport = viewport();
        viewport.begin_drag(WorldVec2::new(100.0, 100.0));
        let mut builder = Builder::new();
        builder.select_battery(BatteryType::new(0));

        let scene = compose(
            &world,
            &viewport,
            &builder,
            Some(WorldVec2::new(600.0, 300.0)),
        );

        assert!(scene.preview.is_none());
    }

    #[test]
    fn palette_wraps_around_for_large_battery_ids() {
        assert_eq!(battery_color(BatteryType::new(0)), BATTERY_PALETTE[0]);
        assert_eq!(battery_color(BatteryType::new(4)), BATTERY_PALETTE[0]);
    }
}
