#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure builder system responsible for emitting factory build and demolish
//! commands.
//!
//! The builder owns the currently selected battery type and translates
//! adapter-provided frame input into [`Command`] values. It never touches the
//! world directly: placement legality and hover resolution are injected as
//! closures that mirror the world's `query::can_build` and
//! `query::factory_at` helpers.

use battery_grid_core::{BatteryType, Command, FactoryId, Vec2};

/// Declarative placement preview describing a potential factory construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Battery type proposed for placement.
    pub battery: BatteryType,
    /// World-space location the factory would occupy.
    pub position: Vec2,
    /// Indicates whether the preview represents a valid placement location.
    pub placeable: bool,
}

impl PlacementPreview {
    /// Creates a new placement preview descriptor.
    #[must_use]
    pub const fn new(battery: BatteryType, position: Vec2, placeable: bool) -> Self {
        Self {
            battery,
            position,
            placeable,
        }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BuilderInput {
    /// Indicates whether the player clicked to confirm a placement.
    pub confirm_action: bool,
    /// Indicates whether the player requested demolition of the hovered
    /// factory.
    pub demolish_action: bool,
    /// Cursor position expressed in world units, if over the map.
    pub cursor_world: Option<Vec2>,
    /// Indicates whether a pan drag gesture is active. While dragging, no
    /// build or demolish commands are emitted.
    pub dragging: bool,
}

/// Builder system that translates selection + input into factory commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Builder {
    selected: Option<BatteryType>,
}

impl Builder {
    /// Creates a new builder system with nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// Battery type currently armed for placement, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<BatteryType> {
        self.selected
    }

    /// Arms the provided battery type for placement. Selecting the type that
    /// is already armed clears the selection instead.
    pub fn select_battery(&mut self, battery: BatteryType) {
        self.selected = if self.selected == Some(battery) {
            None
        } else {
            Some(battery)
        };
    }

    /// Clears the armed selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Computes the placement preview for the current cursor position.
    ///
    /// The `can_build` closure should mirror the semantics of the world's
    /// `query::can_build` helper.
    #[must_use]
    pub fn preview<F>(&self, cursor_world: Option<Vec2>, mut can_build: F) -> Option<PlacementPreview>
    where
        F: FnMut(BatteryType, Vec2) -> bool,
    {
        let battery = self.selected?;
        let position = cursor_world?;
        Some(PlacementPreview::new(
            battery,
            position,
            can_build(battery, position),
        ))
    }

    /// Consumes adapter-derived input to emit build and demolish commands.
    ///
    /// A confirmed placement clears the selection, matching the build
    /// buttons' behaviour. Demolition only triggers while nothing is armed,
    /// so a build click can never demolish the factory it was aimed at. The
    /// `factory_at` closure should mirror the world's `query::factory_at`.
    pub fn handle<F, G>(
        &mut self,
        input: BuilderInput,
        can_build: F,
        mut factory_at: G,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(BatteryType, Vec2) -> bool,
        G: FnMut(Vec2) -> Option<FactoryId>,
    {
        if input.dragging {
            return;
        }

        let Some(cursor) = input.cursor_world else {
            return;
        };

        match self.selected {
            Some(_) => {
                if input.confirm_action {
                    if let Some(preview) = self.preview(Some(cursor), can_build) {
                        if preview.placeable {
                            out.push(Command::BuildFactory {
                                battery: preview.battery,
                                position: preview.position,
                            });
                            self.selected = None;
                        }
                    }
                }
            }
            None => {
                if input.demolish_action {
                    if let Some(factory) = factory_at(cursor) {
                        out.push(Command::DemolishFactory { factory });
                    }
                }
            }
        }
    }
}
