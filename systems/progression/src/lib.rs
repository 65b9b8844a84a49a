#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Task catalog and persistent progression for Battery Grid.
//!
//! The catalog is an ordered list of immutable task templates; progression
//! tracks which of them the player has unlocked and completed. Completing a
//! task feeds its unlock list back into the unlocked set. The first task is
//! always unlocked, including after loading any save.

use std::collections::BTreeSet;

use battery_grid_core::{BatteryType, CitySpec, StorageAllocation, TaskId, TaskSpec, Vec2};
use serde::{Deserialize, Serialize};

/// Ordered, immutable collection of task templates.
#[derive(Clone, Debug)]
pub struct TaskCatalog {
    tasks: Vec<TaskSpec>,
}

impl TaskCatalog {
    /// Creates a catalog from the provided templates, preserving order.
    #[must_use]
    pub fn from_specs(tasks: Vec<TaskSpec>) -> Self {
        Self { tasks }
    }

    /// Retrieves the template for the provided task identifier.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&TaskSpec> {
        self.tasks.get(id.get() as usize)
    }

    /// Number of tasks in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Reports whether the catalog holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterates over tasks together with their identifiers, in order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &TaskSpec)> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(index, task)| (TaskId::new(index as u32), task))
    }
}

/// Built-in task catalog shipped with the game.
#[must_use]
pub fn builtin_catalog() -> TaskCatalog {
    TaskCatalog::from_specs(vec![
        TaskSpec {
            title: "Tutorial".to_owned(),
            description: "Place one factory of each battery type so that every \
                          city receives power."
                .to_owned(),
            cities: vec![
                city(0, 373.0, 296.0, "Voltwick"),
                city(1, 768.0, 469.0, "Ionbury"),
                city(2, 1231.0, 372.0, "Cell Harbour"),
            ],
            storage: vec![allocation(0, 1), allocation(1, 1), allocation(2, 1)],
            unlocks: vec![TaskId::new(1)],
        },
        TaskSpec {
            title: "Shared lines".to_owned(),
            description: "Two cities want the same battery type but you can \
                          only afford one factory. Find the overlap."
                .to_owned(),
            cities: vec![
                city(0, 500.0, 400.0, "Northvolt"),
                city(0, 620.0, 400.0, "Southvolt"),
                city(1, 1100.0, 520.0, "Ionbury"),
            ],
            storage: vec![allocation(0, 1), allocation(1, 1)],
            unlocks: vec![TaskId::new(2)],
        },
        TaskSpec {
            title: "Spread thin".to_owned(),
            description: "Demand across the whole map. Budget is tight; \
                          demolish and rebuild if a placement turns out wrong."
                .to_owned(),
            cities: vec![
                city(0, 240.0, 210.0, "Voltwick"),
                city(0, 1380.0, 680.0, "Farfield"),
                city(1, 820.0, 260.0, "Ionbury"),
                city(2, 460.0, 700.0, "Cell Harbour"),
            ],
            storage: vec![allocation(0, 2), allocation(1, 1), allocation(2, 1)],
            unlocks: Vec::new(),
        },
    ])
}

fn city(battery: u8, x: f32, y: f32, name: &str) -> CitySpec {
    CitySpec {
        battery: BatteryType::new(battery),
        position: Vec2::new(x, y),
        name: name.to_owned(),
    }
}

fn allocation(battery: u8, count: u32) -> StorageAllocation {
    StorageAllocation {
        battery: BatteryType::new(battery),
        count,
    }
}

/// Persisted unlocked/completed task sets.
///
/// Order within the lists carries no meaning; only set membership matters.
/// Missing fields fall back to a fresh profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    /// Identifiers of tasks the player may start.
    #[serde(default)]
    pub unlocked: Vec<u32>,
    /// Identifiers of tasks the player has completed.
    #[serde(default)]
    pub completed: Vec<u32>,
}

/// Persistent unlocked/completed state across play sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progression {
    unlocked: BTreeSet<TaskId>,
    completed: BTreeSet<TaskId>,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    /// Creates a fresh profile with only the first task unlocked.
    #[must_use]
    pub fn new() -> Self {
        let mut unlocked = BTreeSet::new();
        let _ = unlocked.insert(TaskId::new(0));
        Self {
            unlocked,
            completed: BTreeSet::new(),
        }
    }

    /// Restores a profile from persisted save data. The first task is
    /// re-seeded as unlocked no matter what the save contains.
    #[must_use]
    pub fn from_save(save: &SaveData) -> Self {
        let mut progression = Self::new();
        progression
            .unlocked
            .extend(save.unlocked.iter().map(|id| TaskId::new(*id)));
        progression
            .completed
            .extend(save.completed.iter().map(|id| TaskId::new(*id)));
        progression
    }

    /// Captures the profile as persistable save data, sorted by identifier.
    #[must_use]
    pub fn to_save(&self) -> SaveData {
        SaveData {
            unlocked: self.unlocked.iter().map(|id| id.get()).collect(),
            completed: self.completed.iter().map(|id| id.get()).collect(),
        }
    }

    /// Reports whether the provided task may be started.
    #[must_use]
    pub fn is_unlocked(&self, id: TaskId) -> bool {
        self.unlocked.contains(&id)
    }

    /// Reports whether the provided task has ever been completed.
    #[must_use]
    pub fn is_completed(&self, id: TaskId) -> bool {
        self.completed.contains(&id)
    }

    /// Records a completion and feeds the task's unlock list into the
    /// unlocked set. Idempotent: re-completing a task changes nothing.
    pub fn complete_task(&mut self, catalog: &TaskCatalog, id: TaskId) {
        let _ = self.completed.insert(id);
        if let Some(task) = catalog.get(id) {
            self.unlocked.extend(task.unlocks.iter().copied());
        }
    }

    /// Identifier of the task to advance to after `current`: the next task
    /// when it is unlocked, otherwise `current` unchanged.
    #[must_use]
    pub fn next_task(&self, current: TaskId) -> TaskId {
        let candidate = current.successor();
        if self.unlocked.contains(&candidate) {
            candidate
        } else {
            current
        }
    }
}
