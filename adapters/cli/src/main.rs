#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives Battery Grid headlessly.
//!
//! Layouts shared as clipboard strings replay through the same command
//! pipeline the interactive adapters use, so the verdict printed here matches
//! what a player would see on screen.

mod layout_transfer;
mod profile;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use battery_grid_core::{BatteryType, BuildError, Command, DemolishError, Event, TaskId, Vec2};
use battery_grid_rendering::{compose, Scene, ScenePresenter};
use battery_grid_system_builder::Builder;
use battery_grid_system_progression::{builtin_catalog, Progression};
use battery_grid_system_viewport::Viewport;
use battery_grid_world::{apply, query, World};
use clap::{Parser, Subcommand};

use crate::layout_transfer::{FactoryLayoutEntry, FactoryLayoutSnapshot};

/// Headless driver for the Battery Grid placement puzzle.
#[derive(Parser)]
#[command(name = "battery-grid")]
struct Cli {
    /// Path of the progression profile file.
    #[arg(long, default_value = "battery-grid-profile.json")]
    profile: PathBuf,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Lists catalog tasks with their unlock and completion state.
    Tasks,
    /// Prints the starting scene of a task.
    Show {
        /// Identifier of the task to show.
        #[arg(long)]
        task: u32,
    },
    /// Replays an encoded layout against a task and records completion.
    Check {
        /// Identifier of the task to check against.
        #[arg(long)]
        task: u32,
        /// Encoded layout string produced by `encode`.
        layout: String,
    },
    /// Validates factory placements and prints the shareable layout string.
    Encode {
        /// Identifier of the task the placements belong to.
        #[arg(long)]
        task: u32,
        /// Factory placement as `battery,x,y`. Repeatable.
        #[arg(long = "factory", value_parser = parse_factory)]
        factories: Vec<FactoryArg>,
    },
}

/// Factory placement parsed from the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FactoryArg {
    battery: u8,
    x: f32,
    y: f32,
}

fn parse_factory(value: &str) -> Result<FactoryArg, String> {
    let mut parts = value.split(',');
    let battery = parts
        .next()
        .and_then(|part| part.trim().parse::<u8>().ok())
        .ok_or_else(|| format!("expected `battery,x,y`, got '{value}'"))?;
    let x = parts
        .next()
        .and_then(|part| part.trim().parse::<f32>().ok())
        .ok_or_else(|| format!("expected `battery,x,y`, got '{value}'"))?;
    let y = parts
        .next()
        .and_then(|part| part.trim().parse::<f32>().ok())
        .ok_or_else(|| format!("expected `battery,x,y`, got '{value}'"))?;
    if parts.next().is_some() {
        return Err(format!("expected `battery,x,y`, got '{value}'"));
    }
    Ok(FactoryArg { battery, x, y })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let catalog = builtin_catalog();

    match cli.command {
        CliCommand::Tasks => {
            let progression = Progression::from_save(&profile::load(&cli.profile)?);
            for (id, task) in catalog.iter() {
                let state = if progression.is_completed(id) {
                    "done"
                } else if progression.is_unlocked(id) {
                    "open"
                } else {
                    "locked"
                };
                println!("[{state:>6}] {}: {}", id.get(), task.title);
            }
        }
        CliCommand::Show { task } => {
            let id = TaskId::new(task);
            let spec = catalog
                .get(id)
                .with_context(|| format!("task {task} does not exist"))?;
            let world = World::from_task(spec);
            println!("{}", query::welcome_banner(&world));

            let size = query::map_size(&world);
            let viewport = Viewport::new(size, size);
            let scene = compose(&world, &viewport, &Builder::new(), None);
            let mut presenter = TextPresenter::new(std::io::stdout().lock());
            presenter.present(&scene)?;
        }
        CliCommand::Check { task, layout } => {
            let id = TaskId::new(task);
            let spec = catalog
                .get(id)
                .with_context(|| format!("task {task} does not exist"))?;
            let snapshot = FactoryLayoutSnapshot::decode(&layout)?;

            let mut world = World::from_task(spec);
            let size = query::map_size(&world);
            if snapshot.width != size.x() || snapshot.height != size.y() {
                bail!(
                    "layout was captured on a {}x{} map, task {task} uses {}x{}",
                    snapshot.width,
                    snapshot.height,
                    size.x(),
                    size.y(),
                );
            }

            let mut events = Vec::new();
            for entry in &snapshot.factories {
                apply(
                    &mut world,
                    Command::BuildFactory {
                        battery: entry.battery,
                        position: entry.position,
                    },
                    &mut events,
                );
            }
            for event in &events {
                println!("{}", describe_event(event));
            }

            if query::is_task_complete(&world) {
                println!("task complete: every city is supplied");
                let mut progression = Progression::from_save(&profile::load(&cli.profile)?);
                progression.complete_task(&catalog, id);
                profile::store(&cli.profile, &progression.to_save())?;
            } else {
                for city in query::city_view(&world).iter() {
                    if !city.supplied {
                        println!("unsupplied: {} (type {})", city.name, city.battery.get());
                    }
                }
            }
        }
        CliCommand::Encode { task, factories } => {
            let spec = catalog
                .get(TaskId::new(task))
                .with_context(|| format!("task {task} does not exist"))?;
            let mut world = World::from_task(spec);

            let mut events = Vec::new();
            for arg in &factories {
                apply(
                    &mut world,
                    Command::BuildFactory {
                        battery: BatteryType::new(arg.battery),
                        position: Vec2::new(arg.x, arg.y),
                    },
                    &mut events,
                );
            }
            for event in &events {
                if matches!(event, Event::BuildRejected { .. }) {
                    bail!("{}", describe_event(event));
                }
            }

            let size = query::map_size(&world);
            let snapshot = FactoryLayoutSnapshot {
                width: size.x(),
                height: size.y(),
                factories: query::factory_view(&world)
                    .iter()
                    .map(|factory| FactoryLayoutEntry {
                        battery: factory.battery,
                        position: factory.position,
                    })
                    .collect(),
            };
            println!("{}", snapshot.encode());
        }
    }

    Ok(())
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::FactoryBuilt {
            factory,
            battery,
            position,
        } => format!(
            "built factory {} (type {}) at ({}, {})",
            factory.get(),
            battery.get(),
            position.x(),
            position.y(),
        ),
        Event::BuildRejected {
            battery,
            position,
            reason,
        } => format!(
            "rejected type {} at ({}, {}): {}",
            battery.get(),
            position.x(),
            position.y(),
            describe_build_error(*reason),
        ),
        Event::FactoryDemolished {
            factory,
            battery,
            position,
        } => format!(
            "demolished factory {} (type {}) at ({}, {})",
            factory.get(),
            battery.get(),
            position.x(),
            position.y(),
        ),
        Event::DemolishRejected { factory, reason } => format!(
            "could not demolish factory {}: {}",
            factory.get(),
            describe_demolish_error(*reason),
        ),
    }
}

fn describe_build_error(reason: BuildError) -> &'static str {
    match reason {
        BuildError::OutOfStorage => "no batteries of that type left in storage",
        BuildError::TooCloseToCity => "a city occupies that spot",
        BuildError::TooCloseToFactory => "a factory occupies that spot",
    }
}

fn describe_demolish_error(reason: DemolishError) -> &'static str {
    match reason {
        DemolishError::MissingFactory => "no such factory exists",
    }
}

/// Presenter that renders scenes as plain text for terminals and logs.
struct TextPresenter<W> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ScenePresenter for TextPresenter<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        writeln!(self.out, "{}", scene.task_title)?;
        writeln!(self.out, "{}", scene.task_description)?;
        for city in &scene.cities {
            let marker = if city.supplied { "supplied" } else { "dark" };
            writeln!(
                self.out,
                "city {} (type {}) at ({:.0}, {:.0}) [{marker}]",
                city.name,
                city.battery.get(),
                city.position.x,
                city.position.y,
            )?;
        }
        for factory in &scene.factories {
            writeln!(
                self.out,
                "factory (type {}) at ({:.0}, {:.0})",
                factory.battery.get(),
                factory.position.x,
                factory.position.y,
            )?;
        }
        for row in &scene.storage {
            let armed = if row.selected { " [armed]" } else { "" };
            writeln!(
                self.out,
                "storage type {}: {} left{armed}",
                row.battery.get(),
                row.remaining,
            )?;
        }
        if scene.task_complete {
            writeln!(self.out, "all cities supplied")?;
        }
        Ok(())
    }
}
