use voxelcraft_blocks::BlockType;
use voxelcraft_geom::Vec3;
use voxelcraft_runtime::ChunkStreamer;
use voxelcraft_world::{World, WorldGenMode};

use crate::config::SimConfig;
use crate::event::{Action, InputFrame};
use crate::gamestate::{WorldEditor, WorldState};
use crate::interact::EditResult;
use crate::npc::spawn_npcs;
use crate::worldgen::{find_spawn, generate_trees};

/// Longest frame delta fed to the simulation.
pub const MAX_FRAME_DT: f32 = 0.05;

/// Read-only snapshot for a HUD or log line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Telemetry {
    pub tick: u64,
    pub position: Vec3,
    pub grounded: bool,
    pub dt: f32,
    pub fps: f32,
    pub live_chunks: usize,
    pub edit_count: usize,
    pub npc_count: usize,
    pub selected: &'static str,
    pub world: &'static str,
}

impl Telemetry {
    fn new() -> Self {
        Self {
            fps: 60.0,
            ..Self::default()
        }
    }
}

/// Per-tick outcome of the discrete actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub place: Option<EditResult>,
    pub remove: Option<EditResult>,
    pub npc_mined: usize,
    pub built: usize,
    pub disposed: usize,
}

pub struct Simulation {
    pub state: WorldState,
    pub config: SimConfig,
    pub telemetry: Telemetry,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let radius = config.streaming.view_distance();
        let chunks = match config.streaming.workers {
            Some(n) => ChunkStreamer::with_workers(radius, n),
            None => ChunkStreamer::new(radius),
        };
        let size = config.world_size();
        let mode = config.world.mode;
        let world = World::with_params(size, mode, config.terrain.clone());
        let state = WorldState::new(world, chunks, config.seed);
        let mut sim = Self {
            state,
            config,
            telemetry: Telemetry::new(),
        };
        sim.reset(size, mode);
        sim
    }

    /// Swaps in a new configuration and rebuilds the world from it.
    pub fn reconfigure(&mut self, config: SimConfig) {
        self.state
            .chunks
            .set_view_radius(config.streaming.view_distance());
        self.state.rng.seed(config.seed);
        let size = config.world_size();
        let mode = config.world.mode;
        self.config = config;
        self.reset(size, mode);
    }

    /// Drops every edit and mesh, then regenerates spawn, decoration, the visible
    /// chunks and the NPCs.
    pub fn reset(&mut self, size: i32, mode: WorldGenMode) {
        let world = World::with_params(size, mode, self.config.terrain.clone());
        let s = &mut self.state;
        s.field.reset(world);
        s.chunks.clear();
        s.npcs.clear();
        s.tick = 0;

        let spawn = find_spawn(&s.field.world);
        s.player.respawn(spawn);
        let trees = if s.field.world.is_flat() {
            generate_trees(&mut s.field, spawn, &mut s.rng)
        } else {
            0
        };
        s.chunks.flush_dirty(&mut s.field);
        s.chunks.update_view(&s.field, spawn.x, spawn.z, true);
        if s.field.world.is_flat() {
            s.npcs = spawn_npcs(&s.field.world, spawn, &mut s.rng);
        }
        log::info!(
            "world reset: size={} height={} mode={} trees={} npcs={} chunks={}",
            size,
            s.field.world.height,
            mode.describe(),
            trees,
            s.npcs.len(),
            s.chunks.len()
        );
        self.refresh_telemetry(0.0);
    }

    /// One fixed-order tick: look, player physics, streaming, edits, NPCs, telemetry.
    pub fn step(&mut self, input: &InputFrame, dt: f32) -> TickReport {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let mut report = TickReport::default();
        let s = &mut self.state;
        s.tick += 1;
        let tick = s.tick;

        if !input.actions().is_empty() {
            log::trace!(target: "events", "[tick {}] actions {:?}", tick, input.actions());
        }
        if let Some(ty) = input.selection() {
            if ty != BlockType::Air {
                s.selected = ty;
                log::debug!(target: "events", "[tick {}] selected {}", tick, ty.label());
            }
        }
        s.player.look(input, dt);
        let step = s.player.update(&s.field, input, dt);
        if step.jumped {
            log::trace!(target: "events", "[tick {}] jump", tick);
        }

        let p = s.player.position();
        let delta = s.chunks.update_view(&s.field, p.x, p.z, false);
        report.built = delta.built.len();
        report.disposed = delta.disposed.len();
        if !delta.is_empty() {
            log::trace!(
                target: "events",
                "[tick {}] streaming +{} -{}",
                tick,
                report.built,
                report.disposed
            );
        }

        let picker = self.config.interaction.picker;
        let reach = self.config.interaction.reach();
        if input.has(Action::Place) {
            let r = s.place_block(picker, reach);
            log::trace!(target: "events", "[tick {}] place {:?}", tick, r);
            report.place = Some(r);
        }
        if input.has(Action::Remove) {
            let r = s.remove_block(picker, reach);
            log::trace!(target: "events", "[tick {}] remove {:?}", tick, r);
            report.remove = Some(r);
        }

        let WorldState {
            field,
            chunks,
            npcs,
            rng,
            ..
        } = s;
        let mut editor = WorldEditor::new(field, chunks);
        for npc in npcs.iter_mut() {
            let t = npc.update(&mut editor, rng, dt);
            if let Some(pos) = t.mined {
                report.npc_mined += 1;
                log::trace!(target: "events", "[tick {}] npc mined {:?}", tick, pos);
            }
        }

        self.refresh_telemetry(dt);
        report
    }

    fn refresh_telemetry(&mut self, dt: f32) {
        let s = &self.state;
        let t = &mut self.telemetry;
        t.tick = s.tick;
        t.position = s.player.position();
        t.grounded = s.player.body.on_ground;
        t.dt = dt;
        if dt > 0.0 {
            t.fps = t.fps * 0.9 + (1.0 / dt) * 0.1;
        }
        t.live_chunks = s.chunks.len();
        t.edit_count = s.field.edits.len();
        t.npc_count = s.npcs.len();
        t.selected = s.selected.label();
        t.world = s.field.world.mode.describe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerKind;
    use crate::event::HeldDirections;
    use voxelcraft_world::ChunkCoord;

    fn flat_config() -> SimConfig {
        let mut cfg = SimConfig::default();
        cfg.world.mode = WorldGenMode::Flat;
        cfg
    }

    #[test]
    fn reset_builds_view_and_population() {
        let sim = Simulation::new(flat_config());
        let s = &sim.state;
        assert_eq!(s.chunks.len(), 16);
        assert!(s.npcs.len() <= 3);
        assert!(!s.field.edits.is_empty());
        assert_eq!(s.field.edits.dirty_len(), 0);
        assert_eq!(sim.telemetry.world, WorldGenMode::Flat.describe());
    }

    #[test]
    fn terrain_reset_has_no_trees_or_npcs() {
        let sim = Simulation::new(SimConfig::default());
        assert!(sim.state.field.edits.is_empty());
        assert!(sim.state.npcs.is_empty());
        assert!(sim.state.chunks.is_live(ChunkCoord::new(0, 0)));
    }

    #[test]
    fn player_settles_on_spawn_column() {
        let mut sim = Simulation::new(flat_config());
        let idle = InputFrame::new();
        for _ in 0..60 {
            sim.step(&idle, 1.0 / 60.0);
        }
        assert!(sim.telemetry.grounded);
        assert!((sim.telemetry.position.y - (5.0 + 0.9 + 0.001)).abs() < 1e-3);
        assert_eq!(sim.telemetry.tick, 60);
    }

    #[test]
    fn frame_delta_is_clamped() {
        let mut sim = Simulation::new(flat_config());
        sim.step(&InputFrame::new(), 1.0);
        assert_eq!(sim.telemetry.dt, MAX_FRAME_DT);
    }

    #[test]
    fn selection_changes_placed_type() {
        let mut sim = Simulation::new(flat_config());
        sim.step(&InputFrame::new().with(Action::Select(BlockType::Brick)), 0.016);
        assert_eq!(sim.state.selected, BlockType::Brick);
        assert_eq!(sim.telemetry.selected, BlockType::Brick.label());
    }

    #[test]
    fn walking_moves_the_view_center() {
        let mut cfg = flat_config();
        cfg.world.size = crate::config::SizeSetting::Int(256);
        cfg.interaction.picker = PickerKind::Voxel;
        let mut sim = Simulation::new(cfg);
        // open field: no trees in the way
        sim.state.field.edits.clear();
        sim.state.npcs.clear();
        let walk = InputFrame {
            held: HeldDirections {
                forward: true,
                run: true,
                ..HeldDirections::default()
            },
            ..InputFrame::default()
        };
        let mut streamed = 0;
        for _ in 0..200 {
            streamed += sim.step(&walk, 0.05).built;
        }
        assert!(sim.state.player.position().z > 16.0);
        assert!(streamed > 0);
        let p = sim.state.player.position();
        assert_eq!(sim.state.chunks.center(), Some(ChunkCoord::from_world(p.x, p.z)));
    }
}
