use std::f32::consts::TAU;

use voxelcraft_blocks::BlockType;
use voxelcraft_geom::{Axis, Vec2, Vec3};
use voxelcraft_physics::{AxisMove, Body, Capsule, CapsuleMover, MoverParams};
use voxelcraft_world::{BlockPos, BlockSource, World};

use crate::gamestate::BlockEditor;

pub const NPC_SPEED: f32 = 1.6;
pub const NPC_HEIGHT: f32 = 1.6;
pub const NPC_RADIUS: f32 = 0.3;
pub const NPC_STEP_HEIGHT: f32 = 0.6;
pub const NPC_JUMP: f32 = 10.0;
/// Seconds between two mined blocks.
pub const MINE_COOLDOWN: f32 = 0.6;
/// Distance from the world edge at which the heading turns around.
pub const EDGE_TURN_MARGIN: f32 = 1.5;
/// Minimum spawn distance from the player.
const SPAWN_CLEARANCE: f32 = 5.0;
/// Reach past the box face when looking for a block to mine.
const MINE_REACH: f32 = 0.05;
/// Share of the blocked displacement applied after a stuck jump.
const UNSTICK_NUDGE: f32 = 0.25;

pub fn npc_params() -> MoverParams {
    MoverParams::new(
        Capsule::new(NPC_RADIUS, NPC_HEIGHT),
        NPC_SPEED,
        NPC_STEP_HEIGHT,
        NPC_JUMP,
    )
}

/// What one NPC did during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NpcTick {
    pub mined: Option<BlockPos>,
    pub jumped: bool,
}

/// Autonomous wanderer. Walks a random heading, turns at the world edge and
/// digs or hops its way past obstacles.
#[derive(Clone, Debug)]
pub struct Npc {
    pub body: Body,
    /// Unit ground-plane direction; `y` is the world z component.
    pub heading: Vec2,
    pub wander_timer: f32,
    pub mine_cooldown: f32,
    pub anim_phase: f32,
    /// Yaw the model faces, `atan2(heading.x, heading.y)`.
    pub facing_yaw: f32,
    /// Signed arm/leg swing for the walk cycle.
    pub limb_swing: f32,
    mover: CapsuleMover,
}

impl Npc {
    /// Grounded and facing a random direction.
    pub fn spawn(pos: Vec3, rng: &mut fastrand::Rng) -> Self {
        let heading = Vec2::from_angle(rng.f32() * TAU);
        let mut body = Body::at(pos);
        body.on_ground = true;
        Self {
            body,
            heading,
            wander_timer: 1.0 + rng.f32() * 2.0,
            mine_cooldown: 0.0,
            anim_phase: 0.0,
            facing_yaw: heading.x.atan2(heading.y),
            limb_swing: 0.0,
            mover: CapsuleMover::new(npc_params()),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn update<E: BlockEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        rng: &mut fastrand::Rng,
        dt: f32,
    ) -> NpcTick {
        let mut tick = NpcTick::default();
        self.mine_cooldown = (self.mine_cooldown - dt).max(0.0);
        self.wander_timer -= dt;
        if self.wander_timer <= 0.0 {
            self.heading = Vec2::from_angle(rng.f32() * TAU);
            self.wander_timer = 1.0 + rng.f32() * 2.5;
        }
        if self.near_edge(editor.world()) {
            self.heading = -self.heading;
        }

        let step = self.heading * (NPC_SPEED * dt);
        for (axis, amount) in [(Axis::X, step.x), (Axis::Z, step.y)] {
            self.move_axis(editor, axis, amount, &mut tick);
        }

        self.mover.apply_gravity(&mut self.body, dt);
        self.mover.resolve_vertical(&*editor, &mut self.body, dt);

        self.facing_yaw = self.heading.x.atan2(self.heading.y);
        self.animate(step, dt);

        let clamped = self.mover.clamp_to_bounds(editor.world(), &mut self.body);
        if clamped.x {
            self.heading.x = -self.heading.x;
        }
        if clamped.z {
            self.heading.y = -self.heading.y;
        }
        tick
    }

    fn near_edge(&self, world: &World) -> bool {
        let lo = world.min as f32 + EDGE_TURN_MARGIN;
        let hi = world.max as f32 - EDGE_TURN_MARGIN;
        let p = self.body.position;
        p.x < lo || p.x > hi || p.z < lo || p.z > hi
    }

    fn move_axis<E: BlockEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        axis: Axis,
        amount: f32,
        tick: &mut NpcTick,
    ) {
        // The mover zeroes a blocked axis; NPCs steer by heading, not velocity.
        if self.mover.move_axis(&*editor, &mut self.body, axis, amount) != AxisMove::Blocked {
            return;
        }
        if !self.body.on_ground {
            return;
        }
        if self.mine_cooldown <= 0.0 {
            if let Some(pos) = self.mine_ahead(editor, axis, amount) {
                self.mine_cooldown = MINE_COOLDOWN;
                tick.mined = Some(pos);
                return;
            }
        }
        self.body.velocity.y = NPC_JUMP;
        self.body.on_ground = false;
        let p = self.body.position.get(axis);
        self.body.position.set(axis, p + amount * UNSTICK_NUDGE);
        tick.jumped = true;
    }

    /// Clears the lowest non-Air cell in the column just ahead, within the body's
    /// vertical extent. This also digs terrain the NPC could have stepped over.
    fn mine_ahead<E: BlockEditor + ?Sized>(
        &self,
        editor: &mut E,
        axis: Axis,
        amount: f32,
    ) -> Option<BlockPos> {
        let sign = amount.signum();
        let p = self.body.position;
        let reach = (NPC_RADIUS + MINE_REACH) * sign;
        let (tx, tz) = match axis {
            Axis::X => ((p.x + reach).floor() as i32, p.z.floor() as i32),
            _ => (p.x.floor() as i32, (p.z + reach).floor() as i32),
        };
        if !editor.world().contains_column(tx, tz) {
            return None;
        }
        let half = NPC_HEIGHT / 2.0;
        let y0 = (p.y - half).floor() as i32;
        let y1 = (p.y + half).floor() as i32;
        for y in y0..=y1 {
            if editor.is_air(tx, y, tz) {
                continue;
            }
            let pos = BlockPos::new(tx, y, tz);
            if editor.set_block(pos, BlockType::Air) {
                log::debug!(target: "events", "npc mined {:?}", pos);
                return Some(pos);
            }
        }
        None
    }

    fn animate(&mut self, step: Vec2, dt: f32) {
        let speed = step.length() / dt.max(1e-5);
        let intensity = (speed / NPC_SPEED).min(1.0);
        if intensity > 0.05 {
            self.anim_phase += dt * 8.0;
        }
        self.limb_swing = self.anim_phase.sin() * 0.6 * intensity;
    }
}

/// Scatters `max(3, size / 24)` spawn attempts over the world, skipping any that
/// land within five blocks of the player.
pub fn spawn_npcs(world: &World, player_pos: Vec3, rng: &mut fastrand::Rng) -> Vec<Npc> {
    let attempts = (world.size / 24).max(3);
    let span = (world.size - 1) as f32;
    let mut out = Vec::new();
    for _ in 0..attempts {
        let gx = world.min as f32 + rng.f32() * span;
        let gz = world.min as f32 + rng.f32() * span;
        let h = world.height_at(gx.floor() as i32, gz.floor() as i32);
        let pos = Vec3::new(gx + 0.5, h as f32 + 1.0 + NPC_HEIGHT / 2.0 + 0.02, gz + 0.5);
        if pos.distance_sq(player_pos) < SPAWN_CLEARANCE * SPAWN_CLEARANCE {
            continue;
        }
        out.push(Npc::spawn(pos, rng));
    }
    log::debug!("spawned {}/{} npcs", out.len(), attempts);
    out
}
