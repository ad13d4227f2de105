use std::f32::consts::FRAC_PI_2;

use voxelcraft_geom::Vec3;
use voxelcraft_physics::{Body, Capsule, CapsuleMover, MoverParams, StepReport, overlaps_cell};
use voxelcraft_world::{BlockPos, BlockSource};

use crate::event::{Action, InputFrame};

pub const PLAYER_HEIGHT: f32 = 1.8;
pub const PLAYER_RADIUS: f32 = 0.35;
pub const WALK_SPEED: f32 = 6.0;
pub const RUN_SPEED: f32 = 9.0;
pub const JUMP_FORCE: f32 = 12.0;
pub const STEP_HEIGHT: f32 = 1.0;
/// Horizontal velocity blend rate, per second.
pub const ACCELERATION: f32 = 20.0;
/// Radians per pixel of pointer movement.
pub const MOUSE_SENSITIVITY: f32 = 0.0025;
/// Radians per second at full analog look deflection.
pub const TOUCH_LOOK_SPEED: f32 = 2.2;
pub const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;
/// Eye offset above the body centre, as a fraction of height.
pub const EYE_FACTOR: f32 = 0.45;

pub fn player_params() -> MoverParams {
    MoverParams::new(
        Capsule::new(PLAYER_RADIUS, PLAYER_HEIGHT),
        WALK_SPEED,
        STEP_HEIGHT,
        JUMP_FORCE,
    )
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Radians; yaw 0 faces +Z.
    pub yaw: f32,
    pub pitch: f32,
    mover: CapsuleMover,
}

impl Player {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            body: Body::at(spawn),
            yaw: 0.0,
            pitch: 0.0,
            mover: CapsuleMover::new(player_params()),
        }
    }

    /// Places the player at `pos` at rest.
    pub fn respawn(&mut self, pos: Vec3) {
        self.body = Body::at(pos);
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn eye_position(&self) -> Vec3 {
        self.body.position + Vec3::new(0.0, PLAYER_HEIGHT * EYE_FACTOR, 0.0)
    }

    /// Ground-plane forward for the current yaw.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(-f.z, 0.0, f.x)
    }

    /// Unit view direction including pitch.
    pub fn view_dir(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Applies pointer and analog look input, then clamps pitch.
    pub fn look(&mut self, input: &InputFrame, dt: f32) {
        self.yaw -= input.look_delta.x * MOUSE_SENSITIVITY;
        self.pitch -= input.look_delta.y * MOUSE_SENSITIVITY;
        self.yaw -= input.touch_look.x * TOUCH_LOOK_SPEED * dt;
        self.pitch -= input.touch_look.y * TOUCH_LOOK_SPEED * dt;
        self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Target horizontal velocity for the held directions in yaw space.
    pub fn wish_velocity(&self, input: &InputFrame) -> Vec3 {
        let fwd = self.forward();
        let right = self.right();
        let held = input.held;
        let mut wish = Vec3::ZERO;
        if held.forward {
            wish += fwd;
        }
        if held.back {
            wish -= fwd;
        }
        if held.left {
            wish -= right;
        }
        if held.right {
            wish += right;
        }
        if !input.touch_move.is_zero() {
            wish += right * input.touch_move.x + fwd * input.touch_move.y;
        }
        if wish.length_sq() == 0.0 {
            return Vec3::ZERO;
        }
        let speed = if held.run { RUN_SPEED } else { WALK_SPEED };
        wish.normalized() * speed
    }

    /// One physics tick: smooth toward the wish velocity, then gravity, jump,
    /// x, z, vertical and edge clamp.
    pub fn update<S: BlockSource + ?Sized>(
        &mut self,
        src: &S,
        input: &InputFrame,
        dt: f32,
    ) -> StepReport {
        let target = self.wish_velocity(input);
        let k = (ACCELERATION * dt).min(1.0);
        self.body.velocity.x += (target.x - self.body.velocity.x) * k;
        self.body.velocity.z += (target.z - self.body.velocity.z) * k;
        self.mover
            .step(src, &mut self.body, dt, input.has(Action::Jump))
    }

    /// Whether the unit cell would overlap the player's box.
    pub fn intersects_cell(&self, cell: BlockPos) -> bool {
        overlaps_cell(self.body.position, self.mover.shape(), cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::HeldDirections;
    use voxelcraft_edit::WorldField;
    use voxelcraft_geom::Vec2;
    use voxelcraft_physics::CONTACT_EPSILON;
    use voxelcraft_world::{World, WorldGenMode};

    fn on_flat_ground() -> (WorldField, Player) {
        let field = WorldField::new(World::new(64, WorldGenMode::Flat));
        let p = Player::new(Vec3::new(0.5, 5.0 + PLAYER_HEIGHT / 2.0 + CONTACT_EPSILON, 0.5));
        (field, p)
    }

    fn holding(held: HeldDirections) -> InputFrame {
        InputFrame {
            held,
            ..InputFrame::default()
        }
    }

    #[test]
    fn forward_at_zero_yaw_is_plus_z() {
        let p = Player::new(Vec3::ZERO);
        assert!((p.forward().z - 1.0).abs() < 1e-6);
        assert!((p.right().x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn velocity_approaches_target_smoothly() {
        let (field, mut p) = on_flat_ground();
        p.body.on_ground = true;
        let input = holding(HeldDirections {
            forward: true,
            ..HeldDirections::default()
        });
        p.update(&field, &input, 0.01);
        // 20 * 0.01 = 0.2 of the way to 6
        assert!((p.body.velocity.z - 1.2).abs() < 1e-4);
        for _ in 0..100 {
            p.update(&field, &input, 0.01);
        }
        assert!((p.body.velocity.z - WALK_SPEED).abs() < 1e-3);
    }

    #[test]
    fn run_modifier_and_diagonals_normalize() {
        let p = Player::new(Vec3::ZERO);
        let input = holding(HeldDirections {
            forward: true,
            right: true,
            run: true,
            ..HeldDirections::default()
        });
        let w = p.wish_velocity(&input);
        assert!((w.length() - RUN_SPEED).abs() < 1e-4);
        assert_eq!(p.wish_velocity(&InputFrame::default()), Vec3::ZERO);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut p = Player::new(Vec3::ZERO);
        let input = InputFrame {
            look_delta: Vec2::new(0.0, -10_000.0),
            ..InputFrame::default()
        };
        p.look(&input, 0.016);
        assert!((p.pitch - MAX_PITCH).abs() < 1e-6);
    }

    #[test]
    fn jump_needs_ground() {
        let (field, mut p) = on_flat_ground();
        let jump = InputFrame::new().with(Action::Jump);
        p.body.on_ground = false;
        let r = p.update(&field, &jump, 0.016);
        assert!(!r.jumped);
        p.body.on_ground = true;
        let r = p.update(&field, &jump, 0.016);
        assert!(r.jumped);
        assert!(p.body.velocity.y > 0.0);
    }

    #[test]
    fn standing_player_overlaps_only_its_own_cells() {
        let (_, p) = on_flat_ground();
        assert!(p.intersects_cell(BlockPos::new(0, 5, 0)));
        assert!(p.intersects_cell(BlockPos::new(0, 6, 0)));
        // neighbours just outside the box
        assert!(!p.intersects_cell(BlockPos::new(0, 4, 0)));
        assert!(!p.intersects_cell(BlockPos::new(1, 5, 0)));
        assert!(!p.intersects_cell(BlockPos::new(0, 7, 0)));
    }

    #[test]
    fn eye_sits_above_centre() {
        let p = Player::new(Vec3::new(0.0, 10.0, 0.0));
        assert!((p.eye_position().y - (10.0 + 0.81)).abs() < 1e-5);
    }
}
