use voxelcraft_geom::{Axis, Vec3};
use voxelcraft_world::{BlockSource, World};

use crate::collide::{Capsule, intersects_solid};
use crate::{CONTACT_EPSILON, EDGE_MARGIN, GRAVITY};

/// Kinematic state of one mover. `position` is the centre of its box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub on_ground: bool,
}

impl Body {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoverParams {
    pub shape: Capsule,
    /// Horizontal speed the mover targets.
    pub speed: f32,
    pub step_height: f32,
    pub jump_force: f32,
    pub gravity: f32,
}

impl MoverParams {
    pub fn new(shape: Capsule, speed: f32, step_height: f32, jump_force: f32) -> Self {
        Self {
            shape,
            speed,
            step_height,
            jump_force,
            gravity: GRAVITY,
        }
    }
}

/// Result of resolving one horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisMove {
    /// Displacement applied without contact (or there was none to apply).
    Free,
    /// Blocked at floor level but lifted onto the ledge.
    Stepped,
    /// Reverted; the axis velocity was zeroed.
    Blocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalContact {
    None,
    Floor,
    Ceiling,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClampedAxes {
    pub x: bool,
    pub z: bool,
}

impl ClampedAxes {
    pub fn any(self) -> bool {
        self.x || self.z
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub jumped: bool,
    pub x: AxisMove,
    pub z: AxisMove,
    pub vertical: VerticalContact,
    pub clamped: ClampedAxes,
}

/// One collision/step/jump algorithm for every character, parameterised by shape
/// and constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleMover {
    pub params: MoverParams,
}

impl CapsuleMover {
    pub fn new(params: MoverParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn shape(&self) -> Capsule {
        self.params.shape
    }

    #[inline]
    pub fn collides<S: BlockSource + ?Sized>(&self, src: &S, pos: Vec3) -> bool {
        intersects_solid(src, pos, self.params.shape).is_some()
    }

    /// Applies `amount` along a horizontal `axis`.
    ///
    /// On contact a grounded mover tries once more lifted by `step_height`; if that
    /// is still blocked the axis is reverted and its velocity zeroed.
    pub fn move_axis<S: BlockSource + ?Sized>(
        &self,
        src: &S,
        body: &mut Body,
        axis: Axis,
        amount: f32,
    ) -> AxisMove {
        if amount == 0.0 {
            return AxisMove::Free;
        }
        let saved = body.position;
        let mut p = saved;
        p.set(axis, saved.get(axis) + amount);
        if !self.collides(src, p) {
            body.position = p;
            return AxisMove::Free;
        }
        if body.on_ground {
            let lifted = p + Vec3::new(0.0, self.params.step_height, 0.0);
            if !self.collides(src, lifted) {
                body.position = lifted;
                return AxisMove::Stepped;
            }
        }
        body.position = saved;
        body.velocity.set(axis, 0.0);
        AxisMove::Blocked
    }

    /// Integrates gravity into the vertical velocity.
    #[inline]
    pub fn apply_gravity(&self, body: &mut Body, dt: f32) {
        body.velocity.y -= self.params.gravity * dt;
    }

    /// Launches a grounded mover; clears `on_ground` so a second call in the same
    /// tick does nothing.
    pub fn try_jump(&self, body: &mut Body) -> bool {
        if !body.on_ground {
            return false;
        }
        body.velocity.y = self.params.jump_force;
        body.on_ground = false;
        true
    }

    /// Applies vertical displacement and snaps out of any contact.
    ///
    /// Falling into a cell rests the box on top of it; rising into one puts the
    /// box just under it. Either way vertical velocity is zeroed.
    pub fn resolve_vertical<S: BlockSource + ?Sized>(
        &self,
        src: &S,
        body: &mut Body,
        dt: f32,
    ) -> VerticalContact {
        let half = self.params.shape.half_height();
        body.position.y += body.velocity.y * dt;
        if !self.collides(src, body.position) {
            body.on_ground = false;
            return VerticalContact::None;
        }
        let contact = if body.velocity.y < 0.0 {
            let bottom = body.position.y - half;
            body.position.y = bottom.floor() + 1.0 + half + CONTACT_EPSILON;
            body.on_ground = true;
            VerticalContact::Floor
        } else if body.velocity.y > 0.0 {
            let top = body.position.y + half;
            body.position.y = top.floor() - half - CONTACT_EPSILON;
            VerticalContact::Ceiling
        } else {
            VerticalContact::None
        };
        body.velocity.y = 0.0;
        contact
    }

    /// Keeps the box `EDGE_MARGIN` inside the world horizontally, zeroing the
    /// velocity of each clamped axis.
    pub fn clamp_to_bounds(&self, world: &World, body: &mut Body) -> ClampedAxes {
        let lo = world.min as f32 + self.params.shape.radius + EDGE_MARGIN;
        let hi = world.max as f32 - self.params.shape.radius - EDGE_MARGIN;
        let mut clamped = ClampedAxes::default();
        for axis in Axis::HORIZONTAL {
            let v = body.position.get(axis);
            let c = v.clamp(lo, hi);
            if c != v {
                body.position.set(axis, c);
                body.velocity.set(axis, 0.0);
                match axis {
                    Axis::X => clamped.x = true,
                    _ => clamped.z = true,
                }
            }
        }
        clamped
    }

    /// Full tick using the body's own velocity: gravity, optional jump, x, z,
    /// vertical, edge clamp.
    pub fn step<S: BlockSource + ?Sized>(
        &self,
        src: &S,
        body: &mut Body,
        dt: f32,
        wants_jump: bool,
    ) -> StepReport {
        self.apply_gravity(body, dt);
        let jumped = wants_jump && self.try_jump(body);
        let x = self.move_axis(src, body, Axis::X, body.velocity.x * dt);
        let z = self.move_axis(src, body, Axis::Z, body.velocity.z * dt);
        let vertical = self.resolve_vertical(src, body, dt);
        let clamped = self.clamp_to_bounds(src.world(), body);
        StepReport {
            jumped,
            x,
            z,
            vertical,
            clamped,
        }
    }
}
