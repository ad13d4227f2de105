use voxelcraft_geom::{Aabb, Vec3};
use voxelcraft_world::{BlockPos, BlockSource};

/// Collision volume of a character. Treated as an axis-aligned box with
/// half extents `(radius, height / 2, radius)` centred on the position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub radius: f32,
    pub height: f32,
}

impl Capsule {
    pub const fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    #[inline]
    pub fn aabb_at(&self, center: Vec3) -> Aabb {
        Aabb::from_center(center, Vec3::new(self.radius, self.half_height(), self.radius))
    }
}

/// Whether the unit cube of `cell` strictly overlaps the box at `pos`.
#[inline]
pub fn overlaps_cell(pos: Vec3, shape: Capsule, cell: BlockPos) -> bool {
    shape
        .aabb_at(pos)
        .intersects(&Aabb::unit_cell(cell.x, cell.y, cell.z))
}

/// First non-air cell whose unit cube strictly overlaps the box at `pos`,
/// scanning x, then y, then z in ascending order. Touching faces do not count.
pub fn intersects_solid<S: BlockSource + ?Sized>(
    src: &S,
    pos: Vec3,
    shape: Capsule,
) -> Option<BlockPos> {
    let bb = shape.aabb_at(pos);
    let (x0, y0, z0) = bb.min.floor_i32();
    let (x1, y1, z1) = bb.max.floor_i32();
    for x in x0..=x1 {
        for y in y0..=y1 {
            for z in z0..=z1 {
                if src.is_air(x, y, z) {
                    continue;
                }
                if bb.intersects(&Aabb::unit_cell(x, y, z)) {
                    return Some(BlockPos::new(x, y, z));
                }
            }
        }
    }
    None
}
