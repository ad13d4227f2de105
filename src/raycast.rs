use voxelcraft_geom::Vec3;
use voxelcraft_runtime::ChunkStreamer;
use voxelcraft_world::{BlockPos, BlockSource};

/// Nudge into the hit cell when removing.
pub const REMOVE_BIAS: f32 = 0.001;
/// Nudge out of the hit face when placing; past half a cell so edge hits land outside.
pub const PLACE_BIAS: f32 = 0.51;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    /// Outward unit normal of the face that was hit.
    pub normal: Vec3,
    pub distance: f32,
}

impl RayHit {
    /// Cell behind the hit face.
    pub fn remove_target(&self) -> BlockPos {
        cell_of(self.point - self.normal * REMOVE_BIAS)
    }

    /// Cell in front of the hit face.
    pub fn place_target(&self) -> BlockPos {
        cell_of(self.point + self.normal * PLACE_BIAS)
    }
}

fn cell_of(p: Vec3) -> BlockPos {
    p.floor_i32().into()
}

/// Finds the first surface along a ray within `[near, far]`.
pub trait RayCaster {
    fn cast(&self, origin: Vec3, dir: Vec3, near: f32, far: f32) -> Option<RayHit>;
}

/// Casts against the triangles of every live chunk mesh. Cells without a built
/// mesh are invisible to it.
pub struct MeshRaycaster<'a> {
    chunks: &'a ChunkStreamer,
}

impl<'a> MeshRaycaster<'a> {
    pub fn new(chunks: &'a ChunkStreamer) -> Self {
        Self { chunks }
    }
}

impl RayCaster for MeshRaycaster<'_> {
    fn cast(&self, origin: Vec3, dir: Vec3, near: f32, far: f32) -> Option<RayHit> {
        let dir = dir.normalized();
        if dir.length_sq() == 0.0 {
            return None;
        }
        let mut best: Option<(f32, Vec3)> = None;
        for (_, mesh) in self.chunks.iter() {
            let limit = best.map_or(far, |(t, _)| t);
            if mesh.bbox.ray_entry(origin, dir, near, limit).is_none() {
                continue;
            }
            for (_, part) in mesh.parts() {
                for (tri, n) in part.triangles() {
                    if dir.dot(n) >= 0.0 {
                        continue;
                    }
                    let Some(t) = ray_triangle(origin, dir, &tri) else {
                        continue;
                    };
                    if t < near || t > far {
                        continue;
                    }
                    if best.is_none_or(|(bt, _)| t < bt) {
                        best = Some((t, n));
                    }
                }
            }
        }
        best.map(|(t, normal)| RayHit {
            point: origin + dir * t,
            normal,
            distance: t,
        })
    }
}

/// Möller–Trumbore. Returns the ray parameter of the hit, edges inclusive.
pub fn ray_triangle(origin: Vec3, dir: Vec3, tri: &[Vec3; 3]) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv = 1.0 / det;
    let s = origin - tri[0];
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv;
    (t > EPS).then_some(t)
}

/// Walks the voxel grid cell by cell against the block field itself.
pub struct VoxelRaycaster<'a, S: ?Sized> {
    src: &'a S,
}

impl<'a, S: BlockSource + ?Sized> VoxelRaycaster<'a, S> {
    pub fn new(src: &'a S) -> Self {
        Self { src }
    }
}

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

#[inline]
fn step_of(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

impl<S: BlockSource + ?Sized> RayCaster for VoxelRaycaster<'_, S> {
    fn cast(&self, origin: Vec3, dir: Vec3, near: f32, far: f32) -> Option<RayHit> {
        let d = dir.normalized();
        if d.length_sq() == 0.0 {
            return None;
        }
        let (mut vx, mut vy, mut vz) = origin.floor_i32();
        let (sx, sy, sz) = (step_of(d.x), step_of(d.y), step_of(d.z));
        let (ix, iy, iz) = (inv_or_max(d.x), inv_or_max(d.y), inv_or_max(d.z));
        let tdx = if sx == 0 { f32::MAX } else { ix };
        let tdy = if sy == 0 { f32::MAX } else { iy };
        let tdz = if sz == 0 { f32::MAX } else { iz };

        let frac = |o: f32| o - o.floor();
        let first = |s: i32, f: f32, inv: f32| match s {
            1 => (1.0 - f) * inv,
            -1 => f * inv,
            _ => f32::MAX,
        };
        let mut tmx = first(sx, frac(origin.x), ix);
        let mut tmy = first(sy, frac(origin.y), iy);
        let mut tmz = first(sz, frac(origin.z), iz);

        let mut t = 0.0f32;
        let mut normal = Vec3::ZERO;
        while t <= far {
            if t >= near && self.src.is_solid(vx, vy, vz) {
                return Some(RayHit {
                    point: origin + d * t,
                    normal,
                    distance: t,
                });
            }
            if tmx < tmy && tmx < tmz {
                vx += sx;
                t = tmx;
                tmx += tdx;
                normal = Vec3::new(-sx as f32, 0.0, 0.0);
            } else if tmy < tmz {
                vy += sy;
                t = tmy;
                tmy += tdy;
                normal = Vec3::new(0.0, -sy as f32, 0.0);
            } else {
                vz += sz;
                t = tmz;
                tmz += tdz;
                normal = Vec3::new(0.0, 0.0, -sz as f32);
            }
        }
        None
    }
}
