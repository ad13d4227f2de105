use voxelcraft_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

/// Vertex order of the two triangles that make up a face quad.
pub(crate) const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 0, 2, 3];

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// Returns the outward unit normal.
    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }

    /// Unit-cube corners of this face, counter-clockwise seen from outside.
    pub fn corners(self) -> [(u8, u8, u8); 4] {
        match self {
            Face::PosX => [(1, 0, 0), (1, 1, 0), (1, 1, 1), (1, 0, 1)],
            Face::NegX => [(0, 0, 1), (0, 1, 1), (0, 1, 0), (0, 0, 0)],
            Face::PosY => [(0, 1, 1), (1, 1, 1), (1, 1, 0), (0, 1, 0)],
            Face::NegY => [(0, 0, 0), (1, 0, 0), (1, 0, 1), (0, 0, 1)],
            Face::PosZ => [(1, 0, 1), (1, 1, 1), (0, 1, 1), (0, 0, 1)],
            Face::NegZ => [(0, 0, 0), (0, 1, 0), (1, 1, 0), (1, 0, 0)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_lie_on_the_face_plane() {
        for f in Face::ALL {
            let (dx, dy, dz) = f.delta();
            for (cx, cy, cz) in f.corners() {
                let c = [cx as i32, cy as i32, cz as i32];
                let d = [dx, dy, dz];
                for axis in 0..3 {
                    if d[axis] == 1 {
                        assert_eq!(c[axis], 1, "{f:?}");
                    } else if d[axis] == -1 {
                        assert_eq!(c[axis], 0, "{f:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn triangle_winding_faces_outward() {
        for f in Face::ALL {
            let cs = f.corners();
            let p = |i: usize| {
                let (x, y, z) = cs[QUAD_TRIANGLES[i]];
                Vec3::new(x as f32, y as f32, z as f32)
            };
            let n = (p(1) - p(0)).cross(p(2) - p(0));
            assert!(n.dot(f.normal()) > 0.0, "{f:?} winds inward");
        }
    }
}
