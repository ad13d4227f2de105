use voxelcraft_blocks::Rgb;
use voxelcraft_geom::Vec3;

use crate::face::{Face, QUAD_TRIANGLES};

/// Non-indexed triangle soup: three floats per vertex in each array.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub col: Vec<f32>,
}

impl MeshBuild {
    /// Appends the `face` quad of cell `(x, y, z)` as two triangles.
    pub fn add_face(&mut self, x: i32, y: i32, z: i32, face: Face, color: Rgb) {
        let corners = face.corners();
        let n = face.normal();
        for &i in &QUAD_TRIANGLES {
            let (cx, cy, cz) = corners[i];
            self.pos.extend_from_slice(&[
                (x + cx as i32) as f32,
                (y + cy as i32) as f32,
                (z + cz as i32) as f32,
            ]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.col.extend_from_slice(&[color.r, color.g, color.b]);
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertex_count() / 6
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos[i * 3], self.pos[i * 3 + 1], self.pos[i * 3 + 2])
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.norm[i * 3], self.norm[i * 3 + 1], self.norm[i * 3 + 2])
    }

    /// Triangles with their flat face normal.
    pub fn triangles(&self) -> impl Iterator<Item = ([Vec3; 3], Vec3)> + '_ {
        (0..self.vertex_count() / 3).map(move |t| {
            let b = t * 3;
            (
                [self.vertex(b), self.vertex(b + 1), self.vertex(b + 2)],
                self.normal(b),
            )
        })
    }

    /// Bytes held by the three attribute arrays.
    pub fn byte_len(&self) -> usize {
        (self.pos.len() + self.norm.len() + self.col.len()) * std::mem::size_of::<f32>()
    }
}
