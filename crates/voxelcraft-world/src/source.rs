use voxelcraft_blocks::BlockType;

use crate::World;

/// Anything that can answer "what occupies cell (x, y, z)".
///
/// The mesher, the collision queries, and the pickers all sample through this
/// trait so that edits layered over [`World`] are seen uniformly.
pub trait BlockSource {
    fn world(&self) -> &World;

    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType;

    #[inline]
    fn is_air(&self, x: i32, y: i32, z: i32) -> bool {
        self.block_at(x, y, z).is_air()
    }

    #[inline]
    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.block_at(x, y, z).is_solid()
    }
}

impl BlockSource for World {
    #[inline]
    fn world(&self) -> &World {
        self
    }

    #[inline]
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.generated_block(x, y, z)
    }
}

impl<S: BlockSource + ?Sized> BlockSource for &S {
    #[inline]
    fn world(&self) -> &World {
        (**self).world()
    }

    #[inline]
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        (**self).block_at(x, y, z)
    }
}
