use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use voxelcraft_edit::WorldField;
use voxelcraft_mesh_cpu::{ChunkMeshCPU, build_chunk_mesh};
use voxelcraft_world::{BlockSource, ChunkCoord, World};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    /// Meshes inserted into the live table.
    pub builds: u64,
    /// Build attempts that produced no faces.
    pub empty_builds: u64,
    pub disposals: u64,
    pub bytes_released: u64,
    pub flushes: u64,
}

/// Keys that entered and left the live table during one update.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct StreamDelta {
    pub built: Vec<ChunkCoord>,
    pub disposed: Vec<ChunkCoord>,
}

impl StreamDelta {
    pub fn is_empty(&self) -> bool {
        self.built.is_empty() && self.disposed.is_empty()
    }
}

/// All chunk keys within Chebyshev `radius` of `center` that overlap the world,
/// in ascending order.
pub fn required_set(world: &World, center: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
    let radius = radius.max(0);
    let (lo, hi) = world.chunk_range();
    let x0 = center.cx.saturating_sub(radius).max(lo);
    let x1 = center.cx.saturating_add(radius).min(hi);
    let z0 = center.cz.saturating_sub(radius).max(lo);
    let z1 = center.cz.saturating_add(radius).min(hi);
    let mut out = Vec::new();
    for cx in x0..=x1 {
        for cz in z0..=z1 {
            out.push(ChunkCoord::new(cx, cz));
        }
    }
    out
}

/// Owner of every built chunk mesh.
///
/// A key is either absent or built. Builds for newly required keys run on a
/// rayon pool, but results are inserted by the caller's thread only, so the
/// table has a single writer.
pub struct ChunkStreamer {
    view_radius: i32,
    live: HashMap<ChunkCoord, ChunkMeshCPU>,
    center: Option<ChunkCoord>,
    required: HashSet<ChunkCoord>,
    build_counts: HashMap<ChunkCoord, u32>,
    stats: StreamStats,
    pool: Option<ThreadPool>,
}

impl ChunkStreamer {
    pub fn new(view_radius: i32) -> Self {
        Self {
            view_radius: view_radius.max(0),
            live: HashMap::new(),
            center: None,
            required: HashSet::new(),
            build_counts: HashMap::new(),
            stats: StreamStats::default(),
            pool: None,
        }
    }

    /// Streams with a dedicated mesh pool of `threads` workers instead of the
    /// global rayon pool.
    pub fn with_workers(view_radius: i32, threads: usize) -> Self {
        let mut s = Self::new(view_radius);
        match ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("voxelcraft-mesh-{i}"))
            .build()
        {
            Ok(pool) => s.pool = Some(pool),
            Err(e) => log::warn!("mesh pool unavailable ({e}); using the global pool"),
        }
        s
    }

    #[inline]
    pub fn view_radius(&self) -> i32 {
        self.view_radius
    }

    /// Changes the radius; takes effect on the next forced update.
    pub fn set_view_radius(&mut self, radius: i32) {
        self.view_radius = radius.max(0);
    }

    #[inline]
    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    #[inline]
    pub fn is_required(&self, c: ChunkCoord) -> bool {
        self.required.contains(&c)
    }

    #[inline]
    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    /// Number of times `c` has been built since the last [`clear`](Self::clear).
    pub fn build_count(&self, c: ChunkCoord) -> u32 {
        self.build_counts.get(&c).copied().unwrap_or(0)
    }

    #[inline]
    pub fn get(&self, c: ChunkCoord) -> Option<&ChunkMeshCPU> {
        self.live.get(&c)
    }

    #[inline]
    pub fn is_live(&self, c: ChunkCoord) -> bool {
        self.live.contains_key(&c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &ChunkMeshCPU)> {
        self.live.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live keys in ascending order.
    pub fn live_keys(&self) -> Vec<ChunkCoord> {
        let mut keys: Vec<_> = self.live.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Recomputes the required set around `(x, z)` and builds or disposes the
    /// difference. Does nothing unless the viewpoint changed chunk or `force`.
    pub fn update_view<S>(&mut self, src: &S, x: f32, z: f32, force: bool) -> StreamDelta
    where
        S: BlockSource + Sync + ?Sized,
    {
        let center = ChunkCoord::from_world(x, z);
        if !force && self.center == Some(center) {
            return StreamDelta::default();
        }
        self.center = Some(center);
        let required = required_set(src.world(), center, self.view_radius);
        self.required = required.iter().copied().collect();

        let mut delta = StreamDelta::default();
        let mut stale: Vec<ChunkCoord> = self
            .live
            .keys()
            .filter(|k| !self.required.contains(*k))
            .copied()
            .collect();
        stale.sort_unstable();
        for c in stale {
            if self.dispose(c) {
                delta.disposed.push(c);
            }
        }

        let missing: Vec<ChunkCoord> = required
            .into_iter()
            .filter(|c| !self.live.contains_key(c))
            .collect();
        let build = || -> Vec<(ChunkCoord, Option<ChunkMeshCPU>)> {
            missing
                .par_iter()
                .map(|&c| (c, build_chunk_mesh(src, c)))
                .collect()
        };
        let results = match self.pool.as_ref() {
            Some(pool) => pool.install(build),
            None => build(),
        };
        for (c, mesh) in results {
            if self.insert_built(c, mesh) {
                delta.built.push(c);
            }
        }
        log::debug!(
            "view center {} -> +{} -{} ({} live)",
            center,
            delta.built.len(),
            delta.disposed.len(),
            self.live.len()
        );
        delta
    }

    /// Builds `c` unless already live. Returns true when a mesh was inserted.
    pub fn ensure<S: BlockSource + ?Sized>(&mut self, src: &S, c: ChunkCoord) -> bool {
        if self.live.contains_key(&c) {
            return false;
        }
        let mesh = build_chunk_mesh(src, c);
        self.insert_built(c, mesh)
    }

    fn insert_built(&mut self, c: ChunkCoord, mesh: Option<ChunkMeshCPU>) -> bool {
        match mesh {
            Some(mesh) => {
                self.live.insert(c, mesh);
                *self.build_counts.entry(c).or_insert(0) += 1;
                self.stats.builds += 1;
                true
            }
            None => {
                self.stats.empty_builds += 1;
                false
            }
        }
    }

    /// Releases the buffers of `c`, then drops it from the live table.
    pub fn dispose(&mut self, c: ChunkCoord) -> bool {
        let Some(mut mesh) = self.live.remove(&c) else {
            return false;
        };
        let bytes = mesh.release();
        self.stats.disposals += 1;
        self.stats.bytes_released += bytes as u64;
        log::trace!("disposed chunk {} ({} bytes)", c, bytes);
        true
    }

    /// Disposes `c` and builds it again when it was live or is in view.
    /// Returns true when `c` is live afterwards.
    pub fn rebuild<S: BlockSource + ?Sized>(&mut self, src: &S, c: ChunkCoord) -> bool {
        let was_live = self.dispose(c);
        if was_live || self.is_required(c) {
            return self.ensure(src, c);
        }
        false
    }

    pub fn rebuild_all<S: BlockSource + ?Sized>(&mut self, src: &S, chunks: &[ChunkCoord]) -> usize {
        chunks.iter().filter(|&&c| self.rebuild(src, c)).count()
    }

    /// Drains the field's dirty set and rebuilds each chunk once.
    /// Returns the number of chunks drained.
    pub fn flush_dirty(&mut self, field: &mut WorldField) -> usize {
        let dirty = field.edits.take_dirty();
        if dirty.is_empty() {
            return 0;
        }
        self.stats.flushes += 1;
        let rebuilt = self.rebuild_all(&*field, &dirty);
        log::debug!("flushed {} dirty chunks ({} live after)", dirty.len(), rebuilt);
        dirty.len()
    }

    /// Releases every mesh and forgets the view center.
    pub fn clear(&mut self) {
        for c in self.live_keys() {
            self.dispose(c);
        }
        self.center = None;
        self.required.clear();
        self.build_counts.clear();
    }
}
