use voxelcraft_blocks::BlockType;
use voxelcraft_geom::Vec2;

/// Directional inputs currently held down.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeldDirections {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
}

/// Edge-triggered requests. Each kind is honoured at most once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Place,
    Remove,
    Jump,
    Select(BlockType),
}

impl Action {
    #[inline]
    fn same_kind(self, other: Action) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

/// Everything the presentation layer hands the core for one tick.
#[derive(Default, Clone, Debug)]
pub struct InputFrame {
    pub held: HeldDirections,
    /// Pointer movement in pixels since the last tick.
    pub look_delta: Vec2,
    /// Analog move stick, `x` right and `y` forward, each in `[-1, 1]`.
    pub touch_move: Vec2,
    /// Analog look stick, each axis in `[-1, 1]`.
    pub touch_look: Vec2,
    pub(crate) actions: Vec<Action>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `action`. A repeat of a queued kind is dropped, except that a later
    /// selection replaces an earlier one.
    pub fn push(&mut self, action: Action) {
        if let Some(slot) = self.actions.iter_mut().find(|a| a.same_kind(action)) {
            if matches!(action, Action::Select(_)) {
                *slot = action;
            }
            return;
        }
        self.actions.push(action);
    }

    pub fn with(mut self, action: Action) -> Self {
        self.push(action);
        self
    }

    #[inline]
    pub fn has(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn selection(&self) -> Option<BlockType> {
        self.actions.iter().find_map(|a| match a {
            Action::Select(b) => Some(*b),
            _ => None,
        })
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}
