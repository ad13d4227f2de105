use voxelcraft_blocks::BlockType;
use voxelcraft_geom::Vec2;

use crate::event::{Action, HeldDirections, InputFrame};

/// Deterministic input for headless runs: walks in a slow circle, hops now and
/// then, and cycles through the palette while digging and building.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDriver {
    frame: u64,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_frame(&mut self) -> InputFrame {
        let n = self.frame;
        self.frame += 1;
        let mut f = InputFrame {
            held: HeldDirections {
                forward: n % 400 < 300,
                run: n % 800 >= 400,
                ..HeldDirections::default()
            },
            look_delta: Vec2::new(4.0, if n % 200 < 100 { 1.5 } else { -1.5 }),
            ..InputFrame::default()
        };
        if n % 90 == 45 {
            f.push(Action::Jump);
        }
        if n % 120 == 0 {
            let idx = (n / 120) as usize % BlockType::PLACEABLE.len();
            f.push(Action::Select(BlockType::PLACEABLE[idx]));
        }
        if n % 60 == 30 {
            f.push(Action::Remove);
        }
        if n % 60 == 59 {
            f.push(Action::Place);
        }
        f
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_deterministic() {
        let mut a = ScriptedDriver::new();
        let mut b = ScriptedDriver::new();
        for _ in 0..500 {
            let (fa, fb) = (a.next_frame(), b.next_frame());
            assert_eq!(fa.actions(), fb.actions());
            assert_eq!(fa.held, fb.held);
        }
    }

    #[test]
    fn first_frame_selects_first_placeable() {
        let f = ScriptedDriver::new().next_frame();
        assert_eq!(f.selection(), Some(BlockType::PLACEABLE[0]));
        assert!(f.held.forward);
    }
}
