//! Game action definitions

/// Held movement actions. Scene keys (N, P, Escape) are edge-triggered and
/// go straight to the active scene instead.
///
/// Keyboard / gamepad:
/// - A, Left / stick, D-pad left = MoveLeft
/// - D, Right / stick, D-pad right = MoveRight
/// - Space, W, Up / A (South), D-pad up = Jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

/// Held movement input for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Controls {
    /// -1, 0 or 1; opposing directions cancel
    pub fn horizontal(&self) -> f32 {
        (self.right as i32 - self.left as i32) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal() {
        assert_eq!(Controls::default().horizontal(), 0.0);
        assert_eq!(Controls { left: true, ..Default::default() }.horizontal(), -1.0);
        assert_eq!(Controls { left: true, right: true, jump: false }.horizontal(), 0.0);
    }
}
