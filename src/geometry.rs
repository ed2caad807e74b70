use serde::{Deserialize, Serialize};

/// Size of a navigation region, measured in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Remove `rows` from the height, clamping at zero.
    pub fn shrink_height(self, rows: u32) -> Self {
        Self {
            width: self.width,
            height: self.height.saturating_sub(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_height_saturates() {
        assert_eq!(Size::new(10, 40).shrink_height(50), Size::new(10, 0));
        assert_eq!(Size::new(10, 400).shrink_height(50), Size::new(10, 350));
    }
}
