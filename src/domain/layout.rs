// Grid positions and the vertical layout cursor
use super::error::DashboardError;

pub const DASHBOARD_WIDTH: u32 = 24;
pub const DASHBOARD_MID: u32 = DASHBOARD_WIDTH / 2;
/// Vertical stride of the cursor, also the height of chart panels
pub const PANEL_HEIGHT: u32 = 8;
pub const ROW_HEIGHT: f32 = 1.0;
pub const TEXT_HEIGHT: f32 = 1.2;

/// Position of a panel on the fixed-width grid, in grid units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPosition {
    pub h: f32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

impl GridPosition {
    /// Checks the position against the canvas bounds
    pub fn validate(&self) -> Result<(), DashboardError> {
        let fits = self.h > 0.0
            && self.w > 0
            && self
                .x
                .checked_add(self.w)
                .is_some_and(|right| right <= DASHBOARD_WIDTH);
        if !fits {
            return Err(DashboardError::InvalidGridPosition {
                h: self.h,
                w: self.w,
                x: self.x,
                y: self.y,
            });
        }
        Ok(())
    }

    pub fn full_width(h: f32, y: u32) -> Self {
        Self {
            h,
            w: DASHBOARD_WIDTH,
            x: 0,
            y,
        }
    }

    pub fn left_half(y: u32) -> Self {
        Self {
            h: PANEL_HEIGHT as f32,
            w: DASHBOARD_MID,
            x: 0,
            y,
        }
    }

    pub fn right_half(y: u32) -> Self {
        Self {
            h: PANEL_HEIGHT as f32,
            w: DASHBOARD_MID,
            x: DASHBOARD_MID,
            y,
        }
    }
}

/// Issues y offsets for one dashboard build. Never shared between builds.
#[derive(Debug, Default)]
pub struct LayoutCursor {
    y: u32,
}

impl LayoutCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset; advances by one row height
    pub fn next(&mut self) -> u32 {
        let y = self.y;
        self.y += PANEL_HEIGHT;
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_at_zero_and_strides() {
        let mut cursor = LayoutCursor::new();
        let ys: Vec<u32> = (0..4).map(|_| cursor.next()).collect();
        assert_eq!(ys, vec![0, 8, 16, 24]);
    }

    #[test]
    fn test_independent_cursors() {
        let mut a = LayoutCursor::new();
        let mut b = LayoutCursor::new();
        a.next();
        a.next();
        assert_eq!(b.next(), 0);
        assert_eq!(a.next(), 16);
    }

    #[test]
    fn test_halves_fill_canvas() {
        let left = GridPosition::left_half(8);
        let right = GridPosition::right_half(8);
        assert_eq!(left.x + left.w, right.x);
        assert_eq!(right.x + right.w, DASHBOARD_WIDTH);
        assert_eq!(left.y, right.y);
    }

    #[test]
    fn test_grid_position_validation() {
        let at = |h: f32, w: u32, x: u32| GridPosition { h, w, x, y: 0 };
        assert!(at(8.0, 12, 12).validate().is_ok());
        assert!(at(8.0, 13, 12).validate().is_err());
        assert!(at(0.0, 24, 0).validate().is_err());
        assert!(at(1.0, 0, 0).validate().is_err());
        assert!(GridPosition::full_width(TEXT_HEIGHT, 40).validate().is_ok());
        assert!(at(1.0, u32::MAX, 1).validate().is_err());
        assert!(at(1.0, 1, u32::MAX).validate().is_err());
    }
}
