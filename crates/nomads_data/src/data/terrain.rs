use serde::{Deserialize, Serialize};

/// Terrain type for world cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    /// Walkable open ground.
    #[default]
    Open,
    /// Drinkable, impassable water.
    Water,
    /// Edible plant, impassable until eaten.
    Vegetation,
}

/// A grid coordinate. `x` is the row, `y` is the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index, `0..height`.
    pub x: u16,
    /// Column index, `0..width`.
    pub y: u16,
}

impl Position {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Shifts the position by a signed delta. Returns `None` when the result
    /// would be negative or overflow `u16`; upper bounds are the grid's concern.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        let x = u16::try_from(i32::from(self.x) + dx).ok()?;
        let y = u16::try_from(i32::from(self.y) + dy).ok()?;
        Some(Self { x, y })
    }

    /// Signed `(dx, dy)` from `self` to `other`.
    #[must_use]
    pub fn delta_to(self, other: Self) -> (i32, i32) {
        (
            i32::from(other.x) - i32::from(self.x),
            i32::from(other.y) - i32::from(self.y),
        )
    }

    #[must_use]
    pub fn manhattan(self, other: Self) -> u32 {
        let (dx, dy) = self.delta_to(other);
        dx.unsigned_abs() + dy.unsigned_abs()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An externally supplied terrain layout: dimensions plus a row-major water mask.
///
/// The simulation treats it as opaque initial state; vegetation and nomads are
/// seeded on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainLayout {
    pub width: u16,
    pub height: u16,
    pub water: Vec<bool>,
}

impl TerrainLayout {
    /// Returns whether the row-major cell at `(x, y)` is water. Out-of-range
    /// cells read as dry land.
    #[must_use]
    pub fn is_water(&self, x: u16, y: u16) -> bool {
        let idx = x as usize * self.width as usize + y as usize;
        x < self.height && y < self.width && self.water.get(idx).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_rejects_negative_coordinates() {
        let p = Position::new(0, 3);
        assert_eq!(p.offset(-1, 0), None);
        assert_eq!(p.offset(1, -3), Some(Position::new(1, 0)));
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(5, 3);
        let b = Position::new(2, 7);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
    }

    #[test]
    fn layout_water_lookup_is_row_major() {
        let layout = TerrainLayout {
            width: 3,
            height: 2,
            water: vec![false, false, true, true, false, false],
        };
        assert!(layout.is_water(0, 2));
        assert!(layout.is_water(1, 0));
        assert!(!layout.is_water(1, 1));
        assert!(!layout.is_water(5, 5));
    }
}
