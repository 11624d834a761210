//! Launcher cursor

use super::machine::AppId;

/// Number of launcher icons
pub const ICON_COUNT: u8 = 4;

/// A stick gesture, already mapped to screen directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Index of the highlighted launcher icon, always in `0..4`
///
/// Icons are laid out row-major in a 2x2 grid: 0 and 1 form the top row,
/// 2 and 3 the bottom one. A vertical move toggles the row and changes the
/// index by two, a horizontal move toggles the column and changes it by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selection(u8);

impl Selection {
    /// Create a selection; `None` outside `0..4`
    pub const fn new(index: u8) -> Option<Self> {
        if index < ICON_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Grid row (0 top, 1 bottom)
    pub const fn row(self) -> u8 {
        self.0 / 2
    }

    /// Grid column (0 left, 1 right)
    pub const fn column(self) -> u8 {
        self.0 % 2
    }

    /// App launched by this icon
    pub fn app(self) -> AppId {
        AppId::ALL[self.0 as usize]
    }

    /// Move the cursor; moves that would leave the grid are ignored
    pub fn step(self, direction: Direction) -> Self {
        let i = self.0;
        let next = match direction {
            Direction::Down if i < 2 => i + 2,
            Direction::Up if i >= 2 => i - 2,
            Direction::Left if i % 2 == 1 => i - 1,
            Direction::Right if i % 2 == 0 => i + 1,
            _ => i,
        };
        Self(next)
    }

    /// Iterate over every icon in index order
    pub fn all() -> impl Iterator<Item = Selection> {
        (0..ICON_COUNT).map(Selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bounds() {
        assert_eq!(Selection::new(3).map(Selection::index), Some(3));
        assert_eq!(Selection::new(4), None);
    }

    #[test]
    fn test_icon_to_app() {
        let apps: [AppId; 4] = [
            AppId::Camera,
            AppId::Compass,
            AppId::Weather,
            AppId::Game,
        ];
        for (sel, app) in Selection::all().zip(apps) {
            assert_eq!(sel.app(), app);
        }
    }

    #[test]
    fn test_vertical_toggles_row() {
        let s = Selection::default();
        assert_eq!(s.step(Direction::Down).index(), 2);
        assert_eq!(s.step(Direction::Down).step(Direction::Down).index(), 2);
        assert_eq!(s.step(Direction::Up).index(), 0);
        assert_eq!(s.step(Direction::Down).row(), 1);
    }

    #[test]
    fn test_horizontal_toggles_column() {
        let s = Selection::default();
        assert_eq!(s.step(Direction::Right).index(), 1);
        assert_eq!(s.step(Direction::Right).step(Direction::Right).index(), 1);
        assert_eq!(s.step(Direction::Left).index(), 0);

        let bottom = Selection::new(2).unwrap_or_default();
        assert_eq!(bottom.step(Direction::Right).index(), 3);
        assert_eq!(bottom.step(Direction::Right).step(Direction::Left).index(), 2);
    }

    #[test]
    fn test_layout() {
        // Camera and Compass on top, Weather and Frogger below
        let cells: [(u8, u8); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];
        for (sel, cell) in Selection::all().zip(cells) {
            assert_eq!((sel.row(), sel.column()), cell);
        }
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        fn direction() -> impl Strategy<Value = Direction> {
            prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ]
        }

        proptest! {
            #[test]
            fn steps_stay_in_range_and_move_by_axis_amount(
                start in 0u8..4,
                moves in proptest::collection::vec(direction(), 0..40),
            ) {
                let mut sel = Selection::new(start).unwrap_or_default();
                for dir in moves {
                    let next = sel.step(dir);
                    prop_assert!(next.index() < ICON_COUNT);

                    let delta = (next.index() as i8 - sel.index() as i8).abs();
                    let expected = if dir.is_vertical() { 2 } else { 1 };
                    prop_assert!(delta == 0 || delta == expected);
                    sel = next;
                }
            }
        }
    }
}
