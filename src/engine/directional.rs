//! Geometric nearest-neighbor focus movement.
//!
//! Linear index math breaks the moment a filtered grid changes row length,
//! so directional movement works on item bounding boxes instead: filter
//! candidates by the sign of their offset along the requested axis, then
//! take the lowest score with cross-axis drift penalized at 1.5x.

use serde::{Deserialize, Serialize};

use super::registry::Focusable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Linear step used by overlay contexts (Left/Up back, Right/Down forward).
    pub fn linear_step(self) -> isize {
        match self {
            Direction::Left | Direction::Up => -1,
            Direction::Right | Direction::Down => 1,
        }
    }
}

/// Weight applied to the cross-axis distance so that moving "right" prefers
/// same-row targets over diagonal ones.
const CROSS_AXIS_PENALTY: f32 = 1.5;

/// Pick the item focus should move to, or `None` when no candidate lies in
/// the requested direction (edge of the grid).
///
/// Ties resolve to the candidate met first in list order, which keeps the
/// result deterministic for identical geometry.
pub fn pick(items: &[Focusable], current: usize, dir: Direction) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    let cur_idx = if current < items.len() { current } else { 0 };
    let cur = items[cur_idx].rect;

    let mut best: Option<(usize, f32)> = None;
    for (i, item) in items.iter().enumerate() {
        if i == cur_idx {
            continue;
        }
        let dx = item.rect.left() - cur.left();
        let dy = item.rect.top() - cur.top();

        let survives = match dir {
            Direction::Right => dx > 0.0,
            Direction::Left => dx < 0.0,
            Direction::Down => dy > 0.0,
            Direction::Up => dy < 0.0,
        };
        if !survives {
            continue;
        }

        let (primary, secondary) = if dir.is_horizontal() {
            (dx.abs(), dy.abs())
        } else {
            (dy.abs(), dx.abs())
        };
        let score = primary * primary + secondary * secondary * CROSS_AXIS_PENALTY;

        if best.map_or(true, |(_, s)| score < s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::Rect;
    use crate::engine::registry::{Activation, Focusable};

    fn grid(cols: usize, count: usize) -> Vec<Focusable> {
        (0..count)
            .map(|i| {
                let col = (i % cols) as f32;
                let row = (i / cols) as f32;
                Focusable::button(
                    &format!("cell-{i}"),
                    "cell",
                    Rect::new(col * 100.0, row * 60.0, 90.0, 50.0),
                    Activation::Noop,
                )
            })
            .collect()
    }

    #[test]
    fn down_prefers_same_column_over_diagonal() {
        // 3x3 grid, focus at (row 0, col 1): DOWN must land on index 4, not 2 or 5.
        let items = grid(3, 9);
        assert_eq!(pick(&items, 1, Direction::Down), Some(4));
    }

    #[test]
    fn right_stays_in_row() {
        let items = grid(3, 9);
        assert_eq!(pick(&items, 3, Direction::Right), Some(4));
        assert_eq!(pick(&items, 4, Direction::Right), Some(5));
    }

    #[test]
    fn edge_of_grid_is_a_no_op() {
        let items = grid(3, 9);
        assert_eq!(pick(&items, 2, Direction::Right), None);
        assert_eq!(pick(&items, 0, Direction::Up), None);
        assert_eq!(pick(&items, 6, Direction::Down), None);
    }

    #[test]
    fn never_selects_current_or_wrong_sign() {
        let items = grid(3, 9);
        for i in 0..items.len() {
            for dir in [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right,
            ] {
                if let Some(win) = pick(&items, i, dir) {
                    assert_ne!(win, i);
                    let d = items[win].rect.left() - items[i].rect.left();
                    let dv = items[win].rect.top() - items[i].rect.top();
                    match dir {
                        Direction::Right => assert!(d > 0.0),
                        Direction::Left => assert!(d < 0.0),
                        Direction::Down => assert!(dv > 0.0),
                        Direction::Up => assert!(dv < 0.0),
                    }
                }
            }
        }
    }

    #[test]
    fn ragged_last_row_still_reachable() {
        // 7 items in 3 columns: last row has a single cell at col 0. DOWN
        // from (1,2) drifts to it rather than dead-ending.
        let items = grid(3, 7);
        assert_eq!(pick(&items, 5, Direction::Down), Some(6));
    }

    #[test]
    fn tie_resolves_to_first_in_list_order() {
        // Two candidates at identical offsets below the current item.
        let mk = |id: &str, x: f32, y: f32| {
            Focusable::button(id, id, Rect::new(x, y, 10.0, 10.0), Activation::Noop)
        };
        let items = vec![
            mk("cur", 50.0, 0.0),
            mk("left-twin", 40.0, 60.0),
            mk("right-twin", 60.0, 60.0),
        ];
        assert_eq!(pick(&items, 0, Direction::Down), Some(1));
    }

    #[test]
    fn out_of_range_current_falls_back_to_first() {
        let items = grid(3, 3);
        assert_eq!(pick(&items, 99, Direction::Right), Some(1));
    }

    #[test]
    fn empty_list_yields_none() {
        assert_eq!(pick(&[], 0, Direction::Down), None);
    }
}
