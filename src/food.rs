use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Picks a uniformly random cell not occupied by the snake.
///
/// Returns `None` once the snake covers the whole board. Otherwise draws
/// cells uniformly and rejects occupied ones; at least one free cell exists,
/// so the loop terminates with probability one.
#[must_use]
pub fn spawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    let width = i32::from(bounds.width);
    let height = i32::from(bounds.height);
    loop {
        let candidate = Position {
            x: rng.gen_range(0..width),
            y: rng.gen_range(0..height),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}
