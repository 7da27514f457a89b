use std::collections::VecDeque;

use anyhow::Result;

use crate::config::SNAKE_COLOR;
use crate::geometry::{Direction, Grid, Position};
use crate::occupancy::Occupancy;
use crate::render::{Drawable, Renderer};

pub struct Snake {
    // Head at the front, tail at the back.
    body: VecDeque<Position>,
    occupied: Occupancy,
    direction: Direction,
    pending_direction: Option<Direction>,
    last_tail: Option<Position>,
}

impl Snake {
    /// A one-cell snake in the middle of the grid, heading right.
    pub fn new(grid: &Grid) -> Self {
        let mut snake = Snake {
            body: VecDeque::new(),
            occupied: Occupancy::new(),
            direction: Direction::Right,
            pending_direction: None,
            last_tail: None,
        };
        snake.reset(grid);
        snake
    }

    /// Builds a snake from explicit segments, head first. None when empty.
    pub fn from_segments(segments: &[Position], direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        let mut occupied = Occupancy::new();
        for pos in segments {
            occupied.insert(*pos);
        }

        Some(Snake {
            body: segments.iter().copied().collect(),
            occupied,
            direction,
            pending_direction: None,
            last_tail: None,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn occupied(&self) -> &Occupancy {
        &self.occupied
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// The cell vacated by the last move, if it is still empty.
    pub fn last_tail(&self) -> Option<Position> {
        self.last_tail
    }

    /// Queues a turn for the next tick. Reversals are dropped.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn apply_queued_direction(&mut self) {
        if let Some(dir) = self.pending_direction.take() {
            if !dir.is_opposite(self.direction) {
                self.direction = dir;
            }
        }
    }

    pub fn move_step(&mut self, grid: &Grid) -> Position {
        let new_head = grid.step(self.head(), self.direction);

        self.body.push_front(new_head);
        self.occupied.insert(new_head);

        // Body always holds at least the new head here
        if let Some(old_tail) = self.body.pop_back() {
            self.occupied.remove(old_tail);
            self.last_tail = Some(old_tail);
        }

        new_head
    }

    /// Re-occupies the cell vacated by the last move.
    pub fn grow(&mut self, grid: &Grid) {
        let segment = match self.last_tail.take() {
            Some(pos) => pos,
            None => {
                let tail = self.body[self.body.len() - 1];
                grid.step(tail, self.direction.opposite())
            }
        };

        self.body.push_back(segment);
        self.occupied.insert(segment);
    }

    /// True when the head shares its cell with any other segment.
    pub fn is_self_colliding(&self) -> bool {
        self.occupied.count(self.head()) > 1
    }

    pub fn reset(&mut self, grid: &Grid) {
        let center = grid.center();

        self.body.clear();
        self.body.push_back(center);
        self.occupied.clear();
        self.occupied.insert(center);
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.last_tail = None;
    }
}

impl Drawable for Snake {
    fn draw(&self, renderer: &mut dyn Renderer) -> Result<()> {
        if let Some(vacated) = self.last_tail {
            if !self.occupied.contains(vacated) {
                renderer.erase_cell(vacated)?;
            }
        }

        for pos in self.body.iter() {
            renderer.draw_cell(*pos, SNAKE_COLOR)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_initial_state() {
        let grid = Grid::new(32, 24);
        let snake = Snake::new(&grid);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), p(16, 12));
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.last_tail(), None);
    }

    #[test]
    fn test_move_shifts_body() {
        let grid = Grid::new(10, 10);
        let mut snake = Snake::from_segments(&[p(5, 5), p(4, 5), p(3, 5)], Right).unwrap();

        let head = snake.move_step(&grid);

        assert_eq!(head, p(6, 5));
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![p(6, 5), p(5, 5), p(4, 5)]);
        assert_eq!(snake.last_tail(), Some(p(3, 5)));
        assert!(!snake.occupied().contains(p(3, 5)));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_move_wraps() {
        let grid = Grid::new(32, 24);
        let mut snake = Snake::from_segments(&[p(31, 0)], Right).unwrap();
        assert_eq!(snake.move_step(&grid), p(0, 0));

        snake.queue_direction(Up);
        snake.apply_queued_direction();
        assert_eq!(snake.move_step(&grid), p(0, 23));
    }

    #[test]
    fn test_reverse_is_not_queued() {
        let grid = Grid::new(32, 24);
        let mut snake = Snake::new(&grid);

        assert!(!snake.queue_direction(Left));
        assert_eq!(snake.pending_direction(), None);

        assert!(snake.queue_direction(Up));
        assert!(!snake.queue_direction(Left));
        assert_eq!(snake.pending_direction(), Some(Up));

        snake.apply_queued_direction();
        assert_eq!(snake.direction(), Up);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_last_valid_press_wins() {
        let grid = Grid::new(32, 24);
        let mut snake = Snake::new(&grid);
        snake.queue_direction(Up);
        snake.queue_direction(Down);
        snake.apply_queued_direction();
        assert_eq!(snake.direction(), Down);
    }

    #[test]
    fn test_grow_reoccupies_vacated_cell() {
        let grid = Grid::new(10, 10);
        let mut snake = Snake::from_segments(&[p(5, 5)], Right).unwrap();
        snake.move_step(&grid);
        snake.grow(&grid);

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![p(6, 5), p(5, 5)]);
        assert_eq!(snake.last_tail(), None);
        assert!(!snake.is_self_colliding());
    }

    #[test]
    fn test_grow_before_any_move() {
        let grid = Grid::new(10, 10);
        let mut snake = Snake::new(&grid);
        snake.grow(&grid);
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![p(5, 5), p(4, 5)]);
    }

    #[test]
    fn test_self_collision() {
        let grid = Grid::new(10, 10);
        // Head at (5,5) heading up into its own body at (5,4)
        let mut snake = Snake::from_segments(
            &[p(5, 5), p(6, 5), p(6, 4), p(5, 4), p(4, 4)],
            Up,
        ).unwrap();
        snake.move_step(&grid);
        assert!(snake.is_self_colliding());
    }

    #[test]
    fn test_chasing_own_tail_is_safe() {
        let grid = Grid::new(10, 10);
        // 2x2 loop: head moves into the cell the tail vacates this tick
        let mut snake = Snake::from_segments(&[p(5, 5), p(6, 5), p(6, 4), p(5, 4)], Up).unwrap();
        snake.move_step(&grid);
        assert_eq!(snake.head(), p(5, 4));
        assert!(!snake.is_self_colliding());
    }

    #[test]
    fn test_short_snakes_never_collide() {
        let grid = Grid::new(3, 3);
        let dirs = [Up, Left, Down, Down, Right, Right, Up, Up, Left];

        let mut one = Snake::new(&grid);
        let mut two = Snake::new(&grid);
        two.move_step(&grid);
        two.grow(&grid);
        assert_eq!(two.len(), 2);

        for dir in dirs.iter() {
            for snake in [&mut one, &mut two].iter_mut() {
                snake.queue_direction(*dir);
                snake.apply_queued_direction();
                snake.move_step(&grid);
                assert!(!snake.is_self_colliding());
            }
        }
    }

    #[test]
    fn test_empty_segments_rejected() {
        assert!(Snake::from_segments(&[], Right).is_none());
    }

    #[test]
    fn test_reset() {
        let grid = Grid::new(32, 24);
        let mut snake = Snake::from_segments(&[p(1, 1), p(1, 2), p(1, 3)], Up).unwrap();
        snake.queue_direction(Left);
        snake.reset(&grid);

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), p(16, 12));
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.occupied().distinct(), 1);
    }
}
