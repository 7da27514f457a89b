use anyhow::Result;
use log::warn;
use rand::Rng;

use crate::config::FOOD_COLOR;
use crate::geometry::{Grid, Position};
use crate::occupancy::Occupancy;
use crate::render::{Drawable, Renderer};

pub struct Food {
    position: Position,
}

impl Food {
    /// Creates food and places it on a free cell right away.
    pub fn new<R: Rng + ?Sized>(grid: &Grid, occupied: &Occupancy, rng: &mut R) -> Self {
        let mut food = Food { position: grid.center() };
        food.randomize_position(grid, occupied, rng);
        food
    }

    pub fn at(position: Position) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Draws uniformly among all cells, rejecting occupied ones. Returns false
    /// and keeps the old position when there is no free cell left.
    pub fn randomize_position<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        occupied: &Occupancy,
        rng: &mut R,
    ) -> bool {
        if occupied.distinct() >= grid.cell_count() {
            warn!("No free cell left to place food");
            return false;
        }

        loop {
            let candidate = Position::new(
                rng.gen_range(0..grid.width()),
                rng.gen_range(0..grid.height()),
            );
            if !occupied.contains(candidate) {
                self.position = candidate;
                return true;
            }
        }
    }
}

impl Drawable for Food {
    fn draw(&self, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.draw_cell(self.position, FOOD_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn occupy_all_but(grid: &Grid, free: &[Position]) -> Occupancy {
        let mut occ = Occupancy::new();
        for pos in grid.positions().filter(|p| !free.contains(p)) {
            occ.insert(pos);
        }
        occ
    }

    #[test]
    fn test_never_lands_on_snake() {
        let grid = Grid::new(32, 24);
        let mut rng = StdRng::seed_from_u64(7);
        let mut occ = Occupancy::new();
        for x in 0..32 {
            occ.insert(Position::new(x, 12));
        }

        let mut food = Food::new(&grid, &occ, &mut rng);
        for _ in 0..500 {
            assert!(food.randomize_position(&grid, &occ, &mut rng));
            assert!(!occ.contains(food.position()));
            assert!(grid.contains(food.position()));
        }
    }

    #[test]
    fn test_finds_last_free_cell() {
        let grid = Grid::new(4, 3);
        let free = Position::new(3, 2);
        let occ = occupy_all_but(&grid, &[free]);
        let mut rng = StdRng::seed_from_u64(42);

        let food = Food::new(&grid, &occ, &mut rng);
        assert_eq!(food.position(), free);
    }

    #[test]
    fn test_full_grid_keeps_position() {
        let grid = Grid::new(3, 3);
        let occ = occupy_all_but(&grid, &[]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut food = Food::at(Position::new(2, 2));

        assert!(!food.randomize_position(&grid, &occ, &mut rng));
        assert_eq!(food.position(), Position::new(2, 2));
    }
}
