use anyhow::{ensure, Result};
use log::{debug, info};
use rand::Rng;

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::food::Food;
use crate::geometry::Grid;
use crate::input::{InputEvent, InputSource};
use crate::render::{Drawable, Renderer};
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Owns the snake and the food and drives them with the injected
/// renderer, input source, clock and random source.
pub struct Game<R, I, C, G> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Food,
    renderer: R,
    input: I,
    clock: C,
    rng: G,
}

impl<R, I, C, G> Game<R, I, C, G>
where
    R: Renderer,
    I: InputSource,
    C: Clock,
    G: Rng,
{
    pub fn new(config: GameConfig, renderer: R, input: I, clock: C, mut rng: G) -> Result<Self> {
        config.validate()?;

        let grid = config.grid();
        let snake = Snake::new(&grid);
        let food = Food::new(&grid, snake.occupied(), &mut rng);

        Ok(Game { config, grid, snake, food, renderer, input, clock, rng })
    }

    /// Swaps in another snake. Food it would cover is placed again.
    pub fn with_snake(mut self, snake: Snake) -> Self {
        self.snake = snake;
        if self.snake.occupied().contains(self.food.position()) {
            self.food.randomize_position(&self.grid, self.snake.occupied(), &mut self.rng);
        }
        self
    }

    pub fn with_food(mut self, food: Food) -> Result<Self> {
        let pos = food.position();
        ensure!(self.grid.contains(pos), "food at {:?} is off the grid", pos);
        ensure!(!self.snake.occupied().contains(pos), "food at {:?} is under the snake", pos);
        self.food = food;
        Ok(self)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Runs ticks at the configured rate until the player quits.
    pub fn run(&mut self) -> Result<()> {
        info!(
            "Starting on a {}x{} grid at {} ticks per second",
            self.grid.width(),
            self.grid.height(),
            self.config.ticks_per_second
        );

        self.renderer.clear()?;
        self.renderer.present()?;

        loop {
            self.clock.wait_for_tick();

            if self.tick()? == TickOutcome::Quit {
                info!("Quit requested at length {}", self.snake.len());
                return Ok(());
            }
        }
    }

    /// One game step: move, read input, turn, draw, eat, check for a crash.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.snake.move_step(&self.grid);

        for event in self.input.poll_events()? {
            match event {
                InputEvent::Quit => return Ok(TickOutcome::Quit),
                InputEvent::DirectionPressed(dir) => {
                    if !self.snake.queue_direction(dir) {
                        debug!("Ignoring reversal to {:?}", dir);
                    }
                }
            }
        }

        self.snake.apply_queued_direction();

        self.food.draw(&mut self.renderer)?;
        self.snake.draw(&mut self.renderer)?;

        if self.snake.head() == self.food.position() {
            self.snake.grow(&self.grid);
            self.food.randomize_position(&self.grid, self.snake.occupied(), &mut self.rng);
            debug!(
                "Ate food, length {}, next food at {:?}",
                self.snake.len(),
                self.food.position()
            );
        }

        if self.snake.is_self_colliding() {
            info!("Snake bit itself at length {}, resetting", self.snake.len());
            self.snake.reset(&self.grid);
            self.renderer.clear()?;

            if self.snake.occupied().contains(self.food.position()) {
                self.food.randomize_position(&self.grid, self.snake.occupied(), &mut self.rng);
            }
        }

        self.renderer.present()?;
        Ok(TickOutcome::Continue)
    }
}
