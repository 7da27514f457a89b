use anyhow::Result;
use log::error;

use grid_snake::clock::FixedRateClock;
use grid_snake::config::GameConfig;
use grid_snake::game::Game;
use grid_snake::term::{TermInput, TermManager};

fn main() -> Result<()> {
    env_logger::init();

    let config = GameConfig::default();
    config.validate()?;

    let mut term = TermManager::new(&config.grid())?;
    let result = term.setup().and_then(|()| play(config, term));

    // Restore the terminal whether or not the game ended cleanly
    let restored = TermManager::restore();
    finish(result, restored)
}

/// Reports the game's own error ahead of a failed terminal restore.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let Err(e) = &result {
        error!("Game aborted: {:#}", e);
    }
    if let Err(e) = &restored {
        error!("Could not restore the terminal: {:#}", e);
    }
    result.and(restored)
}

fn play(config: GameConfig, term: TermManager) -> Result<()> {
    let clock = FixedRateClock::new(config.tick_interval());
    let mut game = Game::new(config, term, TermInput, clock, rand::thread_rng())?;
    game.run()
}
