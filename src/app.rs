use std::ops::ControlFlow;
use std::time::Duration;

use crate::config::Theme;
use crate::game::GameState;
use crate::input::GameInput;
use crate::score::HighScore;
use crate::timing::TickAccumulator;
use crate::ui::hud::HudInfo;

/// One play session: the game, its tick clock and the highscore store.
///
/// The binary feeds it inputs and frame times; rendering reads `state`.
#[derive(Debug)]
pub struct App {
    pub state: GameState,
    high_score: HighScore,
    clock: TickAccumulator,
    /// Best score before the current game started.
    previous_high_score: u32,
}

impl App {
    #[must_use]
    pub fn new(state: GameState, high_score: HighScore) -> Self {
        let previous_high_score = high_score.best();

        Self {
            state,
            high_score,
            clock: TickAccumulator::new(),
            previous_high_score,
        }
    }

    /// Applies one input. Breaks when the player asked to quit.
    pub fn handle_input(&mut self, input: GameInput) -> ControlFlow<()> {
        match input {
            GameInput::Quit => return ControlFlow::Break(()),
            GameInput::Restart if self.state.is_game_over() => {
                self.state.reset();
                self.clock.clear();
                self.previous_high_score = self.high_score.best();
            }
            GameInput::Restart => {}
            GameInput::Direction(direction) => self.state.set_direction(direction),
        }

        ControlFlow::Continue(())
    }

    /// Adds one frame's elapsed time and runs at most one tick when due.
    /// The highscore is recorded on the tick that ends the game.
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock.accumulate(elapsed);

        if self.state.is_game_over() || !self.clock.consume(self.state.move_delay()) {
            return;
        }

        self.state.tick();
        if self.state.is_game_over() {
            self.high_score.record(self.state.score);
        }
    }

    /// Best score so far, counting a record that is still being set.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score.best().max(self.state.score)
    }

    #[must_use]
    pub fn clock(&self) -> &TickAccumulator {
        &self.clock
    }

    #[must_use]
    pub fn hud_info<'a>(&self, theme: &'a Theme) -> HudInfo<'a> {
        HudInfo {
            high_score: self.high_score(),
            previous_high_score: self.previous_high_score,
            theme,
        }
    }
}
