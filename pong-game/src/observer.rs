use num_format::ToFormattedString;

use crate::environment::pong::mechanics::Terminal;
use crate::environment::pong_environment::PaddleAction;
use crate::simulation::Score;
use crate::util::number_format;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// the learning player moved its paddle (`Hold` is not reported)
    PlayerMoved { action: PaddleAction },
    PointScored {
        terminal: Terminal,
        score: Score,
        /// number of states in the agent's value table
        known_states: usize,
    },
}

/// Hook to watch a running simulation
pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

/// Reports game events to the log
#[derive(Default)]
pub struct LogObserver;

impl GameObserver for LogObserver {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerMoved { action } => log::debug!("player moves {}", action),
            GameEvent::PointScored { terminal, score, known_states } => log::info!(
                "{:?} => player: {}, opponent: {} (known states: {})",
                terminal,
                score.player,
                score.opponent,
                known_states.to_formatted_string(&number_format())
            ),
        }
    }
}
