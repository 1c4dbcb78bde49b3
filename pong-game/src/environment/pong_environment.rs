use std::fmt::{Display, Formatter};

use anyhow::Result;
use rand::rngs::StdRng;

use ql::prelude::{Action, ModelActionType, QlError};

use crate::environment::pong::mechanics::{Ball, Paddle, PongMechanics, Terminal};

/// Agent visible state; used without any quantization as key into the value table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PongState {
    pub ball_x: i32,
    pub ball_y: i32,
    pub ball_vx: i32,
    pub ball_vy: i32,
    pub paddle_y: i32,
}

pub fn get_state(ball: &Ball, paddle: &Paddle) -> PongState {
    PongState {
        ball_x: ball.shape.x,
        ball_y: ball.shape.y,
        ball_vx: ball.speed_x,
        ball_vy: ball.speed_y,
        paddle_y: paddle.shape.y,
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum PaddleAction {
    Up,
    Down,
    Hold,
}

impl PaddleAction {
    /// vertical paddle move in pixels
    pub fn delta(&self) -> i32 {
        match self {
            PaddleAction::Up => -10,
            PaddleAction::Down => 10,
            PaddleAction::Hold => 0,
        }
    }
}

impl Action for PaddleAction {
    const ACTION_SPACE: ModelActionType = 3;

    fn numeric(&self) -> ModelActionType {
        match self {
            PaddleAction::Up => 0,
            PaddleAction::Down => 1,
            PaddleAction::Hold => 2,
        }
    }

    fn try_from_numeric(value: ModelActionType) -> Result<Self> {
        match value {
            0 => Ok(PaddleAction::Up),
            1 => Ok(PaddleAction::Down),
            2 => Ok(PaddleAction::Hold),
            _ => Err(QlError(format!("value {} out of range", value)).into()),
        }
    }
}

impl Display for PaddleAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub state: PongState,
    pub reward: f32,
    pub terminal: Terminal,
}

/// Reward from the learning player's point of view.
///
/// The sign convention is fixed: ball leaving on the left is -1, on the right +1.
pub fn reward(terminal: Terminal) -> f32 {
    match terminal {
        Terminal::None => 0.0,
        Terminal::LeftExit => -1.0,
        Terminal::RightExit => 1.0,
    }
}

pub struct PongEnvironment {
    mechanics: PongMechanics,
}

impl PongEnvironment {
    pub fn new(rng: StdRng) -> Self {
        Self {
            mechanics: PongMechanics::new(rng),
        }
    }

    pub fn mechanics(&self) -> &PongMechanics { &self.mechanics }

    #[cfg(test)]
    pub(crate) fn mechanics_mut(&mut self) -> &mut PongMechanics { &mut self.mechanics }

    /// what the learning player sees of the current situation
    pub fn state(&self) -> PongState { get_state(&self.mechanics.ball, &self.mechanics.player) }

    /// first half of a step: the heuristic opponent reacts on the current ball position
    pub fn move_opponent(&mut self) { self.mechanics.move_opponent() }

    /// second half of a step: player move, ball move, collisions and terminal check
    pub fn apply(&mut self, action: PaddleAction) -> StepOutcome {
        let terminal = self.mechanics.time_step(action.delta());
        StepOutcome {
            state: self.state(),
            reward: reward(terminal),
            terminal,
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use ql::prelude::Action;

    use crate::environment::pong::algebra_2d::AaBB;
    use crate::environment::pong::mechanics::{Ball, Terminal, BALL_RADIUS, BALL_SPEED};
    use crate::environment::pong_environment::*;

    fn environment() -> PongEnvironment {
        PongEnvironment::new(StdRng::seed_from_u64(1))
    }

    fn place_ball(env: &mut PongEnvironment, x: i32, y: i32, speed_x: i32, speed_y: i32) {
        env.mechanics_mut().ball = Ball {
            shape: AaBB::new(x, y, BALL_RADIUS, BALL_RADIUS),
            speed_x,
            speed_y,
        };
    }

    #[test]
    fn test_get_state() {
        let env = environment();
        let m = env.mechanics();
        let state = get_state(&m.ball, &m.player);
        assert_eq!(state.ball_x, 320);
        assert_eq!(state.ball_y, 240);
        assert_eq!(state.ball_vx.abs(), BALL_SPEED);
        assert_eq!(state.ball_vy.abs(), BALL_SPEED);
        assert_eq!(state.paddle_y, 190);
        assert_eq!(env.state(), state);
    }

    #[rstest]
    #[case(PaddleAction::Up, 0, -10)]
    #[case(PaddleAction::Down, 1, 10)]
    #[case(PaddleAction::Hold, 2, 0)]
    fn test_action_encoding(#[case] action: PaddleAction, #[case] numeric: u8, #[case] delta: i32) {
        assert_eq!(action.numeric(), numeric);
        assert_eq!(PaddleAction::try_from_numeric(numeric).unwrap(), action);
        assert_eq!(action.delta(), delta);
    }

    #[test]
    fn test_numeric_out_of_range_is_rejected() {
        assert!(PaddleAction::try_from_numeric(3).is_err());
    }

    #[test]
    fn test_reward_on_right_exit() {
        let mut env = environment();
        place_ball(&mut env, 630, 100, 4, -4);
        env.move_opponent();
        let outcome = env.apply(PaddleAction::Hold);
        assert_eq!(outcome.reward, 1.0);
        assert_eq!(outcome.terminal, Terminal::RightExit);
        assert_eq!((outcome.state.ball_x, outcome.state.ball_y), (320, 240));
        assert_eq!(outcome.state.ball_vx.abs(), 4);
        assert_eq!(outcome.state.ball_vy.abs(), 4);
    }

    #[test]
    fn test_reward_on_left_exit() {
        let mut env = environment();
        place_ball(&mut env, 2, 100, -4, 4);
        env.move_opponent();
        let outcome = env.apply(PaddleAction::Up);
        assert_eq!(outcome.reward, -1.0);
        assert_eq!(outcome.terminal, Terminal::LeftExit);
        assert_eq!((outcome.state.ball_x, outcome.state.ball_y), (320, 240));
        assert_eq!(outcome.state.paddle_y, 180);
    }

    #[test]
    fn test_no_reward_mid_field() {
        let mut env = environment();
        place_ball(&mut env, 300, 300, 4, 4);
        env.move_opponent();
        let outcome = env.apply(PaddleAction::Down);
        assert_eq!(outcome.reward, 0.0);
        assert_eq!(outcome.terminal, Terminal::None);
        assert_eq!((outcome.state.ball_x, outcome.state.ball_y, outcome.state.paddle_y), (304, 304, 200));
        assert_eq!(outcome.state, env.state());
    }

    #[test]
    fn test_rally_end_keeps_paddles_in_place() {
        let mut env = environment();
        for _ in 0..30 {
            env.move_opponent();
            env.apply(PaddleAction::Up);
        }
        let opponent_y = env.mechanics().opponent.shape.y;
        place_ball(&mut env, 2, 100, -4, 4);
        let outcome = env.apply(PaddleAction::Hold);
        assert_eq!(outcome.terminal, Terminal::LeftExit);
        assert_eq!((outcome.state.ball_x, outcome.state.ball_y), (320, 240));
        assert_eq!(outcome.state.paddle_y, 0);
        assert_eq!(env.mechanics().opponent.shape.y, opponent_y);
    }
}
