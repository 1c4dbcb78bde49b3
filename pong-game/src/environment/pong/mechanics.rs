use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use crate::environment::pong::algebra_2d::AaBB;

/// TOP / LEFT corner is 0/0
pub const FIELD_WIDTH: i32 = 640;
pub const FIELD_HEIGHT: i32 = 480;

pub const PADDLE_WIDTH: i32 = 10;
pub const PADDLE_HEIGHT: i32 = 100;
/// left edge of the learning player's paddle (right side of the field)
pub const PLAYER_POS_X: i32 = FIELD_WIDTH - 20;
/// left edge of the heuristic opponent's paddle (left side of the field)
pub const OPPONENT_POS_X: i32 = 10;
/// opponent paddle move per time step
pub const OPPONENT_SPEED: i32 = 5;

/// edge length of the ball's bounding box
pub const BALL_RADIUS: i32 = 7;
/// absolute ball speed per axis and time step
pub const BALL_SPEED: i32 = 4;

pub const FRAME_RATE: u32 = 60;
/// time granularity (TG)
pub const TIME_GRANULARITY: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Outcome of the boundary check at the end of a time step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    None,
    /// ball reached the left boundary (opponent side)
    LeftExit,
    /// ball reached the right boundary (player side)
    RightExit,
}

impl Terminal {
    pub fn is_terminal(&self) -> bool { *self != Terminal::None }
}

#[derive(Clone, Debug)]
pub struct PongMechanics {
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    rng: StdRng,
}

impl PongMechanics {
    pub fn new(mut rng: StdRng) -> Self {
        Self {
            player: Paddle::new(PLAYER_POS_X),
            opponent: Paddle::new(OPPONENT_POS_X),
            ball: Ball::new(&mut rng),
            rng,
        }
    }

    /// Reactive opponent: follows the ball's top edge with a fixed speed
    pub fn move_opponent(&mut self) {
        let paddle_center_y = self.opponent.shape.center_y();
        let ball_y = self.ball.shape.top();
        if paddle_center_y < ball_y {
            self.opponent.move_by(OPPONENT_SPEED);
        } else if paddle_center_y > ball_y {
            self.opponent.move_by(-OPPONENT_SPEED);
        }
    }

    /// physically move one time step forward (the opponent has already moved)
    pub fn time_step(&mut self, player_dy: i32) -> Terminal {
        self.player.move_by(player_dy);
        self.ball.proceed();
        self.resolve_paddle_collisions();
        self.check_terminal()
    }

    fn resolve_paddle_collisions(&mut self) {
        let ball = &self.ball.shape;
        if ball.intersects(&self.player.shape) || ball.intersects(&self.opponent.shape) {
            self.ball.speed_x = -self.ball.speed_x;
        }
    }

    fn check_terminal(&mut self) -> Terminal {
        if self.ball.shape.left() <= 0 {
            self.ball.reset(&mut self.rng);
            Terminal::LeftExit
        } else if self.ball.shape.right() >= FIELD_WIDTH {
            self.ball.reset(&mut self.rng);
            Terminal::RightExit
        } else {
            Terminal::None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paddle {
    pub shape: AaBB,
}

impl Paddle {
    pub fn new(pos_x: i32) -> Self {
        Self {
            shape: AaBB::new(pos_x, FIELD_HEIGHT / 2 - PADDLE_HEIGHT / 2, PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    /// move vertically, staying completely inside the field
    pub fn move_by(&mut self, dy: i32) {
        self.shape = self.shape.translate(0, dy);
        if self.shape.top() < 0 {
            self.shape.set_top(0);
        }
        if self.shape.bottom() > FIELD_HEIGHT {
            self.shape.set_bottom(FIELD_HEIGHT);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ball {
    pub shape: AaBB,
    pub speed_x: i32,
    pub speed_y: i32,
}

impl Ball {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            shape: AaBB::new(FIELD_WIDTH / 2, FIELD_HEIGHT / 2, BALL_RADIUS, BALL_RADIUS),
            speed_x: random_speed(rng),
            speed_y: random_speed(rng),
        }
    }

    /// physically move one time step forward; reflect on the top and bottom wall
    pub fn proceed(&mut self) {
        self.shape = self.shape.translate(self.speed_x, self.speed_y);
        if self.shape.top() <= 0 || self.shape.bottom() >= FIELD_HEIGHT {
            self.speed_y = -self.speed_y;
        }
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        *self = Ball::new(rng);
    }
}

fn random_speed<R: Rng>(rng: &mut R) -> i32 {
    if rng.gen::<bool>() { BALL_SPEED } else { -BALL_SPEED }
}

pub trait Assert {
    fn assert(&self);
}

impl Assert for Paddle {
    fn assert(&self) {
        assert!(self.shape.top() >= 0);
        assert!(self.shape.bottom() <= FIELD_HEIGHT);
        assert!(self.shape.left() >= 0);
        assert!(self.shape.right() <= FIELD_WIDTH);
    }
}

impl Assert for Ball {
    fn assert(&self) {
        assert_eq!(self.speed_x.abs(), BALL_SPEED);
        assert_eq!(self.speed_y.abs(), BALL_SPEED);
    }
}
