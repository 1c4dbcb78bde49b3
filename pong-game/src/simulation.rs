use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ql::q_table::{Parameter, QTableAgent};

use crate::environment::pong::mechanics::Terminal;
use crate::environment::pong_environment::{PaddleAction, PongEnvironment, PongState};
use crate::observer::{GameEvent, GameObserver};

pub type PongAgent = QTableAgent<PongState, PaddleAction>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    /// counts a point; the player is credited for a left exit, the opponent for a right exit
    pub fn count(&mut self, terminal: Terminal) {
        match terminal {
            Terminal::None => (),
            Terminal::LeftExit => self.player += 1,
            Terminal::RightExit => self.opponent += 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub state: PongState,
    pub action: PaddleAction,
    pub reward: f32,
    pub next_state: PongState,
    pub terminal: Terminal,
}

/// The game context: everything one running game owns.
///
/// Only [Simulation::tick] mutates it.
pub struct Simulation {
    environment: PongEnvironment,
    agent: PongAgent,
    score: Score,
    state: PongState,
    observer: Option<Box<dyn GameObserver>>,
}

impl Simulation {
    /// Environment and agent get their own random generators, both derived from `seed`
    pub fn new(seed: u64, param: Parameter) -> Self {
        let mut seeder = StdRng::seed_from_u64(seed);
        let environment = PongEnvironment::new(StdRng::seed_from_u64(seeder.gen()));
        let agent = QTableAgent::new(param, StdRng::seed_from_u64(seeder.gen()));
        let state = environment.state();
        Self {
            environment,
            agent,
            score: Score::default(),
            state,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// One learning step: opponent move, action selection on the current state, player & ball move,
    /// reward, value update and state advance.
    pub fn tick(&mut self) -> Result<TickReport> {
        self.environment.move_opponent();
        let action = self.agent.choose_action(&self.state)?;
        let outcome = self.environment.apply(action);
        self.score.count(outcome.terminal);

        self.agent.learn(&self.state, action, outcome.reward, &outcome.state);

        let report = TickReport {
            state: self.state,
            action,
            reward: outcome.reward,
            next_state: outcome.state,
            terminal: outcome.terminal,
        };
        self.state = outcome.state;
        self.report(&report);
        Ok(report)
    }

    fn report(&mut self, report: &TickReport) {
        let Some(observer) = self.observer.as_mut() else { return };
        if report.action != PaddleAction::Hold {
            observer.notify(&GameEvent::PlayerMoved { action: report.action });
        }
        if report.terminal.is_terminal() {
            observer.notify(&GameEvent::PointScored {
                terminal: report.terminal,
                score: self.score,
                known_states: self.agent.len(),
            });
        }
    }

    pub fn environment(&self) -> &PongEnvironment { &self.environment }

    pub fn agent(&self) -> &PongAgent { &self.agent }

    pub fn score(&self) -> Score { self.score }

    pub fn state(&self) -> PongState { self.state }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ql::q_table::Parameter;

    use crate::environment::pong::mechanics::Terminal;
    use crate::environment::pong_environment::PaddleAction;
    use crate::observer::{GameEvent, GameObserver};
    use crate::simulation::{Score, Simulation};

    struct Recorder(Rc<RefCell<Vec<GameEvent>>>);

    impl GameObserver for Recorder {
        fn notify(&mut self, event: &GameEvent) {
            self.0.borrow_mut().push(*event)
        }
    }

    #[test]
    fn test_score_mapping() {
        let mut score = Score::default();
        score.count(Terminal::None);
        assert_eq!(score, Score { player: 0, opponent: 0 });
        score.count(Terminal::LeftExit);
        assert_eq!(score, Score { player: 1, opponent: 0 });
        score.count(Terminal::RightExit);
        score.count(Terminal::RightExit);
        assert_eq!(score, Score { player: 1, opponent: 2 });
    }

    #[test]
    fn test_tick_chains_states() {
        let mut sim = Simulation::new(9, Parameter::default());
        assert_eq!(sim.state(), sim.environment().state());
        for _ in 0..500 {
            let before = sim.state();
            let report = sim.tick().unwrap();
            assert_eq!(report.state, before);
            assert_eq!(report.next_state, sim.state());
            assert_eq!(sim.state(), sim.environment().state());
            // the pre-step state always has a table entry after learning
            assert!(sim.agent().q_values(&report.state).is_some());
            assert!(sim.agent().q_values(&report.next_state).is_some());
        }
    }

    #[test]
    fn test_scores_follow_terminal_events() {
        let mut sim = Simulation::new(4, Parameter::default());
        let mut expected = Score::default();
        for _ in 0..20_000 {
            let report = sim.tick().unwrap();
            expected.count(report.terminal);
            match report.terminal {
                Terminal::None => assert_eq!(report.reward, 0.0),
                Terminal::LeftExit => assert_eq!(report.reward, -1.0),
                Terminal::RightExit => assert_eq!(report.reward, 1.0),
            }
        }
        assert_eq!(sim.score(), expected);
        assert!(expected.player + expected.opponent > 0);
    }

    #[test]
    fn test_observer_receives_events() {
        let events = Rc::new(RefCell::new(vec![]));
        let mut sim = Simulation::new(2, Parameter::default())
            .with_observer(Box::new(Recorder(Rc::clone(&events))));

        let mut moves = 0;
        let mut points = 0;
        for _ in 0..5_000 {
            let report = sim.tick().unwrap();
            if report.action != PaddleAction::Hold {
                moves += 1;
            }
            if report.terminal.is_terminal() {
                points += 1;
            }
        }

        let events = events.borrow();
        let seen_moves = events.iter().filter(|e| matches!(e, GameEvent::PlayerMoved { .. })).count();
        let seen_points = events.iter().filter(|e| matches!(e, GameEvent::PointScored { .. })).count();
        assert_eq!(seen_moves, moves);
        assert_eq!(seen_points, points);
        if let Some(GameEvent::PointScored { score, .. }) = events.iter().rev().find(|e| matches!(e, GameEvent::PointScored { .. })) {
            assert_eq!(*score, sim.score());
        }
    }
}
