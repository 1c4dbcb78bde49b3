use std::hash::Hash;
use std::marker::PhantomData;

use anyhow::Result;
use rand::prelude::*;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;

use crate::prelude::{Action, ModelActionType};

pub struct Parameter {
    /// Learning rate
    pub alpha: f32,
    /// Discount factor for future rewards
    pub gamma: f32,
    /// Epsilon greedy parameter (probability of a random action)
    pub epsilon: f32,
}

impl Default for Parameter {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
        }
    }
}

/**
    Tabular Q-learning agent with an epsilon-greedy policy.

    The value table maps a state to one value per action (indexed by [Action::numeric]).
    Entries are created lazily with all values at zero, the first time a state is looked up
    by either [Self::choose_action] (greedy branch) or [Self::learn]. The table is never pruned.

    Update rule (off-policy, bootstrapped on the best next action):
    ```text
    Q(s,a) += alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))
    ```
 */
pub struct QTableAgent<S, A> {
    param: Parameter,
    q_table: FxHashMap<S, Box<[f32]>>,
    rng: StdRng,
    _action: PhantomData<A>,
}

impl<S, A> QTableAgent<S, A>
where
    S: Clone + Eq + Hash,
    A: Action,
{
    pub fn new(param: Parameter, rng: StdRng) -> Self {
        assert!((0.0..=1.0).contains(&param.epsilon));
        Self {
            param,
            q_table: FxHashMap::default(),
            rng,
            _action: PhantomData,
        }
    }

    /// Epsilon-greedy action selection.
    ///
    /// Ties between equal values are broken towards the lowest action index.
    pub fn choose_action(&mut self, state: &S) -> Result<A> {
        if self.rng.gen::<f32>() < self.param.epsilon {
            let a = self.rng.gen_range(0..A::ACTION_SPACE);
            A::try_from_numeric(a)
        } else {
            let values = self.entry(state);
            A::try_from_numeric(first_max_index(values))
        }
    }

    pub fn learn(&mut self, state: &S, action: A, reward: f32, next_state: &S) {
        let Parameter { alpha, gamma, .. } = self.param;
        // the next-state entry is created first, so `values` stays the only borrow below
        let next_max = max_value(self.entry(next_state));
        let values = self.entry(state);
        let idx = action.numeric() as usize;
        let predict = values[idx];
        let target = reward + gamma * next_max;
        values[idx] += alpha * (target - predict);
    }

    /// Learned values of `state` without creating an entry
    pub fn q_values(&self, state: &S) -> Option<&[f32]> {
        self.q_table.get(state).map(|v| v.as_ref())
    }

    /// number of states in the value table
    pub fn len(&self) -> usize { self.q_table.len() }

    pub fn is_empty(&self) -> bool { self.q_table.is_empty() }

    fn entry(&mut self, state: &S) -> &mut [f32] {
        self.q_table
            .entry(state.clone())
            .or_insert_with(|| vec![0.0; A::ACTION_SPACE as usize].into_boxed_slice())
    }
}

fn first_max_index(values: &[f32]) -> ModelActionType {
    debug_assert!(!values.is_empty());
    let mut best = 0;
    for (idx, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = idx;
        }
    }
    best as ModelActionType
}

fn max_value(values: &[f32]) -> f32 {
    let r = values.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    assert!(r.is_finite());
    r
}
