use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::StoreError;

/// Dense `states x actions` matrix of value estimates, row-major by state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    states: usize,
    actions: usize,
    values: Vec<f32>,
}

impl ValueTable {
    pub fn zeros(states: usize) -> Self {
        Self {
            states,
            actions: Action::COUNT,
            values: vec![0.0; states * Action::COUNT],
        }
    }

    pub fn states(&self) -> usize {self.states}
    pub fn actions(&self) -> usize {self.actions}

    pub fn get(&self, state: usize, action: Action) -> f32 {
        self.values[state * self.actions + action.index()]
    }

    pub fn set(&mut self, state: usize, action: Action, value: f32) {
        self.values[state * self.actions + action.index()] = value;
    }

    pub fn row(&self, state: usize) -> &[f32] {
        &self.values[state * self.actions..(state + 1) * self.actions]
    }

    pub fn max(&self, state: usize) -> f32 {
        self.row(state).iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b))
    }

    /// Index of the highest estimate; the lowest index wins ties.
    pub fn argmax(&self, state: usize) -> usize {
        let mut best = 0;
        for (i, value) in self.row(state).iter().enumerate().skip(1) {
            if *value > self.row(state)[best] {
                best = i;
            }
        }
        best
    }

    /// Rejects anything that is not exactly `states x Action::COUNT`,
    /// including a value buffer of the wrong length.
    pub fn check_shape(&self, states: usize) -> Result<(), StoreError> {
        if self.states != states || self.actions != Action::COUNT || self.values.len() != states * Action::COUNT {
            return Err(StoreError::Shape {
                expected_states: states,
                expected_actions: Action::COUNT,
                found_states: self.states,
                found_actions: self.actions,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_shape() {
        let table = ValueTable::zeros(12);
        assert_eq!(table.states(), 12);
        assert_eq!(table.actions(), 5);
        assert!(table.check_shape(12).is_ok());
        assert!(table.check_shape(13).is_err());
        assert_eq!(table.row(11), &[0.0; 5]);
    }

    #[test]
    fn test_argmax_prefers_lowest_index_on_tie() {
        let mut table = ValueTable::zeros(2);
        assert_eq!(table.argmax(0), 0);

        table.set(0, Action::Left, 3.0);
        table.set(0, Action::PlaceBomb, 3.0);
        assert_eq!(table.argmax(0), Action::Left.index());

        table.set(1, Action::Up, -2.0);
        table.set(1, Action::Down, -1.0);
        table.set(1, Action::Left, -1.0);
        table.set(1, Action::Right, -1.0);
        table.set(1, Action::PlaceBomb, -1.0);
        assert_eq!(table.argmax(1), Action::Down.index());
        assert_eq!(table.max(1), -1.0);
    }

    #[test]
    fn test_check_shape_rejects_truncated_values() {
        let mut table = ValueTable::zeros(4);
        table.values.pop();
        assert!(matches!(table.check_shape(4), Err(StoreError::Shape { .. })));
    }
}
