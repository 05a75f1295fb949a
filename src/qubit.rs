//! Qubit Model
//!
//! A two-amplitude probabilistic bit. Amplitudes are real; normalization is
//! not enforced, so measurement guards the derived probability instead.

use crate::error::StoreError;
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;

/// Sentinel stored in `value` while the qubit is unmeasured.
pub const UNMEASURED: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qubit {
    /// Amplitude for |0>
    pub alpha: f64,
    /// Amplitude for |1>
    pub beta: f64,
    pub measured: bool,
    /// `-1` while unmeasured, otherwise the collapsed outcome (0 or 1)
    pub value: i32,
}

impl Default for Qubit {
    fn default() -> Self {
        Self::new()
    }
}

impl Qubit {
    /// Create a qubit in |0>.
    pub fn new() -> Self {
        Qubit {
            alpha: 1.0,
            beta: 0.0,
            measured: false,
            value: UNMEASURED,
        }
    }

    /// Apply the Hadamard transform.
    ///
    /// A measured qubit is returned to superposition: its collapse state is
    /// cleared before the transform is applied to the collapsed basis vector.
    pub fn hadamard(&mut self) {
        if self.measured {
            self.measured = false;
            self.value = UNMEASURED;
        }
        let (a, b) = (self.alpha, self.beta);
        self.alpha = (a + b) * FRAC_1_SQRT_2;
        self.beta = (a - b) * FRAC_1_SQRT_2;
    }

    /// Probability of observing 1.
    pub fn probability_of_one(&self) -> f64 {
        self.beta * self.beta
    }

    /// Measure the qubit, collapsing it to a basis state.
    ///
    /// Repeated measurement returns the cached outcome without resampling.
    /// Fails with `InvalidProbability` (state untouched) when `beta²` falls
    /// outside `[0, 1]`.
    pub fn measure<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<i32, StoreError> {
        if self.measured {
            return Ok(self.value);
        }

        let p = self.probability_of_one();
        if !(0.0..=1.0).contains(&p) {
            return Err(StoreError::InvalidProbability(p));
        }

        let outcome = if rng.gen_bool(p) { 1 } else { 0 };
        self.value = outcome;
        self.measured = true;
        self.alpha = if outcome == 0 { 1.0 } else { 0.0 };
        self.beta = if outcome == 1 { 1.0 } else { 0.0 };
        Ok(outcome)
    }

    /// Collapsed outcome, if measured.
    pub fn outcome(&self) -> Option<i32> {
        if self.measured {
            Some(self.value)
        } else {
            None
        }
    }
}
