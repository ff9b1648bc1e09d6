use serde::{Deserialize, Serialize};

/// Layer sizes of a network. Every genome in a run shares one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkShape {
    pub input: usize,
    pub hidden: usize,
    pub output: usize,
}

impl NetworkShape {
    /// # Panics
    ///
    /// Panics if any layer is empty.
    #[must_use]
    pub const fn new(input: usize, hidden: usize, output: usize) -> Self {
        assert!(input > 0 && hidden > 0 && output > 0, "layers must be non-empty");
        Self {
            input,
            hidden,
            output,
        }
    }

    /// Total number of weights and biases.
    #[must_use]
    pub const fn parameter_count(&self) -> usize {
        self.input * self.hidden + self.hidden + self.hidden * self.output + self.output
    }
}

/// How fresh genomes draw their initial weights.
///
/// Both schemes scale by `sqrt(2 / fan_in)`; biases always start at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitScheme {
    /// Uniform in `[-1, 1)` times `sqrt(2 / fan_in)`.
    #[default]
    HeUniform,
    /// Normal with standard deviation `sqrt(2 / fan_in)`.
    HeNormal,
}
