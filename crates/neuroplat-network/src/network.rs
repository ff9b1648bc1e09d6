use rand::Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::{InitScheme, Matrix, NetworkShape, params};

/// A deserialized or hand-assembled genome whose arrays disagree with its shape.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{layer} has {actual} parameters, shape {shape:?} expects {expected}")]
pub struct TopologyError {
    layer: &'static str,
    shape: NetworkShape,
    expected: usize,
    actual: usize,
}

/// Hidden and output activations from one forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Activations {
    /// Post-ReLU hidden layer.
    pub hidden: Vec<f32>,
    /// Post-`tanh` output layer, each value in `[-1, 1]`.
    pub output: Vec<f32>,
}

/// One genome: `input -> hidden (ReLU) -> output (tanh)`.
///
/// The weight matrices and bias vectors are owned by this value alone; [`Clone`]
/// and [`Self::crossover`] always allocate new arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkParts")]
pub struct NeuralNetwork {
    shape: NetworkShape,
    input_hidden: Matrix,
    hidden_output: Matrix,
    hidden_bias: Vec<f32>,
    output_bias: Vec<f32>,
}

#[derive(Deserialize)]
struct NetworkParts {
    shape: NetworkShape,
    input_hidden: Matrix,
    hidden_output: Matrix,
    hidden_bias: Vec<f32>,
    output_bias: Vec<f32>,
}

impl TryFrom<NetworkParts> for NeuralNetwork {
    type Error = TopologyError;

    fn try_from(parts: NetworkParts) -> Result<Self, Self::Error> {
        Self::from_parts(
            parts.shape,
            parts.input_hidden,
            parts.hidden_output,
            parts.hidden_bias,
            parts.output_bias,
        )
    }
}

#[expect(clippy::cast_precision_loss)]
fn he_scale(fan_in: usize) -> f32 {
    (2.0 / fan_in as f32).sqrt()
}

fn init_matrix<R>(rows: usize, cols: usize, init: InitScheme, rng: &mut R) -> Matrix
where
    R: Rng + ?Sized,
{
    let scale = he_scale(rows);
    match init {
        InitScheme::HeUniform => {
            Matrix::from_fn(rows, cols, |_, _| rng.random_range(-1.0..1.0) * scale)
        }
        InitScheme::HeNormal => {
            let normal = Normal::new(0.0, scale).expect("He scale is finite and positive");
            Matrix::from_fn(rows, cols, |_, _| rng.sample(normal))
        }
    }
}

impl NeuralNetwork {
    /// Creates a genome with He-uniform weights and zero biases.
    #[must_use]
    pub fn new<R>(shape: NetworkShape, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::with_init(shape, InitScheme::default(), rng)
    }

    /// Like [`Self::new`], with an explicit weight initialization scheme.
    #[must_use]
    pub fn with_init<R>(shape: NetworkShape, init: InitScheme, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            shape,
            input_hidden: init_matrix(shape.input, shape.hidden, init, rng),
            hidden_output: init_matrix(shape.hidden, shape.output, init, rng),
            hidden_bias: vec![0.0; shape.hidden],
            output_bias: vec![0.0; shape.output],
        }
    }

    /// Assembles a genome from explicit arrays, checking them against `shape`.
    pub fn from_parts(
        shape: NetworkShape,
        input_hidden: Matrix,
        hidden_output: Matrix,
        hidden_bias: Vec<f32>,
        output_bias: Vec<f32>,
    ) -> Result<Self, TopologyError> {
        let check = |layer, (rows, cols): (usize, usize), expected: (usize, usize)| {
            if (rows, cols) == expected {
                Ok(())
            } else {
                Err(TopologyError {
                    layer,
                    shape,
                    expected: expected.0 * expected.1,
                    actual: rows * cols,
                })
            }
        };
        check(
            "input-hidden weights",
            (input_hidden.rows(), input_hidden.cols()),
            (shape.input, shape.hidden),
        )?;
        check(
            "hidden-output weights",
            (hidden_output.rows(), hidden_output.cols()),
            (shape.hidden, shape.output),
        )?;
        check("hidden bias", (hidden_bias.len(), 1), (shape.hidden, 1))?;
        check("output bias", (output_bias.len(), 1), (shape.output, 1))?;
        Ok(Self {
            shape,
            input_hidden,
            hidden_output,
            hidden_bias,
            output_bias,
        })
    }

    #[must_use]
    pub fn shape(&self) -> NetworkShape {
        self.shape
    }

    #[must_use]
    pub fn input_hidden(&self) -> &Matrix {
        &self.input_hidden
    }

    #[must_use]
    pub fn hidden_output(&self) -> &Matrix {
        &self.hidden_output
    }

    #[must_use]
    pub fn hidden_bias(&self) -> &[f32] {
        &self.hidden_bias
    }

    #[must_use]
    pub fn output_bias(&self) -> &[f32] {
        &self.output_bias
    }

    /// Iterates over every weight and bias in a fixed order.
    pub fn parameters(&self) -> impl Iterator<Item = f32> + '_ {
        self.input_hidden
            .values()
            .iter()
            .chain(&self.hidden_bias)
            .chain(self.hidden_output.values())
            .chain(&self.output_bias)
            .copied()
    }

    fn parameters_mut(&mut self) -> impl Iterator<Item = &mut f32> {
        self.input_hidden
            .values_mut()
            .iter_mut()
            .chain(&mut self.hidden_bias)
            .chain(self.hidden_output.values_mut())
            .chain(&mut self.output_bias)
    }

    /// Runs a forward pass and returns both layers' activations.
    ///
    /// # Panics
    ///
    /// Panics if `input.len()` differs from the input layer size.
    #[must_use]
    pub fn activate(&self, input: &[f32]) -> Activations {
        assert_eq!(
            input.len(),
            self.shape.input,
            "input length must match the network's input layer"
        );
        let mut hidden = self.input_hidden.left_multiply(input);
        for (h, b) in hidden.iter_mut().zip(&self.hidden_bias) {
            *h = (*h + b).max(0.0);
        }
        let mut output = self.hidden_output.left_multiply(&hidden);
        for (o, b) in output.iter_mut().zip(&self.output_bias) {
            *o = (*o + b).tanh();
        }
        Activations { hidden, output }
    }

    /// Maps an input vector to output values in `[-1, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `input.len()` differs from the input layer size.
    #[must_use]
    pub fn feedforward(&self, input: &[f32]) -> Vec<f32> {
        self.activate(input).output
    }

    /// Perturbs each weight and bias with probability `rate` by Gaussian noise
    /// of standard deviation `strength`.
    pub fn mutate<R>(&mut self, rate: f32, strength: f32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        params::mutate(self.parameters_mut(), rate, strength, rng);
    }

    /// Produces a child by interpolating every parameter with a fresh uniform ratio.
    ///
    /// # Panics
    ///
    /// Panics if the parents have different shapes.
    #[must_use]
    pub fn crossover<R>(&self, other: &Self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        self.crossover_with(other, || rng.random())
    }

    /// Like [`Self::crossover`], with the per-parameter ratio taken from `ratio`.
    ///
    /// A ratio of 1 copies `self`, a ratio of 0 copies `other`.
    ///
    /// # Panics
    ///
    /// Panics if the parents have different shapes.
    #[must_use]
    pub fn crossover_with<F>(&self, other: &Self, mut ratio: F) -> Self
    where
        F: FnMut() -> f32,
    {
        assert_eq!(
            self.shape, other.shape,
            "crossover requires parents with identical topology"
        );
        let shape = self.shape;
        let blend = |a: &Matrix, b: &Matrix, ratio: &mut F| {
            let values = params::interpolate(a.values(), b.values(), &mut *ratio);
            Matrix::from_values(a.rows(), a.cols(), values).expect("blended matrix keeps its shape")
        };
        let input_hidden = blend(&self.input_hidden, &other.input_hidden, &mut ratio);
        let hidden_bias = params::interpolate(&self.hidden_bias, &other.hidden_bias, &mut ratio);
        let hidden_output = blend(&self.hidden_output, &other.hidden_output, &mut ratio);
        let output_bias = params::interpolate(&self.output_bias, &other.output_bias, &mut ratio);
        Self {
            shape,
            input_hidden,
            hidden_output,
            hidden_bias,
            output_bias,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const SHAPE: NetworkShape = NetworkShape::new(12, 7, 4);

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0x5eed)
    }

    fn small_network() -> NeuralNetwork {
        NeuralNetwork::from_parts(
            NetworkShape::new(2, 2, 1),
            Matrix::from_values(2, 2, vec![1.0, 0.5, 2.0, -1.0]).unwrap(),
            Matrix::from_values(2, 1, vec![1.0, 2.0]).unwrap(),
            vec![0.0, 0.0],
            vec![0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_new_has_zero_biases_and_scaled_weights() {
        let net = NeuralNetwork::new(SHAPE, &mut rng());
        assert!(net.hidden_bias().iter().all(|b| *b == 0.0));
        assert!(net.output_bias().iter().all(|b| *b == 0.0));
        let ih_bound = (2.0_f32 / 12.0).sqrt();
        let ho_bound = (2.0_f32 / 7.0).sqrt();
        assert!(net.input_hidden().values().iter().all(|w| w.abs() <= ih_bound));
        assert!(net.hidden_output().values().iter().all(|w| w.abs() <= ho_bound));
        assert_eq!(net.parameters().count(), SHAPE.parameter_count());
    }

    #[test]
    fn test_he_normal_init_spread() {
        let shape = NetworkShape::new(50, 200, 1);
        let net = NeuralNetwork::with_init(shape, InitScheme::HeNormal, &mut rng());
        let values = net.input_hidden().values();
        #[expect(clippy::cast_precision_loss)]
        let n = values.len() as f32;
        let variance = values.iter().map(|v| v * v).sum::<f32>() / n;
        // expected variance 2 / 50
        assert!((variance - 0.04).abs() < 0.005, "variance = {variance}");
    }

    #[test]
    fn test_feedforward_known_values() {
        let net = small_network();
        let act = net.activate(&[1.0, -1.0]);
        // pre-activation hidden = [1 - 2, 0.5 + 1] = [-1, 1.5]
        assert_eq!(act.hidden, vec![0.0, 1.5]);
        assert!((act.output[0] - 3.0_f32.tanh()).abs() < 1e-6);
    }

    #[test]
    fn test_feedforward_is_deterministic_and_bounded() {
        let net = NeuralNetwork::new(SHAPE, &mut rng());
        let input: Vec<f32> = (0..12).map(|i| (i as f32 / 6.0) - 1.0).collect();
        let first = net.feedforward(&input);
        let second = net.feedforward(&input);
        assert_eq!(first, second);
        assert!(first.iter().all(|o| (-1.0..=1.0).contains(o)));
    }

    #[test]
    #[should_panic(expected = "input length")]
    fn test_feedforward_rejects_wrong_input_length() {
        let net = NeuralNetwork::new(SHAPE, &mut rng());
        let _ = net.feedforward(&[0.0; 3]);
    }

    #[test]
    fn test_mutate_zero_rate_changes_nothing() {
        let mut rng = rng();
        let original = NeuralNetwork::new(SHAPE, &mut rng);
        let mut mutated = original.clone();
        mutated.mutate(0.0, 5.0, &mut rng);
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_mutate_full_rate_changes_effectively_everything() {
        let mut rng = rng();
        let original = NeuralNetwork::new(SHAPE, &mut rng);
        let mut changed = 0;
        let trials = 20;
        for _ in 0..trials {
            let mut mutated = original.clone();
            mutated.mutate(1.0, 0.5, &mut rng);
            changed += iter::zip(original.parameters(), mutated.parameters())
                .filter(|(a, b)| a != b)
                .count();
        }
        let total = trials * SHAPE.parameter_count();
        assert!(changed * 100 >= total * 99, "{changed} of {total} changed");
    }

    #[test]
    fn test_mutate_rate_is_respected_statistically() {
        let mut rng = rng();
        let original = NeuralNetwork::new(NetworkShape::new(40, 40, 4), &mut rng);
        let mut mutated = original.clone();
        mutated.mutate(0.25, 0.5, &mut rng);
        let changed = iter::zip(original.parameters(), mutated.parameters())
            .filter(|(a, b)| a != b)
            .count();
        #[expect(clippy::cast_precision_loss)]
        let fraction = changed as f32 / original.shape().parameter_count() as f32;
        assert!((fraction - 0.25).abs() < 0.04, "fraction = {fraction}");
    }

    #[test]
    fn test_crossover_endpoints_reproduce_parents() {
        let mut rng = rng();
        let a = NeuralNetwork::new(SHAPE, &mut rng);
        let b = NeuralNetwork::new(SHAPE, &mut rng);
        assert_eq!(a.crossover_with(&b, || 1.0), a);
        assert_eq!(a.crossover_with(&b, || 0.0), b);
    }

    #[test]
    fn test_crossover_child_lies_between_parents() {
        let mut rng = rng();
        let mut a = NeuralNetwork::new(SHAPE, &mut rng);
        let mut b = NeuralNetwork::new(SHAPE, &mut rng);
        // non-zero biases so they take part in the check too
        a.mutate(1.0, 1.0, &mut rng);
        b.mutate(1.0, 1.0, &mut rng);
        for _ in 0..10 {
            let child = a.crossover(&b, &mut rng);
            for ((x, y), c) in iter::zip(a.parameters(), b.parameters()).zip(child.parameters()) {
                let eps = 1e-6;
                assert!(c >= x.min(y) - eps && c <= x.max(y) + eps, "{c} not in [{x}, {y}]");
            }
        }
    }

    #[test]
    #[should_panic(expected = "identical topology")]
    fn test_crossover_rejects_mismatched_topology() {
        let mut rng = rng();
        let a = NeuralNetwork::new(SHAPE, &mut rng);
        let b = NeuralNetwork::new(NetworkShape::new(12, 8, 4), &mut rng);
        let _ = a.crossover(&b, &mut rng);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut rng = rng();
        let original = NeuralNetwork::new(SHAPE, &mut rng);
        let snapshot = original.parameters().collect::<Vec<_>>();
        let mut copy = original.clone();
        copy.mutate(1.0, 1.0, &mut rng);
        assert_ne!(copy, original);
        assert_eq!(original.parameters().collect::<Vec<_>>(), snapshot);
    }

    #[test]
    fn test_serde_roundtrip() {
        let net = NeuralNetwork::new(SHAPE, &mut rng());
        let json = serde_json::to_string(&net).unwrap();
        let restored: NeuralNetwork = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, net);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_shape() {
        let mut value = serde_json::to_value(small_network()).unwrap();
        value["hidden_bias"] = serde_json::json!([0.0, 0.0, 0.0]);
        let err = serde_json::from_value::<NeuralNetwork>(value).unwrap_err();
        assert!(err.to_string().contains("hidden bias"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_truncated_matrix() {
        let mut value = serde_json::to_value(small_network()).unwrap();
        value["input_hidden"]["values"] = serde_json::json!([1.0]);
        assert!(serde_json::from_value::<NeuralNetwork>(value).is_err());
    }
}
