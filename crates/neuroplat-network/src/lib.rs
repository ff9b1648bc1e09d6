//! Fixed-topology feedforward network used as a genome.
//!
//! Every candidate controller is a [`NeuralNetwork`] with one ReLU hidden layer
//! and a `tanh` output layer. The network is both the phenotype (it maps a
//! sensory frame to action outputs via [`NeuralNetwork::feedforward`]) and the
//! genome (its weights and biases are what the genetic algorithm evolves).
//!
//! # Genetic Operators
//!
//! - [`NeuralNetwork::mutate`] - per-parameter Gaussian perturbation with probability `rate`
//! - [`NeuralNetwork::crossover`] - per-parameter interpolation between two parents
//! - [`Clone`] - deep copy; offspring never alias a parent's arrays
//!
//! All operators are generic over `R: Rng + ?Sized` so callers decide where the
//! randomness comes from (seeded for tests, OS-seeded for training runs).
//!
//! # Example
//!
//! ```
//! use neuroplat_network::{NetworkShape, NeuralNetwork};
//!
//! let mut rng = rand::rng();
//! let shape = NetworkShape::new(6, 8, 4);
//! let parent_a = NeuralNetwork::new(shape, &mut rng);
//! let parent_b = NeuralNetwork::new(shape, &mut rng);
//!
//! let mut child = parent_a.crossover(&parent_b, &mut rng);
//! child.mutate(0.1, 0.5, &mut rng);
//!
//! let outputs = child.feedforward(&[0.0; 6]);
//! assert_eq!(outputs.len(), 4);
//! assert!(outputs.iter().all(|o| (-1.0..=1.0).contains(o)));
//! ```

pub use self::{matrix::*, network::*, noise::*, shape::*};

mod matrix;
mod network;
mod noise;
pub mod params;
mod shape;
