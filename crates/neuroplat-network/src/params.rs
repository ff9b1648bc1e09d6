//! Parameter-vector operations shared by the genetic operators.
//!
//! These work on flat sequences of parameters so the network can apply them to
//! each weight matrix and bias vector alike.

use std::iter;

use rand::Rng;

use crate::BoxMuller;

/// Adds Gaussian noise to each parameter independently with probability `rate`.
///
/// The noise has mean 0 and standard deviation `strength`. `rate` is clamped to
/// `[0, 1]`; a rate of 0 (or NaN) leaves every parameter untouched.
pub fn mutate<'a, I, R>(params: I, rate: f32, strength: f32, rng: &mut R)
where
    I: IntoIterator<Item = &'a mut f32>,
    R: Rng + ?Sized,
{
    let probability = if rate > 0.0 {
        f64::from(rate.min(1.0))
    } else {
        0.0
    };
    for p in params {
        if rng.random_bool(probability) {
            *p += strength * rng.sample(BoxMuller);
        }
    }
}

/// Blends two parameter vectors element by element.
///
/// For each position a fresh ratio `r` is taken from `ratio` and the child gets
/// `a * r + b * (1 - r)`.
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn interpolate<F>(a: &[f32], b: &[f32], mut ratio: F) -> Vec<f32>
where
    F: FnMut() -> f32,
{
    assert_eq!(a.len(), b.len(), "parents must have the same length");
    iter::zip(a, b)
        .map(|(a, b)| {
            let r = ratio();
            a * r + b * (1.0 - r)
        })
        .collect()
}
