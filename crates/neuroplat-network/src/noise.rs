use std::f32::consts::TAU;

use rand::{Rng, distr::Distribution};

/// Standard normal samples from the Box–Muller transform of two uniform draws.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxMuller;

impl Distribution<f32> for BoxMuller {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let u = open_unit(rng);
        let v = open_unit(rng);
        (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
    }
}

/// Uniform in `(0, 1)`; zero would send `ln` to infinity.
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    loop {
        let u: f32 = rng.random();
        if u > 0.0 {
            return u;
        }
    }
}
