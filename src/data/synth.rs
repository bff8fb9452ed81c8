//! Synthetic stacked-plane measurements.
//!
//! Planes sit at `origin + unit · k_i` for strictly increasing integers `k_i`
//! (consecutive planes skip between 1 and `max_skip` units), each perturbed by
//! Gaussian noise. The values are shuffled so downstream code cannot rely on
//! input order. Everything is driven by a seeded `StdRng`, so a given config
//! always produces the same sample.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Hypothesis, MeasurementSet, SynthConfig};
use crate::error::AppError;

/// Generated sample plus the ground truth it was built from.
#[derive(Debug, Clone)]
pub struct SyntheticStack {
    pub set: MeasurementSet,
    /// True steps of each plane relative to the lowest one, ascending.
    pub true_steps: Hypothesis,
    pub unit: f64,
}

pub fn generate_stack(config: &SynthConfig) -> Result<SyntheticStack, AppError> {
    if !(config.unit.is_finite() && config.unit > 0.0) {
        return Err(AppError::new(2, "Synthetic unit must be finite and > 0."));
    }
    if config.planes == 0 {
        return Err(AppError::new(2, "Plane count must be > 0."));
    }
    if config.max_skip == 0 {
        return Err(AppError::new(2, "max_skip must be >= 1."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be finite and >= 0."));
    }
    if !config.origin.is_finite() {
        return Err(AppError::new(2, "Origin must be finite."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut true_steps = Vec::with_capacity(config.planes);
    let mut k: i64 = 0;
    true_steps.push(k);
    for _ in 1..config.planes {
        k += i64::from(rng.gen_range(1..=config.max_skip));
        true_steps.push(k);
    }

    let mut values: Vec<f64> = true_steps
        .iter()
        .map(|&step| config.origin + config.unit * step as f64 + normal.sample(&mut rng))
        .collect();
    values.shuffle(&mut rng);

    let label = format!("synth-u{}-n{}-s{}", config.unit, config.planes, config.seed);
    Ok(SyntheticStack {
        set: MeasurementSet::new(label, values),
        true_steps,
        unit: config.unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundPolicy, SizeBounds};
    use crate::fit::fit_with_report;

    fn config(seed: u64) -> SynthConfig {
        SynthConfig {
            unit: 330.0,
            planes: 4,
            max_skip: 1,
            noise: 2.0,
            origin: 1080.0,
            seed,
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let a = generate_stack(&config(7)).unwrap();
        let b = generate_stack(&config(7)).unwrap();
        assert_eq!(a.set, b.set);
        assert_eq!(a.true_steps, vec![0, 1, 2, 3]);
    }

    #[test]
    fn noiseless_stack_is_exact_multiples() {
        let cfg = SynthConfig {
            noise: 0.0,
            max_skip: 3,
            origin: 0.0,
            ..config(11)
        };
        let s = generate_stack(&cfg).unwrap();
        let mut v = s.set.values.clone();
        v.sort_by(f64::total_cmp);
        for (value, step) in v.iter().zip(&s.true_steps) {
            assert!((value - cfg.unit * *step as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn consecutive_stack_is_recovered() {
        let s = generate_stack(&config(3)).unwrap();
        let b = SizeBounds::new(250.0, 600.0).unwrap();
        let report = fit_with_report(&s.set.values, &b, BoundPolicy::Local).unwrap();
        assert_eq!(report.result.best_hypothesis, s.true_steps);
        assert!((report.result.best_size - s.unit).abs() < 5.0);
    }

    #[test]
    fn rejects_bad_settings() {
        assert!(generate_stack(&SynthConfig { unit: 0.0, ..config(1) }).is_err());
        assert!(generate_stack(&SynthConfig { planes: 0, ..config(1) }).is_err());
        assert!(generate_stack(&SynthConfig { noise: -1.0, ..config(1) }).is_err());
    }
}
