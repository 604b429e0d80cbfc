//! Recall rate as the number of stored random patterns grows.
//!
//! For each pattern count `k`, every trial builds a fresh network, stores `k`
//! random ±1 patterns, corrupts the first one by flipping a fraction of its
//! bits, and checks whether recovery lands exactly back on it. Classical
//! analysis puts the breakdown near `0.138 * N` patterns.

use anyhow::{bail, Result};
use colored::Colorize;
use hopfield_core::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::{Config, Overrides};

/// Experiment parameters.
#[derive(Debug, Clone, Copy)]
pub struct CapacityParams {
    pub nodes: usize,
    pub max_patterns: usize,
    pub trials: usize,
    /// Fraction of bits flipped in the cue, 0.0-0.5.
    pub noise: f64,
}

/// Results for one pattern count.
#[derive(Debug, Clone, Serialize)]
pub struct CapacityRow {
    pub patterns: usize,
    pub recalled: usize,
    pub trials: usize,
    pub recall_rate: f64,
    pub mean_sweeps: f64,
    /// Trials that hit the sweep cap.
    pub unsettled: usize,
}

fn random_pattern<R: Rng>(rng: &mut R, n: usize) -> Vec<Activation> {
    (0..n)
        .map(|_| {
            if rng.gen_bool(0.5) {
                Activation::High
            } else {
                Activation::Low
            }
        })
        .collect()
}

fn corrupt<R: Rng>(rng: &mut R, pattern: &[Activation], flips: usize) -> Vec<Activation> {
    let mut cue = pattern.to_vec();
    for i in sample(rng, pattern.len(), flips.min(pattern.len())) {
        cue[i] = cue[i].toggled();
    }
    cue
}

/// Run the sweep over pattern counts, calling `on_trial` after each trial.
pub fn run_experiment(
    config: &Config,
    overrides: &Overrides,
    params: CapacityParams,
    mut on_trial: impl FnMut(),
) -> Result<Vec<CapacityRow>> {
    if params.nodes < 2 {
        bail!("Need at least 2 nodes, got {}", params.nodes);
    }
    if !(0.0..=0.5).contains(&params.noise) {
        bail!("Noise must be between 0.0 and 0.5, got {}", params.noise);
    }

    let seed = config.seed(overrides).unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let flips = (params.noise * params.nodes as f64).round() as usize;
    let recovery = config.recovery(overrides);
    tracing::debug!(seed, flips, "Starting capacity experiment");

    let mut rows = Vec::with_capacity(params.max_patterns);
    for k in 1..=params.max_patterns {
        let mut recalled = 0;
        let mut unsettled = 0;
        let mut sweeps = 0;

        for _ in 0..params.trials {
            let mut network =
                HopfieldNetwork::with_seed(params.nodes, rng.gen()).with_recovery(recovery);
            network.initialise_nodes();

            let stored: Vec<Vec<Activation>> =
                (0..k).map(|_| random_pattern(&mut rng, params.nodes)).collect();
            for pattern in &stored {
                network.add_pattern(pattern)?;
            }
            network.set_activations(&corrupt(&mut rng, &stored[0], flips))?;

            match network.recover_report() {
                Ok(report) => {
                    sweeps += report.sweeps;
                    if report.activations == stored[0] {
                        recalled += 1;
                    }
                }
                Err(HopfieldError::NotConverged { .. }) => unsettled += 1,
                Err(e) => return Err(e.into()),
            }
            on_trial();
        }

        let settled = params.trials - unsettled;
        rows.push(CapacityRow {
            patterns: k,
            recalled,
            trials: params.trials,
            recall_rate: ratio(recalled, params.trials),
            mean_sweeps: ratio(sweeps, settled),
            unsettled,
        });
    }
    Ok(rows)
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub fn run(
    config: &Config,
    overrides: &Overrides,
    params: CapacityParams,
    json: bool,
) -> Result<()> {
    let total = (params.max_patterns * params.trials) as u64;
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} trials")?
            .progress_chars("#>-"),
    );

    let rows = run_experiment(config, overrides, params, || pb.inc(1))?;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", "Hopfield Capacity".white().bold());
    println!("{}", "═".repeat(48).dimmed());
    println!(
        "  Nodes: {}   Trials: {}   Noise: {:.0}%   Expected limit: ~{:.1} patterns",
        params.nodes.to_string().cyan(),
        params.trials.to_string().cyan(),
        params.noise * 100.0,
        0.138 * params.nodes as f64
    );
    println!();
    println!("  {:>8}  {:>8}  {:>8}  {:>8}", "patterns", "recall", "sweeps", "unsettled");
    for row in &rows {
        let rate = format!("{:>7.1}%", row.recall_rate * 100.0);
        let rate = if row.recall_rate >= 0.9 {
            rate.green()
        } else if row.recall_rate >= 0.5 {
            rate.yellow()
        } else {
            rate.red()
        };
        println!(
            "  {:>8}  {}  {:>8.2}  {:>8}",
            row.patterns, rate, row.mean_sweeps, row.unsettled
        );
    }
    println!("{}", "═".repeat(48).dimmed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Overrides {
        Overrides {
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn one_pattern_always_recalled() {
        let params = CapacityParams {
            nodes: 32,
            max_patterns: 1,
            trials: 20,
            noise: 0.1,
        };
        let mut calls = 0;
        let rows = run_experiment(&Config::default(), &seeded(), params, || calls += 1).unwrap();
        assert_eq!(calls, 20);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].recalled, 20);
        assert_eq!(rows[0].recall_rate, 1.0);
    }

    #[test]
    fn seeded_runs_match() {
        let params = CapacityParams {
            nodes: 16,
            max_patterns: 4,
            trials: 5,
            noise: 0.2,
        };
        let a = run_experiment(&Config::default(), &seeded(), params, || {}).unwrap();
        let b = run_experiment(&Config::default(), &seeded(), params, || {}).unwrap();
        let rates = |rows: &[CapacityRow]| rows.iter().map(|r| r.recalled).collect::<Vec<_>>();
        assert_eq!(rates(&a), rates(&b));
    }

    #[test]
    fn corrupt_flips_exact_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let p = random_pattern(&mut rng, 20);
        let cue = corrupt(&mut rng, &p, 5);
        assert_eq!(hamming_distance(&p, &cue), 5);
    }

    #[test]
    fn rejects_bad_parameters() {
        let params = CapacityParams {
            nodes: 10,
            max_patterns: 1,
            trials: 1,
            noise: 0.9,
        };
        assert!(run_experiment(&Config::default(), &seeded(), params, || {}).is_err());
    }
}
