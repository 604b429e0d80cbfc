//! Walk through storing one pattern and recovering it from a noisy cue.

use anyhow::{Context, Result};
use colored::Colorize;
use hopfield_core::prelude::*;

use crate::config::{Config, Overrides};
use crate::render;

const MEMORY: [i8; 4] = [1, -1, 1, -1];
const CUE: [i8; 4] = [1, -1, 1, 1];

pub fn run(config: &Config, seed: Option<u64>) -> Result<()> {
    let overrides = Overrides {
        seed,
        ..Default::default()
    };
    let memory = pattern_from_ints(&MEMORY).map_err(anyhow::Error::msg)?;
    let cue = pattern_from_ints(&CUE).map_err(anyhow::Error::msg)?;

    let mut network = config.build_network(memory.len(), &overrides);

    println!("{}", "Hopfield Recall Demo".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{} Storing {}", "→".blue(), render::vector(&memory).cyan());
    network.add_pattern(&memory).context("Failed to store pattern")?;

    println!("{}", "Weights".blue().bold());
    for line in render::weight_lines(&network) {
        println!("  {}", line);
    }
    println!();

    network.set_activations(&cue).context("Failed to set cue")?;
    println!(
        "{} Cue      {}  (energy {:.1}, {} bit flipped)",
        "→".blue(),
        render::vector(&cue).yellow(),
        network.energy(),
        hamming_distance(&cue, &memory)
    );

    let report = network.recover_report().context("Recovery failed")?;
    println!(
        "{} Recalled {}  (energy {:.1})",
        "→".blue(),
        render::vector(&report.activations).green(),
        network.energy()
    );
    println!(
        "  {} sweeps, {} node updates",
        report.sweeps.to_string().cyan(),
        report.updates.to_string().cyan()
    );
    println!();

    if report.activations == memory {
        println!("{} Stored pattern recovered", "✓".green().bold());
    } else {
        println!("{} Settled on a different attractor", "•".yellow().bold());
    }

    Ok(())
}
