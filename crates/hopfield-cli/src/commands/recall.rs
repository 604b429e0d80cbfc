//! Store patterns given on the command line and recover a cue.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use hopfield_core::prelude::*;
use serde::Serialize;

use crate::config::{Config, Overrides};
use crate::render;

/// Everything a recall run produces, in the shape `--json` prints.
#[derive(Debug, Clone, Serialize)]
pub struct RecallOutcome {
    pub layout: GridLayout,
    pub patterns: Vec<Vec<Activation>>,
    pub cue: Vec<Activation>,
    pub report: RecoveryReport,
    pub energy_before: f64,
    pub energy_after: f64,
    /// Index of the stored pattern the result equals, if any.
    pub matched: Option<usize>,
}

pub fn recall(
    config: &Config,
    overrides: &Overrides,
    patterns: &[String],
    cue: &str,
) -> Result<RecallOutcome> {
    if patterns.is_empty() {
        bail!("At least one --pattern is required");
    }
    let layout = config.layout(overrides)?;

    let patterns = patterns
        .iter()
        .enumerate()
        .map(|(i, text)| {
            layout
                .parse_pattern(text)
                .with_context(|| format!("Pattern {} ({:?}) does not fit the grid", i + 1, text))
        })
        .collect::<Result<Vec<_>>>()?;
    let cue = layout
        .parse_pattern(cue)
        .with_context(|| format!("Cue {:?} does not fit the grid", cue))?;

    let mut network = config.build_network(layout.len(), overrides);
    for pattern in &patterns {
        network.add_pattern(pattern)?;
    }
    network.set_activations(&cue)?;

    let energy_before = network.energy();
    let report = network
        .recover_report()
        .context("Recovery did not settle; raise --max-sweeps or pass 0 to remove the cap")?;
    let matched = patterns.iter().position(|p| *p == report.activations);

    Ok(RecallOutcome {
        layout,
        patterns,
        cue,
        energy_before,
        energy_after: network.energy(),
        report,
        matched,
    })
}

pub fn run(
    config: &Config,
    overrides: &Overrides,
    patterns: &[String],
    cue: &str,
    json: bool,
) -> Result<()> {
    let outcome = recall(config, overrides, patterns, cue)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} Stored {} pattern(s) on a {}x{} grid",
        "→".blue(),
        outcome.patterns.len().to_string().cyan(),
        outcome.layout.width,
        outcome.layout.height
    );
    println!();
    for line in render::side_by_side(
        &outcome.layout,
        ("cue", &outcome.cue),
        ("recalled", &outcome.report.activations),
        config.glyphs(),
    ) {
        println!("  {}", line);
    }
    println!();
    println!(
        "  Sweeps: {}   Updates: {}   Energy: {:.1} → {:.1}",
        outcome.report.sweeps.to_string().cyan(),
        outcome.report.updates.to_string().cyan(),
        outcome.energy_before,
        outcome.energy_after
    );

    match outcome.matched {
        Some(i) => println!(
            "{} Matches stored pattern {}",
            "✓".green().bold(),
            (i + 1).to_string().cyan()
        ),
        None => println!(
            "{} Settled on a state that is not a stored pattern",
            "•".yellow().bold()
        ),
    }

    Ok(())
}
