//! Interactive grid editor: draw cells, store them, recover from a cue.
//!
//! Each line on stdin is one command. The network is rebuilt from scratch on
//! `reset` and on `resize`, exactly like changing the grid size in a drawing
//! front end.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use hopfield_core::prelude::*;
use std::io::{BufRead, Write};

use crate::config::{Config, Overrides};
use crate::render;

const HELP: &str = "\
Commands:
  toggle R C     flip the cell at row R, column C between high and low
  set I V        set node I to V (-1, 0 or 1)
  draw PATTERN   replace every cell from text (#/. per cell, / between rows)
  store          learn the current grid as a pattern
  recover        relax the grid to the nearest attractor
  clear          set every cell to neutral, keeping learned weights
  reset          forget every stored pattern
  resize W H     start over with a W x H network
  show           print the grid
  weights        print the weight matrix
  energy         print the energy of the current grid
  help           this text
  quit           leave the shell";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Toggle { row: usize, col: usize },
    Set { index: usize, value: Activation },
    Draw(String),
    Store,
    Recover,
    Clear,
    Reset,
    Resize { width: usize, height: usize },
    Show,
    Weights,
    Energy,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = parts.collect();

        let command = match (word.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("toggle" | "t", [row, col]) => ShellCommand::Toggle {
                row: parse_number(row, "row")?,
                col: parse_number(col, "column")?,
            },
            ("set", [index, value]) => {
                let raw: i8 = value
                    .parse()
                    .with_context(|| format!("Invalid activation: {}", value))?;
                ShellCommand::Set {
                    index: parse_number(index, "index")?,
                    value: Activation::try_from(raw).map_err(anyhow::Error::msg)?,
                }
            }
            ("draw" | "d", rest) if !rest.is_empty() => ShellCommand::Draw(rest.join(" ")),
            ("store" | "s", []) => ShellCommand::Store,
            ("recover" | "r", []) => ShellCommand::Recover,
            ("clear", []) => ShellCommand::Clear,
            ("reset", []) => ShellCommand::Reset,
            ("resize", [width, height]) => ShellCommand::Resize {
                width: parse_number(width, "width")?,
                height: parse_number(height, "height")?,
            },
            ("show" | "p", []) => ShellCommand::Show,
            ("weights" | "w", []) => ShellCommand::Weights,
            ("energy" | "e", []) => ShellCommand::Energy,
            ("help" | "?", []) => ShellCommand::Help,
            ("quit" | "exit" | "q", []) => ShellCommand::Quit,
            (other, _) => bail!("Unknown command or wrong arguments: {} (try help)", other),
        };
        Ok(Some(command))
    }
}

fn parse_number(text: &str, what: &str) -> Result<usize> {
    text.parse()
        .with_context(|| format!("Invalid {}: {}", what, text))
}

/// Shell state: the current grid, its network, and where output goes.
pub struct Shell<W: Write> {
    config: Config,
    overrides: Overrides,
    layout: GridLayout,
    network: HopfieldNetwork,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(config: Config, overrides: Overrides, out: W) -> Result<Self> {
        let layout = config.layout(&overrides)?;
        let network = config.build_network(layout.len(), &overrides);
        Ok(Self {
            config,
            overrides,
            layout,
            network,
            out,
        })
    }

    pub fn network(&self) -> &HopfieldNetwork {
        &self.network
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Run one command. Returns `false` when the shell should exit.
    pub fn execute(&mut self, command: ShellCommand) -> Result<bool> {
        match command {
            ShellCommand::Toggle { row, col } => {
                let Some(index) = self.layout.index(row, col) else {
                    bail!(
                        "Cell ({}, {}) is outside the {}x{} grid",
                        row,
                        col,
                        self.layout.width,
                        self.layout.height
                    );
                };
                self.network.toggle(index)?;
                self.show()?;
            }
            ShellCommand::Set { index, value } => {
                self.network.set_activation(index, value)?;
                self.show()?;
            }
            ShellCommand::Draw(text) => {
                let cells = self.layout.parse_pattern(&text)?;
                self.network.set_activations(&cells)?;
                self.show()?;
            }
            ShellCommand::Store => {
                self.network.add_activations_pattern()?;
                writeln!(
                    self.out,
                    "{} Stored pattern {}",
                    "✓".green(),
                    self.network.pattern_count()
                )?;
            }
            ShellCommand::Recover => {
                let report = self.network.recover_report()?;
                self.show()?;
                writeln!(
                    self.out,
                    "{} Settled after {} sweeps ({} updates)",
                    "✓".green(),
                    report.sweeps,
                    report.updates
                )?;
            }
            ShellCommand::Clear => {
                self.network.clear();
                self.show()?;
            }
            ShellCommand::Reset => {
                self.network.initialise_nodes();
                writeln!(self.out, "{} Network reset", "✓".green())?;
                self.show()?;
            }
            ShellCommand::Resize { width, height } => {
                let layout = GridLayout::new(width, height)?;
                self.layout = layout;
                self.network = self.config.build_network(layout.len(), &self.overrides);
                writeln!(
                    self.out,
                    "{} New {}x{} network ({} nodes)",
                    "✓".green(),
                    width,
                    height,
                    layout.len()
                )?;
                self.show()?;
            }
            ShellCommand::Show => self.show()?,
            ShellCommand::Weights => {
                for line in render::weight_lines(&self.network) {
                    writeln!(self.out, "{}", line)?;
                }
            }
            ShellCommand::Energy => {
                writeln!(self.out, "Energy: {:.2}", self.network.energy())?;
            }
            ShellCommand::Help => writeln!(self.out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn show(&mut self) -> Result<()> {
        let activations = self.network.activations();
        for line in render::grid_lines(&self.layout, &activations, self.config.glyphs()) {
            writeln!(self.out, "  {}", line)?;
        }
        Ok(())
    }

    /// Read commands until end of input or `quit`.
    pub fn run_lines<R: BufRead>(&mut self, input: R, prompt: bool) -> Result<()> {
        if prompt {
            self.write_prompt()?;
        }
        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            let keep_going = match ShellCommand::parse(&line) {
                Ok(Some(command)) => match self.execute(command) {
                    Ok(keep_going) => keep_going,
                    Err(e) => {
                        writeln!(self.out, "{} {:#}", "✗".red(), e)?;
                        true
                    }
                },
                Ok(None) => true,
                Err(e) => {
                    writeln!(self.out, "{} {:#}", "✗".red(), e)?;
                    true
                }
            };
            if !keep_going {
                break;
            }
            if prompt {
                self.write_prompt()?;
            }
        }
        Ok(())
    }

    fn write_prompt(&mut self) -> Result<()> {
        write!(self.out, "{} ", "hopfield>".blue())?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn run(config: &Config, overrides: &Overrides) -> Result<()> {
    let stdout = std::io::stdout();
    let mut shell = Shell::new(config.clone(), *overrides, stdout.lock())?;
    let layout = shell.layout();
    println!(
        "{} {}x{} grid, {} nodes. Type {} for commands.",
        "→".blue(),
        layout.width,
        layout.height,
        layout.len(),
        "help".cyan()
    );
    let stdin = std::io::stdin();
    shell.run_lines(stdin.lock(), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(width: usize, height: usize) -> Shell<Vec<u8>> {
        colored::control::set_override(false);
        let overrides = Overrides {
            width: Some(width),
            height: Some(height),
            seed: Some(3),
            max_sweeps: None,
        };
        Shell::new(Config::default(), overrides, Vec::new()).unwrap()
    }

    fn output(shell: &Shell<Vec<u8>>) -> String {
        String::from_utf8_lossy(&shell.out).to_string()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            ShellCommand::parse("toggle 1 2").unwrap(),
            Some(ShellCommand::Toggle { row: 1, col: 2 })
        );
        assert_eq!(
            ShellCommand::parse("set 3 -1").unwrap(),
            Some(ShellCommand::Set {
                index: 3,
                value: Activation::Low
            })
        );
        assert_eq!(
            ShellCommand::parse("draw #. / .#").unwrap(),
            Some(ShellCommand::Draw("#. / .#".to_string()))
        );
        assert_eq!(ShellCommand::parse("   ").unwrap(), None);
        assert!(ShellCommand::parse("set 3 5").is_err());
        assert!(ShellCommand::parse("toggle 1").is_err());
        assert!(ShellCommand::parse("fly").is_err());
    }

    #[test]
    fn toggle_uses_row_major_index() {
        let mut sh = shell(2, 2);
        sh.execute(ShellCommand::Toggle { row: 1, col: 0 }).unwrap();
        assert_eq!(sh.network().node(2).unwrap().activation(), Activation::High);
        assert!(sh.execute(ShellCommand::Toggle { row: 2, col: 0 }).is_err());
    }

    #[test]
    fn draw_store_and_recover() {
        let mut sh = shell(4, 1);
        let script = "draw #.#.\nstore\ndraw #.##\nrecover\nquit\nshow\n";
        sh.run_lines(script.as_bytes(), false).unwrap();

        assert_eq!(sh.network().pattern_count(), 1);
        assert_eq!(
            sh.network().activations(),
            pattern_from_ints(&[1, -1, 1, -1]).unwrap()
        );
        let out = output(&sh);
        assert!(out.contains("Stored pattern 1"));
        assert!(out.contains("Settled after 2 sweeps (1 updates)"));
    }

    #[test]
    fn resize_replaces_network() {
        let mut sh = shell(2, 2);
        sh.execute(ShellCommand::Draw("#./.#".to_string())).unwrap();
        sh.execute(ShellCommand::Store).unwrap();
        sh.execute(ShellCommand::Resize { width: 3, height: 2 })
            .unwrap();

        assert_eq!(sh.network().node_count(), 6);
        assert_eq!(sh.network().pattern_count(), 0);
        assert_eq!(sh.layout(), GridLayout::new(3, 2).unwrap());
    }

    #[test]
    fn clear_keeps_weights_reset_drops_them() {
        let mut sh = shell(2, 1);
        sh.execute(ShellCommand::Draw("#.".to_string())).unwrap();
        sh.execute(ShellCommand::Store).unwrap();

        sh.execute(ShellCommand::Clear).unwrap();
        assert_eq!(sh.network().activations(), vec![Activation::Neutral; 2]);
        assert_eq!(sh.network().weight(0, 1), Some(-1.0));

        sh.execute(ShellCommand::Reset).unwrap();
        assert_eq!(sh.network().weight(0, 1), Some(0.0));
    }

    #[test]
    fn errors_are_reported_and_shell_continues() {
        let mut sh = shell(2, 1);
        sh.run_lines("draw ###\nset 0 1\n".as_bytes(), false)
            .unwrap();
        let out = output(&sh);
        assert!(out.contains("✗"));
        assert_eq!(sh.network().node(0).unwrap().activation(), Activation::High);
    }
}
