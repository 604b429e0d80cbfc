//! Terminal rendering of activation grids and weight matrices.

use colored::Colorize;
use hopfield_core::prelude::*;

/// Grid lines with high cells highlighted, each cell two columns wide.
pub fn grid_lines(grid: &GridLayout, activations: &[Activation], glyphs: Glyphs) -> Vec<String> {
    grid.render(activations, glyphs)
        .into_iter()
        .map(|line| {
            line.chars()
                .map(|c| {
                    let cell = format!("{c}{c}");
                    if c == glyphs.high {
                        cell.green().bold().to_string()
                    } else {
                        cell.dimmed().to_string()
                    }
                })
                .collect()
        })
        .collect()
}

/// Two grids side by side under a pair of captions.
pub fn side_by_side(
    grid: &GridLayout,
    left: (&str, &[Activation]),
    right: (&str, &[Activation]),
    glyphs: Glyphs,
) -> Vec<String> {
    let cell_width = grid.width * 2;
    let gap = 4;
    let mut lines = vec![format!(
        "{:<width$}{}{}",
        left.0,
        " ".repeat(gap),
        right.0,
        width = cell_width
    )];
    let l = grid_lines(grid, left.1, glyphs);
    let r = grid_lines(grid, right.1, glyphs);
    for (a, b) in l.iter().zip(r.iter()) {
        lines.push(format!("{}{}{}", a, " ".repeat(gap), b));
    }
    lines
}

/// Weight matrix as right-aligned rows.
pub fn weight_lines(network: &HopfieldNetwork) -> Vec<String> {
    network
        .weight_matrix()
        .iter()
        .map(|row| {
            row.iter()
                .map(|w| format!("{:>4}", w))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Activation vector as `[1, -1, 0]`.
pub fn vector(activations: &[Activation]) -> String {
    let items: Vec<String> = activations.iter().map(|a| a.to_string()).collect();
    format!("[{}]", items.join(", "))
}
