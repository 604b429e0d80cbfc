//! Row-major grid layout for displaying and editing a network as an image.
//!
//! Node `i` sits at `(row, col)` with `i = row * width + col`.

use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::error::{HopfieldError, Result};

/// Glyphs used when rendering a grid as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyphs {
    pub high: char,
    pub low: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            high: '#',
            low: '.',
        }
    }
}

/// Width × height arrangement of a network's nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub width: usize,
    pub height: usize,
}

impl GridLayout {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HopfieldError::InvalidLayout { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of cells, which is the node count of a matching network.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Node index for a cell.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }

    /// Cell for a node index.
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        if index < self.len() {
            Some((index / self.width, index % self.width))
        } else {
            None
        }
    }

    /// Parse a row-major text pattern into activations.
    ///
    /// `#`, `+` and `1` are high; `.` and `-` are low; `_` and `?` are
    /// neutral. Whitespace and `/` (row separator) are skipped.
    pub fn parse_pattern(&self, text: &str) -> Result<Vec<Activation>> {
        let cells = parse_cells(text)?;
        if cells.len() != self.len() {
            return Err(HopfieldError::InvalidPattern {
                expected: self.len(),
                found: cells.len(),
            });
        }
        Ok(cells)
    }

    /// Render activations as one line of glyphs per row.
    ///
    /// Anything not high, including neutral, is drawn with the low glyph.
    pub fn render(&self, activations: &[Activation], glyphs: Glyphs) -> Vec<String> {
        activations
            .chunks(self.width)
            .take(self.height)
            .map(|row| {
                row.iter()
                    .map(|a| if a.is_high() { glyphs.high } else { glyphs.low })
                    .collect()
            })
            .collect()
    }
}

fn parse_cells(text: &str) -> Result<Vec<Activation>> {
    let mut cells = Vec::with_capacity(text.len());
    for c in text.chars().filter(|c| !c.is_whitespace() && *c != '/') {
        let activation = match c {
            '#' | '+' | '1' => Activation::High,
            '.' | '-' => Activation::Low,
            '_' | '?' => Activation::Neutral,
            glyph => {
                return Err(HopfieldError::InvalidGlyph {
                    glyph,
                    position: cells.len(),
                })
            }
        };
        cells.push(activation);
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_indexing() {
        let grid = GridLayout::new(2, 2).unwrap();
        assert_eq!(grid.position(2), Some((1, 0)));
        assert_eq!(grid.index(1, 0), Some(2));
        assert_eq!(grid.index(2, 0), None);
        assert_eq!(grid.position(4), None);
    }

    #[test]
    fn non_square_round_trip() {
        let grid = GridLayout::new(3, 2).unwrap();
        for i in 0..grid.len() {
            let (r, c) = grid.position(i).unwrap();
            assert_eq!(grid.index(r, c), Some(i));
        }
        assert_eq!(grid.position(4), Some((1, 1)));
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            GridLayout::new(0, 3).unwrap_err(),
            HopfieldError::InvalidLayout {
                width: 0,
                height: 3
            }
        );
    }

    #[test]
    fn parse_with_separators() {
        let grid = GridLayout::new(2, 2).unwrap();
        let cells = grid.parse_pattern("#. / .#").unwrap();
        use Activation::*;
        assert_eq!(cells, vec![High, Low, Low, High]);
    }

    #[test]
    fn parse_errors() {
        let grid = GridLayout::new(2, 2).unwrap();
        assert_eq!(
            grid.parse_pattern("#.#").unwrap_err(),
            HopfieldError::InvalidPattern {
                expected: 4,
                found: 3
            }
        );
        assert_eq!(
            grid.parse_pattern("#.x#").unwrap_err(),
            HopfieldError::InvalidGlyph {
                glyph: 'x',
                position: 2
            }
        );
    }

    #[test]
    fn neutral_renders_low() {
        let grid = GridLayout::new(2, 1).unwrap();
        let lines = grid.render(&[Activation::Neutral, Activation::High], Glyphs::default());
        assert_eq!(lines, vec![".#".to_string()]);
    }
}
