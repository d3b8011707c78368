use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::Nonterminal;

// The nonterminals that derive one span of the word
pub type Cell = BTreeSet<Nonterminal>;

/// The upper triangle of an `n`x`n` derivation table, stored row by row in
/// one flat vector. Cell `(i, j)` only exists for `i <= j < n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    len: usize,
    cells: Vec<Cell>,
}

impl Table {
    pub(super) fn new(len: usize) -> Self {
        Table {
            len,
            cells: vec![Cell::new(); len * (len + 1) / 2],
        }
    }

    // Row i starts after the n + (n - 1) + ... + (n - i + 1) cells above it
    fn index(&self, i: usize, j: usize) -> Option<usize> {
        if i > j || j >= self.len {
            return None;
        }
        Some(i * self.len - i * i.saturating_sub(1) / 2 + (j - i))
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cell(&self, i: usize, j: usize) -> Option<&Cell> {
        self.index(i, j).map(|idx| &self.cells[idx])
    }

    pub(super) fn cell_mut(&mut self, i: usize, j: usize) -> &mut Cell {
        let idx = self
            .index(i, j)
            .unwrap_or_else(|| panic!("cell ({}, {}) is outside a table of size {}", i, j, self.len));
        &mut self.cells[idx]
    }

    // The cell spanning the whole word
    pub fn root(&self) -> Option<&Cell> {
        self.len.checked_sub(1).and_then(|last| self.cell(0, last))
    }

    pub fn derives(&self, nonterminal: Nonterminal) -> bool {
        self.root().is_some_and(|cell| cell.contains(&nonterminal))
    }
}

fn render_cell(cell: &Cell) -> String {
    format!("{{{}}}", cell.iter().join(","))
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.len {
            let row = (0..self.len)
                .map(|j| self.cell(i, j).map(render_cell).unwrap_or_default())
                .join("\t");
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
