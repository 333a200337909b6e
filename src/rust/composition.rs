use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::aminoacid::is_aromatic;
use crate::protein::Sequence;

/// Occurrence count of every residue code present in a sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidueComposition {
    pub counts: BTreeMap<char, usize>,
    pub length: usize,
}

impl ResidueComposition {
    pub fn count(&self, aa: char) -> usize {
        self.counts.get(&aa).copied().unwrap_or(0)
    }

    /// Relative frequency of `aa` (0.0 - 1.0)
    pub fn frequency(&self, aa: char) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            self.count(aa) as f64 / self.length as f64
        }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Text bar chart, one line per residue, longest bar `width` characters
    pub fn histogram(&self, width: usize) -> String {
        let max = self.counts.values().copied().max().unwrap_or(0);
        let mut out = String::new();
        for (aa, &count) in &self.counts {
            let bar = if max == 0 { 0 } else { (count * width).div_ceil(max) };
            out.push_str(&format!("{} {:>5} {}\n", aa, count, "#".repeat(bar)));
        }
        out
    }
}

/// Residue composition of `sequence`
pub fn residue_composition(sequence: &Sequence) -> ResidueComposition {
    let mut counts = BTreeMap::new();
    for aa in sequence.residues() {
        *counts.entry(aa).or_insert(0) += 1;
    }
    ResidueComposition { counts, length: sequence.len() }
}

/// Counts of the aromatic residues F, W and Y
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AromaticCounts {
    #[serde(rename = "F")]
    pub phe: usize,
    #[serde(rename = "W")]
    pub trp: usize,
    #[serde(rename = "Y")]
    pub tyr: usize,
}

impl AromaticCounts {
    pub fn total(&self) -> usize {
        self.phe + self.trp + self.tyr
    }

    /// (code, count) pairs in F, W, Y order, zero counts included
    pub fn entries(&self) -> [(char, usize); 3] {
        [('F', self.phe), ('W', self.trp), ('Y', self.tyr)]
    }
}

impl fmt::Display for AromaticCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F={} W={} Y={}", self.phe, self.trp, self.tyr)
    }
}

pub fn aromatic_counts(sequence: &Sequence) -> AromaticCounts {
    let mut counts = AromaticCounts::default();
    for aa in sequence.residues().filter(|aa| is_aromatic(*aa)) {
        match aa {
            'F' => counts.phe += 1,
            'W' => counts.trp += 1,
            _ => counts.tyr += 1,
        }
    }
    counts
}
