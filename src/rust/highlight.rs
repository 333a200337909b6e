//! Display projection of a sequence with its aromatic residues marked.

use serde::Serialize;

use crate::aminoacid::is_aromatic;
use crate::protein::Sequence;

const ANSI_AROMATIC: &str = "\x1b[1;31m";
const ANSI_RESET: &str = "\x1b[0m";

/// A sequence annotated with the positions of F, W and Y
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedSequence {
    sequence: String,
    /// 1-based positions of aromatic residues
    aromatic_positions: Vec<usize>,
    #[serde(skip)]
    marks: Vec<bool>,
}

pub fn highlight_aromatics(sequence: &Sequence) -> HighlightedSequence {
    let marks: Vec<bool> = sequence.residues().map(is_aromatic).collect();
    let aromatic_positions =
        marks.iter().enumerate().filter(|(_, marked)| **marked).map(|(i, _)| i + 1).collect();
    HighlightedSequence { sequence: sequence.as_str().to_string(), aromatic_positions, marks }
}

impl HighlightedSequence {
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn aromatic_positions(&self) -> &[usize] {
        &self.aromatic_positions
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marks.get(index).copied().unwrap_or(false)
    }

    /// (residue, is_aromatic) pairs in sequence order
    pub fn residues(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        self.sequence.chars().zip(self.marks.iter().copied())
    }

    /// Monospace HTML block with aromatic residues in bold red
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div style='font-family: monospace'>");
        for (aa, aromatic) in self.residues() {
            if aromatic {
                html.push_str("<span style='color:red; font-weight:bold'>");
                html.push(aa);
                html.push_str("</span>");
            } else {
                html.push(aa);
            }
        }
        html.push_str("</div>");
        html
    }

    /// Terminal rendering wrapped at `line_width` residues, aromatics in bold red
    pub fn to_ansi(&self, line_width: usize) -> String {
        let mut lines = Vec::new();
        for chunk in self.chunks(line_width) {
            let mut line = String::new();
            for (aa, aromatic) in chunk {
                if aromatic {
                    line.push_str(ANSI_AROMATIC);
                    line.push(aa);
                    line.push_str(ANSI_RESET);
                } else {
                    line.push(aa);
                }
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    /// Plain text wrapped at `line_width`, with a `^` marker line under any
    /// line that contains aromatic residues
    pub fn to_plain(&self, line_width: usize) -> String {
        let mut lines = Vec::new();
        for chunk in self.chunks(line_width) {
            lines.push(chunk.iter().map(|(aa, _)| *aa).collect::<String>());
            if chunk.iter().any(|(_, aromatic)| *aromatic) {
                let marker: String =
                    chunk.iter().map(|(_, aromatic)| if *aromatic { '^' } else { ' ' }).collect();
                lines.push(marker.trim_end().to_string());
            }
        }
        lines.join("\n")
    }

    fn chunks(&self, line_width: usize) -> Vec<Vec<(char, bool)>> {
        let residues: Vec<(char, bool)> = self.residues().collect();
        residues.chunks(line_width.max(1)).map(|chunk| chunk.to_vec()).collect()
    }
}
