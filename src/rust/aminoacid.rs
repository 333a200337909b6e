use crate::errors::{AnalysisError, AnalysisResult};

/// Standard amino acids
pub const STANDARD_AA: [char; 20] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'Y',
];

/// Ambiguity codes: B (D or N), Z (E or Q), J (I or L)
pub const AMBIGUOUS_AA: [char; 3] = ['B', 'Z', 'J'];

/// Unknown residue, selenocysteine and pyrrolysine
pub const SPECIAL_AA: [char; 3] = ['X', 'U', 'O'];

/// Residues with an aromatic side chain, in report order
pub const AROMATIC_AA: [char; 3] = ['F', 'W', 'Y'];

const STOP: char = '*';

/// Whether `aa` is a recognized (uppercase) one-letter code
pub fn is_valid_aa(aa: char) -> bool {
    // Put the most common case, the 20 standard amino acids, first
    STANDARD_AA.contains(&aa) || AMBIGUOUS_AA.contains(&aa) || SPECIAL_AA.contains(&aa)
}

pub fn is_aromatic(aa: char) -> bool {
    AROMATIC_AA.contains(&aa)
}

/// Validates a protein sequence and returns it uppercased.
///
/// Lowercase letters are accepted and uppercased. A single trailing stop (`*`)
/// is dropped; an interior stop, whitespace, digits or punctuation are rejected
/// with the 1-based position of the first offending symbol.
pub fn normalize_sequence(sequence: &str) -> AnalysisResult<String> {
    let trimmed = sequence.strip_suffix(STOP).unwrap_or(sequence);
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidSequence("empty protein sequence".to_string()));
    }

    let mut normalized = String::with_capacity(trimmed.len());
    for (i, c) in trimmed.chars().enumerate() {
        let upper = c.to_ascii_uppercase();
        if !is_valid_aa(upper) {
            return Err(AnalysisError::invalid_residue(c, i + 1));
        }
        normalized.push(upper);
    }
    Ok(normalized)
}
