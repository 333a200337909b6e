use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aminoacid::normalize_sequence;
use crate::errors::AnalysisResult;

/// A validated, immutable protein sequence of uppercase one-letter codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(String);

impl Sequence {
    /// Validate and normalize a raw sequence
    pub fn new(raw: &str) -> AnalysisResult<Self> {
        normalize_sequence(raw).map(Sequence)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence has no residues; never true once validated
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn residues(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// A parsed FASTA record. The sequence is kept as read so that an invalid
// record can be reported on its own without aborting the rest of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinRecord {
    pub id: String,          // e.g. "sp|P69905|HBA_HUMAN"
    pub description: String, // full header line without the leading '>'
    pub sequence: String,
}

impl ProteinRecord {
    pub fn new(id: &str, description: &str, sequence: &str) -> Self {
        Self { id: id.to_string(), description: description.to_string(), sequence: sequence.to_string() }
    }

    /// Build a record from a FASTA header line (without '>') and its sequence
    pub fn from_header(header: &str, sequence: &str) -> Self {
        let header = header.trim();
        let id = header.split_whitespace().next().unwrap_or("");
        Self::new(id, header, sequence)
    }

    /// Validate the raw sequence
    pub fn validated_sequence(&self) -> AnalysisResult<Sequence> {
        Sequence::new(&self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_new() {
        let seq = Sequence::new("mkwvtf").unwrap();
        assert_eq!(seq.as_str(), "MKWVTF");
        assert_eq!(seq.len(), 6);
        assert!(!seq.is_empty());
        assert_eq!(seq.to_string(), "MKWVTF");
    }

    #[test]
    fn test_sequence_rejects_invalid() {
        assert!(Sequence::new("").is_err());
        assert!(Sequence::new("MK1").is_err());
    }

    #[test]
    fn test_record_from_header() {
        let record = ProteinRecord::from_header(
            "sp|P69905|HBA_HUMAN Hemoglobin subunit alpha OS=Homo sapiens",
            "MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF",
        );
        assert_eq!(record.id, "sp|P69905|HBA_HUMAN");
        assert!(record.description.starts_with("sp|P69905|HBA_HUMAN Hemoglobin"));
        assert!(record.validated_sequence().is_ok());
    }

    #[test]
    fn test_record_header_without_description() {
        let record = ProteinRecord::from_header("test_protein1", "PLANTANDANIMAL");
        assert_eq!(record.id, "test_protein1");
        assert_eq!(record.description, "test_protein1");
    }
}
