use serde::{Deserialize, Serialize};
use std::fmt;

/// A type-safe wrapper for UniProt accessions and entry names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Accession(String);

impl Accession {
    /// Create a new accession with validation
    ///
    /// Both accessions (`P69905`) and entry names (`HBB_HUMAN`) are accepted.
    /// Only ASCII letters, digits and underscores are allowed so the value can
    /// be placed in a URL path as is.
    pub fn new(accession: &str) -> Result<Self, String> {
        let accession = accession.trim();
        if accession.is_empty() {
            Err("Accession must not be empty".to_string())
        } else if accession.len() > 32 {
            Err(format!("Accession too long: {} characters (max 32)", accession.len()))
        } else if let Some(c) = accession.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            Err(format!("Invalid character '{}' in accession", c))
        } else {
            Ok(Accession(accession.to_string()))
        }
    }

    /// Get the raw value
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Accession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A type-safe wrapper for Protein Data Bank identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructureId(String);

impl StructureId {
    /// Create a new structure identifier with validation
    ///
    /// Accepts classic four-character codes (a digit 1-9 followed by three
    /// alphanumerics, e.g. `4HHB`) and extended `pdb_` identifiers with eight
    /// alphanumerics (e.g. `pdb_00004hhb`). Classic codes are uppercased.
    pub fn new(id: &str) -> Result<Self, String> {
        let id = id.trim();
        let bytes = id.as_bytes();

        if bytes.len() == 4 {
            let first_ok = matches!(bytes[0], b'1'..=b'9');
            let rest_ok = bytes[1..].iter().all(|b| b.is_ascii_alphanumeric());
            if first_ok && rest_ok {
                return Ok(StructureId(id.to_ascii_uppercase()));
            }
        }

        let lower = id.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("pdb_") {
            if rest.len() == 8 && rest.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Ok(StructureId(lower));
            }
        }

        Err(format!(
            "Invalid PDB identifier: '{}'. Expected a 4-character code such as 1A3N or an extended id such as pdb_00001a3n",
            id
        ))
    }

    /// Get the raw value
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pH value rounded to two decimal places
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ph(f64);

impl Ph {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 14.0;

    /// Round `value` to two decimals
    pub fn rounded(value: f64) -> Self {
        Ph((value * 100.0).round() / 100.0)
    }

    /// Get the raw value
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Ph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
