//! Isoelectric point estimation.
//!
//! The net charge of a protein at a given pH is modelled with the
//! Henderson-Hasselbalch equation over its ionizable groups: the side chains
//! of D, E, C, Y (acidic) and H, K, R (basic), plus the N-terminal amine and
//! the C-terminal carboxyl, counted once each. The isoelectric point is the
//! root of that charge curve on `[0, 14]`, located by bisection.

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EstimatorConfig;
use crate::errors::AnalysisResult;
use crate::protein::Sequence;
use crate::types::Ph;

/// Published pKa constant sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PkaSet {
    /// EMBOSS `iep` defaults (Epk.dat)
    #[default]
    Emboss,
    /// Lehninger, Principles of Biochemistry
    Lehninger,
    /// Solomon, Organic Chemistry
    Solomon,
}

impl PkaSet {
    pub const ALL: [PkaSet; 3] = [PkaSet::Emboss, PkaSet::Lehninger, PkaSet::Solomon];

    pub fn table(&self) -> PkaTable {
        match self {
            PkaSet::Emboss => PkaTable {
                n_term: 8.6,
                c_term: 3.6,
                asp: 3.9,
                glu: 4.1,
                cys: 8.5,
                tyr: 10.1,
                his: 6.5,
                lys: 10.8,
                arg: 12.5,
            },
            PkaSet::Lehninger => PkaTable {
                n_term: 9.69,
                c_term: 2.34,
                asp: 3.86,
                glu: 4.25,
                cys: 8.33,
                tyr: 10.07,
                his: 6.00,
                lys: 10.53,
                arg: 12.48,
            },
            PkaSet::Solomon => PkaTable {
                n_term: 9.6,
                c_term: 2.4,
                asp: 3.9,
                glu: 4.3,
                cys: 8.3,
                tyr: 10.1,
                his: 6.0,
                lys: 10.5,
                arg: 12.5,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PkaSet::Emboss => "emboss",
            PkaSet::Lehninger => "lehninger",
            PkaSet::Solomon => "solomon",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, String> {
        PkaSet::ALL
            .into_iter()
            .find(|set| set.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                format!("Unknown pKa set: {}. Must be one of: emboss, lehninger, solomon", name)
            })
    }
}

impl fmt::Display for PkaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// pKa constants for every ionizable group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PkaTable {
    pub n_term: f64,
    pub c_term: f64,
    pub asp: f64,
    pub glu: f64,
    pub cys: f64,
    pub tyr: f64,
    pub his: f64,
    pub lys: f64,
    pub arg: f64,
}

/// Occurrences of each ionizable side chain in a sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IonizableCounts {
    pub asp: usize,
    pub glu: usize,
    pub cys: usize,
    pub tyr: usize,
    pub his: usize,
    pub lys: usize,
    pub arg: usize,
}

impl IonizableCounts {
    pub fn from_sequence(sequence: &Sequence) -> Self {
        let mut counts = IonizableCounts::default();
        for &aa in sequence.as_bytes() {
            match aa {
                b'D' => counts.asp += 1,
                b'E' => counts.glu += 1,
                b'C' => counts.cys += 1,
                b'Y' => counts.tyr += 1,
                b'H' => counts.his += 1,
                b'K' => counts.lys += 1,
                b'R' => counts.arg += 1,
                _ => {}
            }
        }
        counts
    }
}

fn acidic(pka: f64, ph: f64) -> f64 {
    -1.0 / (1.0 + 10_f64.powf(pka - ph))
}

fn basic(pka: f64, ph: f64) -> f64 {
    1.0 / (1.0 + 10_f64.powf(ph - pka))
}

/// Net charge at `ph` for the given side-chain counts plus both termini.
///
/// Strictly decreasing in `ph`; increasing any basic count raises it at every
/// pH and increasing any acidic count lowers it.
pub fn net_charge(counts: &IonizableCounts, table: &PkaTable, ph: f64) -> f64 {
    let positive = basic(table.n_term, ph)
        + counts.his as f64 * basic(table.his, ph)
        + counts.lys as f64 * basic(table.lys, ph)
        + counts.arg as f64 * basic(table.arg, ph);
    let negative = acidic(table.c_term, ph)
        + counts.asp as f64 * acidic(table.asp, ph)
        + counts.glu as f64 * acidic(table.glu, ph)
        + counts.cys as f64 * acidic(table.cys, ph)
        + counts.tyr as f64 * acidic(table.tyr, ph);
    positive + negative
}

/// Bisection estimator for the isoelectric point
#[derive(Debug, Clone)]
pub struct IsoelectricPointEstimator {
    pka_set: PkaSet,
    table: PkaTable,
    tolerance: f64,
    max_iterations: u32,
}

impl Default for IsoelectricPointEstimator {
    fn default() -> Self {
        Self::new(&EstimatorConfig::default())
    }
}

impl IsoelectricPointEstimator {
    pub fn new(config: &EstimatorConfig) -> Self {
        Self {
            pka_set: config.pka_set,
            table: config.pka_set.table(),
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
        }
    }

    pub fn pka_set(&self) -> PkaSet {
        self.pka_set
    }

    /// Net charge of `sequence` at `ph`
    pub fn charge_at(&self, sequence: &Sequence, ph: f64) -> f64 {
        net_charge(&IonizableCounts::from_sequence(sequence), &self.table, ph)
    }

    /// Estimate the isoelectric point of a validated sequence.
    ///
    /// The bracket `[0, 14]` is halved until narrower than the tolerance or
    /// the iteration cap is hit. There is no early exit on a small charge, so
    /// the result depends only on the sign of the charge at each midpoint.
    pub fn estimate(&self, sequence: &Sequence) -> Ph {
        let counts = IonizableCounts::from_sequence(sequence);
        let mut lo = Ph::MIN;
        let mut hi = Ph::MAX;
        let mut iterations = 0;

        while iterations < self.max_iterations && hi - lo >= self.tolerance {
            let mid = (lo + hi) / 2.0;
            if net_charge(&counts, &self.table, mid) > 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
            iterations += 1;
        }

        let pi = (lo + hi) / 2.0;
        debug!(
            "pI {:.4} after {} iterations ({} pKa set, {} residues)",
            pi,
            iterations,
            self.pka_set,
            sequence.len()
        );
        Ph::rounded(pi)
    }

    /// Validate `raw` and estimate its isoelectric point
    pub fn estimate_str(&self, raw: &str) -> AnalysisResult<Ph> {
        let sequence = Sequence::new(raw)?;
        Ok(self.estimate(&sequence))
    }
}

/// Isoelectric point of `sequence` with the default EMBOSS constants.
///
/// # Arguments
/// * `sequence` - One-letter residue codes; lowercase and a trailing `*` are accepted
///
/// # Returns
/// * `Ok(Ph)` - The estimate, rounded to two decimals
/// * `Err(AnalysisError::InvalidSequence)` - Empty input or an unknown residue
///
/// # Examples
/// ```
/// use protexplorer::isoelectric_point;
///
/// assert!(isoelectric_point("KKKK")?.get() > 9.0);
/// assert!(isoelectric_point("DDDD")?.get() < 5.0);
/// assert!(isoelectric_point("XYZ123").is_err());
/// # Ok::<(), protexplorer::AnalysisError>(())
/// ```
pub fn isoelectric_point(sequence: &str) -> AnalysisResult<Ph> {
    IsoelectricPointEstimator::default().estimate_str(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AnalysisError;

    fn pi(seq: &str) -> f64 {
        isoelectric_point(seq).unwrap().get()
    }

    #[test]
    fn test_poly_lys_is_basic() {
        let value = pi("KKKK");
        assert!(value > 9.0, "poly-K pI should be > 9, got {}", value);
    }

    #[test]
    fn test_poly_asp_is_acidic() {
        let value = pi("DDDD");
        assert!(value < 5.0, "poly-D pI should be < 5, got {}", value);
    }

    #[test]
    fn test_poly_gly_driven_by_termini() {
        // Midpoint of the EMBOSS terminal pKa values, (8.6 + 3.6) / 2
        let value = pi("GGGG");
        assert!(value > 5.5 && value < 6.5, "poly-G pI should be ~6.1, got {}", value);
        assert_ne!(value, 7.0);
        assert!((value - 6.1).abs() <= 0.01);
    }

    #[test]
    fn test_single_residue() {
        let value = pi("A");
        assert!(value > 0.0 && value < 14.0);
    }

    #[test]
    fn test_known_protein() {
        // Insulin B chain, literature pI in the 6.5 - 7.2 range
        let value = pi("FVNQHLCGSHLVEALYLVCGERGFFYTPKT");
        assert!(value > 5.5 && value < 8.5, "insulin B chain pI ~6.9, got {}", value);
    }

    #[test]
    fn test_two_decimal_output() {
        let value = pi("MKWVTFISLLLLFSSAYS");
        assert_eq!((value * 100.0).round() / 100.0, value);
    }

    #[test]
    fn test_idempotent() {
        let seq = "MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF";
        assert_eq!(pi(seq), pi(seq));
    }

    #[test]
    fn test_ambiguity_codes_carry_no_charge() {
        assert_eq!(pi("GXG"), pi("GGG"));
        assert_eq!(pi("GBZJUOG"), pi("GGGGGGG"));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(isoelectric_point(""), Err(AnalysisError::InvalidSequence(_))));
        assert!(matches!(isoelectric_point("XYZ123"), Err(AnalysisError::InvalidSequence(_))));
    }

    #[test]
    fn test_charge_sign_at_bounds() {
        let estimator = IsoelectricPointEstimator::default();
        let seq = Sequence::new("GGGG").unwrap();
        assert!(estimator.charge_at(&seq, 0.0) > 0.0);
        assert!(estimator.charge_at(&seq, 14.0) < 0.0);
    }

    #[test]
    fn test_pka_sets_differ() {
        let seq = Sequence::new("GGGG").unwrap();
        let emboss = IsoelectricPointEstimator::default().estimate(&seq);
        let config =
            EstimatorConfig { pka_set: PkaSet::Lehninger, ..EstimatorConfig::default() };
        let lehninger = IsoelectricPointEstimator::new(&config).estimate(&seq);
        // Lehninger termini: (9.69 + 2.34) / 2
        assert!((lehninger.get() - 6.015).abs() < 0.01);
        assert_ne!(emboss, lehninger);
    }

    #[test]
    fn test_iteration_cap_terminates() {
        let config =
            EstimatorConfig { tolerance: 0.0, max_iterations: 5, ..EstimatorConfig::default() };
        let value = IsoelectricPointEstimator::new(&config).estimate_str("KKKK").unwrap().get();
        assert!((0.0..=14.0).contains(&value));
    }

    #[test]
    fn test_pka_set_names() {
        for set in PkaSet::ALL {
            assert_eq!(PkaSet::from_name(set.name()).unwrap(), set);
        }
        assert_eq!(PkaSet::from_name("EMBOSS").unwrap(), PkaSet::Emboss);
        assert!(PkaSet::from_name("bjellqvist").is_err());
    }

    #[test]
    fn test_pka_set_cli_values_match_names() {
        let values: Vec<PkaSet> = PkaSet::value_variants().to_vec();
        assert_eq!(values, PkaSet::ALL.to_vec());
        for set in PkaSet::ALL {
            let value = set.to_possible_value().unwrap();
            assert_eq!(value.get_name(), set.name());
            assert_eq!(PkaSet::from_str(set.name(), false).unwrap(), set);
        }
    }
}
