use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::composition::{aromatic_counts, residue_composition, AromaticCounts, ResidueComposition};
use crate::config::{DisplayConfig, EstimatorConfig};
use crate::errors::{AnalysisError, AnalysisResult};
use crate::highlight::{highlight_aromatics, HighlightedSequence};
use crate::io::ParsedFasta;
use crate::isoelectric::{IsoelectricPointEstimator, PkaSet};
use crate::protein::{ProteinRecord, Sequence};
use crate::types::Ph;

pub const SEQUENCE_EXPORT_NAME: &str = "protein_sequence.txt";

/// Everything computed for one protein
#[derive(Debug, Clone, Serialize)]
pub struct ProteinAnalysis {
    pub id: String,
    pub description: String,
    pub length: usize,
    pub composition: ResidueComposition,
    pub aromatic: AromaticCounts,
    pub isoelectric_point: Ph,
    pub pka_set: PkaSet,
    pub highlighted: HighlightedSequence,
}

impl ProteinAnalysis {
    pub fn sequence(&self) -> &str {
        self.highlighted.sequence()
    }
}

/// A record that could not be analyzed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    /// 0-based position of the record in its input
    pub index: usize,
    pub id: String,
    pub kind: String,
    pub message: String,
}

impl RecordFailure {
    fn new(index: usize, id: &str, error: &AnalysisError) -> Self {
        Self { index, id: id.to_string(), kind: error.kind().to_string(), message: error.to_string() }
    }
}

/// Outcome of analyzing every record of an input independently
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub analyses: Vec<ProteinAnalysis>,
    pub failures: Vec<RecordFailure>,
}

impl BatchReport {
    pub fn record_count(&self) -> usize {
        self.analyses.len() + self.failures.len()
    }

    pub fn all_failed(&self) -> bool {
        self.analyses.is_empty() && !self.failures.is_empty()
    }
}

/// One CSV row of residue composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    pub id: String,
    pub residue: char,
    pub count: usize,
    pub frequency: f64,
}

/// Runs the per-protein analyses
#[derive(Debug, Clone, Default)]
pub struct ProteinAnalyzer {
    estimator: IsoelectricPointEstimator,
}

impl ProteinAnalyzer {
    pub fn new(config: &EstimatorConfig) -> Self {
        Self { estimator: IsoelectricPointEstimator::new(config) }
    }

    pub fn analyze_sequence(&self, id: &str, description: &str, sequence: &Sequence) -> ProteinAnalysis {
        ProteinAnalysis {
            id: id.to_string(),
            description: description.to_string(),
            length: sequence.len(),
            composition: residue_composition(sequence),
            aromatic: aromatic_counts(sequence),
            isoelectric_point: self.estimator.estimate(sequence),
            pka_set: self.estimator.pka_set(),
            highlighted: highlight_aromatics(sequence),
        }
    }

    pub fn analyze_record(&self, record: &ProteinRecord) -> AnalysisResult<ProteinAnalysis> {
        let sequence = record.validated_sequence()?;
        Ok(self.analyze_sequence(&record.id, &record.description, &sequence))
    }

    /// Analyze each record on its own; an invalid record is reported and
    /// the rest are still analyzed
    pub fn analyze_records(&self, records: &[ProteinRecord]) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, record) in records.iter().enumerate() {
            match self.analyze_record(record) {
                Ok(analysis) => report.analyses.push(analysis),
                Err(e) => {
                    warn!("Skipping record {} ({}): {}", index + 1, record.id, e);
                    report.failures.push(RecordFailure::new(index, &record.id, &e));
                }
            }
        }
        report
    }

    /// Analyze parsed FASTA content, including a failure entry when the
    /// stream stopped early
    pub fn analyze_parsed(&self, parsed: &ParsedFasta) -> BatchReport {
        let mut report = self.analyze_records(&parsed.records);
        if let Some(error) = &parsed.truncated {
            report.failures.push(RecordFailure::new(parsed.records.len(), "", error));
        }
        report
    }
}

/// Human-readable summary of one analysis
pub fn render_text(analysis: &ProteinAnalysis, display: &DisplayConfig) -> String {
    let sequence = if display.color {
        analysis.highlighted.to_ansi(display.line_width)
    } else {
        analysis.highlighted.to_plain(display.line_width)
    };

    let mut out = String::new();
    out.push_str(&format!("ID: {}\n", analysis.id));
    out.push_str(&format!("Length: {} amino acids\n", analysis.length));
    out.push_str("Sequence:\n");
    out.push_str(&sequence);
    out.push('\n');
    out.push_str(&format!("Aromatics (F, W, Y): {}\n", analysis.aromatic));
    out.push_str(&format!(
        "Isoelectric point (pI): {} [{} pKa set]\n",
        analysis.isoelectric_point, analysis.pka_set
    ));
    out.push_str("Amino acid frequency:\n");
    out.push_str(&analysis.composition.histogram(40));
    out
}

/// Downloadable analysis text: header, sequence, aromatic counts and pI
pub fn export_text(analysis: &ProteinAnalysis) -> String {
    format!(
        "> {}\n{}\n\nAromatic counts: {}\nIsoelectric point: {}\n",
        analysis.description,
        analysis.sequence(),
        analysis.aromatic,
        analysis.isoelectric_point
    )
}

/// Downloadable bare sequence
pub fn export_sequence(analysis: &ProteinAnalysis) -> String {
    format!("{}\n", analysis.sequence())
}

/// File name for an analysis export, with unsafe characters replaced
pub fn export_file_name(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let safe = if safe.is_empty() { "record".to_string() } else { safe };
    format!("analysis_{}.txt", safe)
}

/// Write one analysis text file per protein into `dir`
pub fn write_exports<P: AsRef<Path>>(dir: P, analyses: &[ProteinAnalysis]) -> AnalysisResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(analyses.len());
    for analysis in analyses {
        let path = dir.join(export_file_name(&analysis.id));
        std::fs::write(&path, export_text(analysis))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

pub fn composition_rows(analysis: &ProteinAnalysis) -> Vec<CompositionRow> {
    analysis
        .composition
        .counts
        .iter()
        .map(|(&residue, &count)| CompositionRow {
            id: analysis.id.clone(),
            residue,
            count,
            frequency: analysis.composition.frequency(residue),
        })
        .collect()
}

/// CSV with one row per (protein, residue)
pub fn write_composition_csv<W: Write>(writer: W, analyses: &[ProteinAnalysis]) -> AnalysisResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for analysis in analyses {
        for row in composition_rows(analysis) {
            writer.serialize(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(writer: W, report: &BatchReport) -> AnalysisResult<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
