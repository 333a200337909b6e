pub mod aminoacid;
pub mod composition;
pub mod config;
pub mod errors;
pub mod highlight;
pub mod io;
pub mod isoelectric;
pub mod protein;
pub mod report;
pub mod structure;
pub mod types;
pub mod uniprot;


pub use crate::config::{AnalysisConfig, AnalysisConfigBuilder};
pub use crate::errors::{AnalysisError, AnalysisResult};
pub use crate::isoelectric::{isoelectric_point, IsoelectricPointEstimator, PkaSet};
pub use crate::protein::{ProteinRecord, Sequence};
pub use crate::report::{BatchReport, ProteinAnalysis, ProteinAnalyzer};

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use std::collections::BTreeMap;

    use crate::composition::{aromatic_counts, residue_composition};
    use crate::config::EstimatorConfig;
    use crate::highlight::highlight_aromatics;
    use crate::isoelectric::{IsoelectricPointEstimator, PkaSet};
    use crate::protein::Sequence;

    fn to_py_err(e: crate::errors::AnalysisError) -> PyErr {
        PyErr::new::<PyValueError, _>(e.to_string())
    }

    fn sequence(seq: &str) -> PyResult<Sequence> {
        Sequence::new(seq).map_err(to_py_err)
    }

    /// Isoelectric point of a protein sequence, rounded to two decimals.
    #[pyfunction]
    #[pyo3(signature = (seq, pka_set = "emboss"))]
    fn isoelectric_point(seq: &str, pka_set: &str) -> PyResult<f64> {
        let pka_set = PkaSet::from_name(pka_set).map_err(PyErr::new::<PyValueError, _>)?;
        let config = EstimatorConfig { pka_set, ..EstimatorConfig::default() };
        Ok(IsoelectricPointEstimator::new(&config).estimate(&sequence(seq)?).get())
    }

    /// Residue code -> occurrence count.
    #[pyfunction]
    fn composition(seq: &str) -> PyResult<BTreeMap<char, usize>> {
        Ok(residue_composition(&sequence(seq)?).counts)
    }

    /// Counts of F, W and Y.
    #[pyfunction]
    fn aromatic(seq: &str) -> PyResult<BTreeMap<char, usize>> {
        Ok(aromatic_counts(&sequence(seq)?).entries().into_iter().collect())
    }

    /// HTML with aromatic residues highlighted.
    #[pyfunction]
    fn highlight_html(seq: &str) -> PyResult<String> {
        Ok(highlight_aromatics(&sequence(seq)?).to_html())
    }

    #[pymodule]
    fn protexplorer(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(isoelectric_point, m)?)?;
        m.add_function(wrap_pyfunction!(composition, m)?)?;
        m.add_function(wrap_pyfunction!(aromatic, m)?)?;
        m.add_function(wrap_pyfunction!(highlight_html, m)?)?;
        Ok(())
    }
}
