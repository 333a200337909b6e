//! Remote sequence lookup against the UniProt REST API.

use log::{info, warn};
use reqwest::blocking::Client;
use std::time::Duration;

use crate::config::UniProtConfig;
use crate::errors::{AnalysisError, AnalysisResult, AnalysisResultExt};
use crate::io::parse_fasta;
use crate::protein::ProteinRecord;
use crate::types::Accession;

/// Blocking UniProt client. Failed lookups are reported, never retried.
pub struct UniProtClient {
    client: Client,
    base_url: String,
}

impl UniProtClient {
    pub fn new(config: &UniProtConfig) -> AnalysisResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .with_field_context("uniprot", "cannot build HTTP client")?;
        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// URL of the FASTA download for `accession`
    pub fn fasta_url(&self, accession: &Accession) -> String {
        format!("{}/{}.fasta", self.base_url, accession)
    }

    /// Fetch the raw FASTA text for `accession`
    pub fn fetch_fasta(&self, accession: &str) -> AnalysisResult<String> {
        let validated =
            Accession::new(accession).map_err(|e| AnalysisError::lookup_failed(accession, e))?;
        let url = self.fasta_url(&validated);
        info!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AnalysisError::lookup_failed(accession, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::lookup_failed(
                accession,
                format!("protein not found (HTTP {})", status),
            ));
        }

        response.text().map_err(|e| {
            AnalysisError::lookup_failed(accession, format!("cannot read response body: {}", e))
        })
    }

    /// Fetch and parse the entry for `accession`
    pub fn fetch(&self, accession: &str) -> AnalysisResult<ProteinRecord> {
        let text = self.fetch_fasta(accession)?;
        let parsed = parse_fasta(text.as_bytes()).map_err(|e| {
            AnalysisError::lookup_failed(accession, format!("response is not FASTA: {}", e))
        })?;

        let mut records = parsed.records.into_iter();
        let record = records.next().ok_or_else(|| {
            AnalysisError::lookup_failed(accession, "response contained no record")
        })?;
        let extra = records.count();
        if extra > 0 {
            warn!("Lookup of {} returned {} extra records; using the first", accession, extra);
        }
        info!("Protein found: {}", record.id);
        Ok(record)
    }
}
