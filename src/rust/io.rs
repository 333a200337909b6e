//! Input handling: compressed files, stdin, and FASTA record parsing.
//!
//! Records are parsed straight from the (decompressed) stream, so a file that
//! breaks part way through still yields the records before the break.

use log::{debug, warn};
use needletail::parse_fastx_reader;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::protein::ProteinRecord;

/// Buffered input that can be handed to the FASTA parser
pub type InputReader = Box<dyn BufRead + Send>;

/// Opens a file with automatic compression detection.
///
/// gzip, bzip2, xz, zstd and uncompressed files are all handled; `niffler`
/// sniffs the format from the first bytes.
///
/// # Arguments
/// * `path` - Path to the file to open
///
/// # Returns
/// * `Ok(InputReader)` - A buffered reader over the decompressed content
/// * `Err(AnalysisError::Io)` - The file cannot be opened
/// * `Err(AnalysisError::ParseFailed)` - The compression header is unreadable
///
/// # Examples
/// ```no_run
/// use protexplorer::io::open_maybe_compressed;
/// use std::io::BufRead;
///
/// let reader = open_maybe_compressed("proteins.fasta.gz")?;
/// for line in reader.lines() {
///     println!("{}", line?);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open_maybe_compressed<P: AsRef<Path>>(path: P) -> AnalysisResult<InputReader> {
    let file = File::open(path)?;
    let (reader, _format) = niffler::send::get_reader(Box::new(file))
        .map_err(|e| AnalysisError::ParseFailed(format!("cannot decompress input: {}", e)))?;
    Ok(Box::new(BufReader::new(reader)))
}

/// Creates a buffered reader from stdin for pipeline processing.
pub fn stdin_reader() -> InputReader {
    Box::new(BufReader::new(io::stdin()))
}

/// Opens `path`, or stdin when `path` is "-"
pub fn open_input<P: AsRef<Path>>(path: P) -> AnalysisResult<InputReader> {
    let path_str = path.as_ref().to_string_lossy();
    if path_str == "-" {
        Ok(stdin_reader())
    } else {
        open_maybe_compressed(path)
    }
}

/// Result of parsing FASTA content: the records read, plus the error that
/// stopped the stream early, if any
#[derive(Debug)]
pub struct ParsedFasta {
    pub records: Vec<ProteinRecord>,
    pub truncated: Option<AnalysisError>,
}

/// Consumes leading ASCII whitespace; returns whether any content remains
fn skip_leading_whitespace<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(false);
        }
        let len = buf.len();
        let skip = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
        reader.consume(skip);
        if skip < len {
            return Ok(true);
        }
    }
}

/// Parses one or more FASTA records from a reader.
///
/// Leading blank lines are ignored. Content with no readable record is a
/// `ParseFailed` error. A stream that breaks after at least one record
/// (a truncated gzip member, an I/O error, a malformed record) keeps the
/// records read so far and reports the break in `truncated`.
///
/// # Arguments
/// * `reader` - Buffered, already decompressed FASTA content
///
/// # Examples
/// ```
/// use protexplorer::io::parse_fasta_reader;
///
/// let parsed = parse_fasta_reader(&b"\n>p1 first\nMKW\n>p2\nFWY\n"[..])?;
/// assert_eq!(parsed.records.len(), 2);
/// assert_eq!(parsed.records[0].description, "p1 first");
/// assert!(parsed.truncated.is_none());
/// # Ok::<(), protexplorer::AnalysisError>(())
/// ```
pub fn parse_fasta_reader<R: BufRead + Send>(mut reader: R) -> AnalysisResult<ParsedFasta> {
    if !skip_leading_whitespace(&mut reader)? {
        return Err(AnalysisError::ParseFailed("no FASTA records found".to_string()));
    }

    let mut reader = parse_fastx_reader(reader)
        .map_err(|e| AnalysisError::ParseFailed(e.to_string()))?;

    let mut records = Vec::new();
    let mut truncated = None;

    while let Some(record) = reader.next() {
        match record {
            Ok(record) => {
                let header = String::from_utf8_lossy(record.id());
                let sequence = String::from_utf8_lossy(&record.seq()).into_owned();
                records.push(ProteinRecord::from_header(&header, &sequence));
            }
            Err(e) => {
                if records.is_empty() {
                    return Err(AnalysisError::ParseFailed(e.to_string()));
                }
                warn!("FASTA stream stopped after {} records: {}", records.len(), e);
                truncated = Some(AnalysisError::ParseFailed(e.to_string()));
                break;
            }
        }
    }

    if records.is_empty() {
        return Err(AnalysisError::ParseFailed("no FASTA records found".to_string()));
    }

    debug!("Parsed {} FASTA records", records.len());
    Ok(ParsedFasta { records, truncated })
}

/// Parses FASTA records from in-memory content, such as an HTTP response body
pub fn parse_fasta(content: &[u8]) -> AnalysisResult<ParsedFasta> {
    parse_fasta_reader(content)
}

/// Reads and parses a FASTA file (any compression) or stdin, record by record
pub fn read_fasta<P: AsRef<Path>>(path: P) -> AnalysisResult<ParsedFasta> {
    parse_fasta_reader(open_input(path)?)
}
