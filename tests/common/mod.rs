#![allow(dead_code)]

// Same helper the unit tests use; the library's test modules are not
// visible to integration tests, so the file is included by path.
#[path = "../../src/rust/tests/test_utils.rs"]
mod test_utils;

pub use test_utils::serve_once;

pub const MIXED_FASTA: &str = "tests/testdata/mixed.fasta";

pub const HBA_SEQUENCE: &str = "MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHFDLSHGSAQVKGHGKKVADALTNAVAHVDDMPNALSALSDLHAHKLRVDPVNFKLLSHCLLVTLAAHLPAEFTPAVHASLDKFLASVSTVLTSKYR";

pub const HBA_FASTA: &str = ">sp|P69905|HBA_HUMAN Hemoglobin subunit alpha OS=Homo sapiens OX=9606 GN=HBA1 PE=1 SV=2
MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHFDLSHGSAQVKGHGKKVADALTNAVAHVDDMPNALSAL
SDLHAHKLRVDPVNFKLLSHCLLVTLAAHLPAEFTPAVHASLDKFLASVSTVLTSKYR
";
