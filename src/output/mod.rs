//! Output document generation
//!
//! - `ncdu` - streaming writer for ncdu's JSON export format

mod ncdu;

pub use ncdu::{NcduWriter, PROGNAME, PROGVER, WriteSummary, write_ncdu};
