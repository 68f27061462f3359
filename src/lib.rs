//! # filter-csv
//!
//! Select rows from CSV data using a fixed set of named predicates, and
//! optionally project a subset of columns.
//!
//! ## Overview
//!
//! A run is a single forward pass:
//! - **Parse**: read the header, then one [`Record`] per row
//! - **Filter**: keep rows matching one [`NamedFilter`], if given
//! - **Project**: reduce rows to the requested columns, in the requested order
//! - **Write**: emit the header and surviving rows with every value quoted
//!
//! ## Example
//!
//! ```
//! use filter_csv::{NamedFilter, Options, run};
//!
//! let input = "Title,Group name\nPicnic,Rangers\nHike,\n";
//! let options = Options::new()
//!     .filter(Some(NamedFilter::NoGroup))
//!     .columns(["Title"]);
//!
//! let mut output = Vec::new();
//! let summary = run(input.as_bytes(), &mut output, &options).unwrap();
//!
//! assert_eq!(summary.rows_written, 1);
//! assert_eq!(String::from_utf8(output).unwrap(), "\"Title\"\r\n\"Hike\"\r\n");
//! ```

pub mod error;
pub mod filter;
pub mod pipeline;
pub mod record;

pub use error::FilterError;
pub use filter::NamedFilter;
pub use pipeline::{Options, Pipeline, Summary, run};
pub use record::{FieldNames, Record};
