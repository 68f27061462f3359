//! Row pipeline: parse, filter, project, write.
//!
//! [`Pipeline`] is a lazy iterator adapter over parsed records; [`run`] wires
//! it between a CSV reader and a fully-quoting CSV writer.

use std::io::{Read, Write};

use tracing::{debug, info};

use crate::error::FilterError;
use crate::filter::NamedFilter;
use crate::record::{FieldNames, Record};

/// What to keep from the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub filter: Option<NamedFilter>,
    /// Requested output columns; empty means all columns in input order.
    pub columns: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Option<NamedFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Row counts from a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub rows_read: usize,
    pub rows_written: usize,
}

/// Lazy filter-then-project adapter over a stream of parsed records.
///
/// Errors from the underlying stream pass through untouched, in order.
pub struct Pipeline<I> {
    iter: I,
    filter: Option<NamedFilter>,
    fields: Option<FieldNames>,
}

impl<I, E> Pipeline<I>
where
    I: Iterator<Item = Result<Record, E>>,
{
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            filter: None,
            fields: None,
        }
    }

    /// Keep only records matching `filter`; `None` keeps everything.
    pub fn filter(mut self, filter: Option<NamedFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Reduce each surviving record to `fields`; `None` leaves records whole.
    pub fn select(mut self, fields: Option<FieldNames>) -> Self {
        self.fields = fields;
        self
    }
}

impl<I, E> Iterator for Pipeline<I>
where
    I: Iterator<Item = Result<Record, E>>,
{
    type Item = Result<Record, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.iter.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e)),
            };
            if let Some(filter) = self.filter
                && !filter.matches(&record)
            {
                continue;
            }
            return Some(Ok(match &self.fields {
                Some(fields) => record.project(fields),
                None => record,
            }));
        }
    }
}

/// Parse the remaining rows of `reader` against `header`.
///
/// `rows_read` counts rows that parsed; a failing row is not counted.
fn parse_records<'a, R: Read>(
    reader: csv::Reader<R>,
    header: &'a FieldNames,
    rows_read: &'a mut usize,
) -> impl Iterator<Item = Result<Record, FilterError>> {
    reader.into_records().map(move |row| -> Result<Record, FilterError> {
        let row = row.map_err(FilterError::InputFormat)?;
        *rows_read += 1;
        Ok(Record::from_row(header, &row))
    })
}

/// Read CSV from `input`, apply `options`, and write CSV to `output`.
///
/// The header row is always written, even when no rows survive. Every output
/// value is quoted. Any read or write failure aborts the run; rows already
/// flushed stay written.
pub fn run<R: Read, W: Write>(
    input: R,
    output: W,
    options: &Options,
) -> Result<Summary, FilterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let header = FieldNames::from(reader.headers().map_err(FilterError::InputFormat)?);
    if header.is_empty() {
        return Err(FilterError::EmptyInput);
    }
    debug!(columns = header.len(), "parsed header");

    let projection = if options.columns.is_empty() {
        None
    } else {
        for missing in options.columns.iter().filter(|c| !header.contains(c)) {
            debug!(column = %missing, "requested column not in header, dropping");
        }
        Some(header.select(&options.columns))
    };
    let out_fields = projection.clone().unwrap_or_else(|| header.clone());

    if let Some(filter) = options.filter {
        debug!(filter = %filter, "applying filter");
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(output);
    writer
        .write_record(out_fields.iter())
        .map_err(FilterError::Output)?;

    let mut rows_read = 0;
    let records = parse_records(reader, &header, &mut rows_read);

    let mut rows_written = 0;
    for record in Pipeline::new(records)
        .filter(options.filter)
        .select(projection)
    {
        let record = record?;
        writer
            .write_record(record.values_for(&out_fields))
            .map_err(FilterError::Output)?;
        rows_written += 1;
    }
    writer.flush()?;

    let summary = Summary {
        rows_read,
        rows_written,
    };
    info!(
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        "pipeline complete"
    );
    Ok(summary)
}
