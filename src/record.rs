//! Header and row types.
//!
//! A [`Record`] is one data row as ordered `(name, value)` pairs. Field names
//! are shared with the [`FieldNames`] header the row was parsed against, so
//! building a record only allocates its values.

use std::sync::Arc;

/// The ordered column names declared by the input header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldNames {
    names: Vec<Arc<str>>,
}

impl FieldNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names.into_iter().map(|n| Arc::from(n.as_ref())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| &**n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| &**n)
    }

    /// Restrict the header to the requested names, in the caller's order.
    ///
    /// Requested names missing from the header are dropped. Duplicates in the
    /// request are kept.
    pub fn select<S: AsRef<str>>(&self, requested: &[S]) -> FieldNames {
        let names = requested
            .iter()
            .filter_map(|r| self.names.iter().find(|n| &***n == r.as_ref()))
            .cloned()
            .collect();
        FieldNames { names }
    }

    fn shared(&self) -> &[Arc<str>] {
        &self.names
    }
}

impl From<&csv::StringRecord> for FieldNames {
    fn from(header: &csv::StringRecord) -> Self {
        FieldNames::new(header.iter())
    }
}

/// One row of tabular data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(Arc<str>, String)>,
}

impl Record {
    /// Pair a parsed row with its header.
    ///
    /// A short row leaves the trailing fields absent. Values past the end of
    /// the header have no name and are dropped.
    pub fn from_row(header: &FieldNames, row: &csv::StringRecord) -> Self {
        let fields = header
            .shared()
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (Arc::clone(name), value.to_string()))
            .collect();
        Self { fields }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (Arc::from(k.as_ref()), v.into()))
                .collect(),
        }
    }

    /// Value of the named field, or `None` when the row lacks it.
    ///
    /// When the header repeats a name, the rightmost column wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(n, _)| &**n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (&**n, v.as_str()))
    }

    /// Build a new record holding only `fields`, in that order.
    ///
    /// Fields this record lacks are omitted rather than defaulted.
    pub fn project(&self, fields: &FieldNames) -> Record {
        let fields = fields
            .shared()
            .iter()
            .filter_map(|name| {
                self.get(name)
                    .map(|value| (Arc::clone(name), value.to_string()))
            })
            .collect();
        Record { fields }
    }

    /// Output row for the given columns; absent fields become empty strings.
    pub fn values_for<'a>(&'a self, fields: &'a FieldNames) -> impl Iterator<Item = &'a str> {
        fields.iter().map(move |name| self.get(name).unwrap_or(""))
    }
}
