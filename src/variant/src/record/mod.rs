use std::fmt::{self, Display, Formatter};

use ahash::AHashMap;
use itertools::Itertools;

use crate::{Field, Reading};

mod error;
pub use error::RecordError;

/// Field separator of variant summary tables.
pub const SEPARATOR: char = '\t';

/// A named column, resolved against a `Header` once, and then used to index every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name : String,
    pub index: usize,
}

/// Ordered column names of a variant summary table.
#[derive(Debug, Clone)]
pub struct Header {
    columns: Vec<String>,
    index  : AHashMap<String, usize>,
}

impl Header {
    /// Build a header from an ordered list of column names.
    /// When a name appears twice, lookups resolve to its first occurrence.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        let mut index = AHashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self { columns, index }
    }

    /// Parse a tab-separated header line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        Self::new(line.split(SEPARATOR).map(ToString::to_string).collect())
    }

    /// Resolve a required column.
    ///
    /// # Errors
    /// - `MissingColumn` if no column of the header carries this name.
    pub fn column(&self, name: &str) -> Result<Column, RecordError> {
        self.index.get(name)
            .map(|&index| Column { name: name.to_string(), index })
            .ok_or_else(|| RecordError::MissingColumn(name.to_string()))
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Split a raw tab-separated line into its fields, ensuring it matches the length of this header.
    ///
    /// # Errors
    /// - `FieldCount` if the number of fields differs from the number of columns.
    pub fn split<'a>(&self, line_no: usize, line: &'a str) -> Result<Vec<&'a str>, RecordError> {
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        if fields.len() != self.len() {
            return Err(RecordError::FieldCount { line: line_no, expected: self.len(), found: fields.len() })
        }
        Ok(fields)
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.columns.iter().join("\t"))
    }
}

/// A typed variant record: one row of the table, with every field typed by [`Field::typed`].
/// Fields are kept in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    fields: Vec<Field>,
}

impl Row {
    /// Split and type a raw table line.
    ///
    /// # Errors
    /// - `FieldCount` if the number of fields differs from the number of columns of `header`.
    pub fn typed(header: &Header, line_no: usize, line: &str) -> Result<Self, RecordError> {
        let fields = header.split(line_no, line)?
            .into_iter()
            .map(Field::typed)
            .collect();
        Ok(Self { fields })
    }

    #[must_use]
    pub fn field(&self, column: &Column) -> &Field {
        &self.fields[column.index]
    }

    /// Interpret the value of `column` as a sequencing measurement.
    ///
    /// # Errors
    /// - `InvalidReading` if the value is neither numeric nor the `na` sentinel.
    pub fn reading(&self, column: &Column) -> Result<Reading, RecordError> {
        let field = self.field(column);
        field.reading().ok_or_else(|| RecordError::InvalidReading {
            column: column.name.clone(),
            value : field.to_string()
        })
    }

    /// Check whether the value of `column` is exactly the provided text.
    #[must_use]
    pub fn text_equals(&self, column: &Column, text: &str) -> bool {
        self.field(column).as_text() == Some(text)
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.iter().join("\t"))
    }
}
