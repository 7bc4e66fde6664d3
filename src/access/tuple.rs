use crate::access::value::Value;
use thiserror::Error;

/// Errors surfaced by the tuple interface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TupleError {
    #[error("cell not found: {table}.{column}")]
    CellNotFound { table: String, column: String },
}

/// Result type for tuple operations.
pub type TupleResult<T> = Result<T, TupleError>;

/// Locator for a column within a tuple, optionally carrying a display
/// alias for result-set headers.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleCellSpec {
    table_name: String,
    field_name: String,
    alias: Option<String>,
}

impl TupleCellSpec {
    pub fn new(table_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            field_name: field_name.into(),
            alias: None,
        }
    }

    pub fn with_alias(
        table_name: impl Into<String>,
        field_name: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            field_name: field_name.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Display name for this cell: the alias when set, otherwise the
    /// column name.
    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.field_name)
    }
}

/// Read-only view over one logical row.
///
/// Implementations are supplied by the executor layer; the expression
/// subsystem only ever reads cells through this trait.
pub trait Tuple {
    /// Look up the value bound to `spec`.
    fn find_cell(&self, spec: &TupleCellSpec) -> TupleResult<Value>;
}

/// A materialized row: parallel spec/value vectors.
#[derive(Debug, Clone, Default)]
pub struct RowTuple {
    specs: Vec<TupleCellSpec>,
    values: Vec<Value>,
}

impl RowTuple {
    pub fn new(specs: Vec<TupleCellSpec>, values: Vec<Value>) -> Self {
        debug_assert_eq!(specs.len(), values.len());
        Self { specs, values }
    }

    pub fn push(&mut self, spec: TupleCellSpec, value: Value) {
        self.specs.push(spec);
        self.values.push(value);
    }
}

impl Tuple for RowTuple {
    fn find_cell(&self, spec: &TupleCellSpec) -> TupleResult<Value> {
        for (candidate, value) in self.specs.iter().zip(self.values.iter()) {
            if candidate.table_name() == spec.table_name()
                && candidate.field_name() == spec.field_name()
            {
                return Ok(value.clone());
            }
        }
        Err(TupleError::CellNotFound {
            table: spec.table_name().to_string(),
            column: spec.field_name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> RowTuple {
        RowTuple::new(
            vec![
                TupleCellSpec::new("t", "id"),
                TupleCellSpec::new("t", "name"),
            ],
            vec![Value::Int(1), Value::Chars("alice".to_string())],
        )
    }

    #[test]
    fn test_find_cell() {
        let row = sample_row();
        assert_eq!(
            row.find_cell(&TupleCellSpec::new("t", "id")).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            row.find_cell(&TupleCellSpec::new("t", "name")).unwrap(),
            Value::Chars("alice".to_string())
        );
    }

    #[test]
    fn test_find_cell_missing() {
        let row = sample_row();
        let err = row.find_cell(&TupleCellSpec::new("t", "age")).unwrap_err();
        assert_eq!(
            err,
            TupleError::CellNotFound {
                table: "t".to_string(),
                column: "age".to_string(),
            }
        );
        // Same column name under a different table is a different cell.
        assert!(row.find_cell(&TupleCellSpec::new("u", "id")).is_err());
    }

    #[test]
    fn test_alias_fallback() {
        let plain = TupleCellSpec::new("t", "id");
        assert_eq!(plain.alias(), "id");

        let aliased = TupleCellSpec::with_alias("t", "id", "user_id");
        assert_eq!(aliased.alias(), "user_id");
    }
}
