use crate::access::AttrType;
use crate::catalog::{ColumnInfo, TableInfo};
use std::sync::Arc;

/// A column bound to its table.
///
/// Fields are the leaves the analyzer resolves column references into;
/// expressions and plan operators address tuple cells through them.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    table: Arc<TableInfo>,
    column: ColumnInfo,
}

impl Field {
    pub fn new(table: Arc<TableInfo>, column: ColumnInfo) -> Self {
        Self { table, column }
    }

    pub fn table_name(&self) -> &str {
        &self.table.name
    }

    pub fn field_name(&self) -> &str {
        &self.column.name
    }

    pub fn attr_type(&self) -> AttrType {
        self.column.data_type
    }

    pub fn table(&self) -> &Arc<TableInfo> {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_accessors() {
        let table = Arc::new(TableInfo::new(
            "users",
            vec![ColumnInfo::new("age", AttrType::Int)],
        ));
        let field = Field::new(table.clone(), table.columns[0].clone());
        assert_eq!(field.table_name(), "users");
        assert_eq!(field.field_name(), "age");
        assert_eq!(field.attr_type(), AttrType::Int);
    }
}
