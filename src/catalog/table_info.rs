use crate::catalog::column_info::ColumnInfo;
use serde::{Deserialize, Serialize};

/// Metadata for one table.
///
/// The first `sys_column_num` columns are system-managed (row headers,
/// transaction bookkeeping) and are never touched by user-level plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub sys_column_num: usize,
}

impl TableInfo {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        Self {
            name: name.into(),
            columns,
            sys_column_num: 0,
        }
    }

    pub fn with_sys_columns(
        name: impl Into<String>,
        columns: Vec<ColumnInfo>,
        sys_column_num: usize,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            sys_column_num,
        }
    }

    /// Columns visible to user statements, skipping the system prefix.
    pub fn user_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().skip(self.sys_column_num)
    }

    /// Look up a user column by name.
    pub fn user_column(&self, name: &str) -> Option<&ColumnInfo> {
        self.user_columns().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AttrType;

    #[test]
    fn test_user_columns_skip_system_prefix() {
        let table = TableInfo::with_sys_columns(
            "t",
            vec![
                ColumnInfo::new("__trx", AttrType::Int),
                ColumnInfo::new("id", AttrType::Int),
                ColumnInfo::new("name", AttrType::Chars),
            ],
            1,
        );
        let names: Vec<&str> = table.user_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name"]);
        assert!(table.user_column("__trx").is_none());
        assert!(table.user_column("id").is_some());
    }
}
