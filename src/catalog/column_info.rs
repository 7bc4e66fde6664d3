use crate::access::AttrType;
use serde::{Deserialize, Serialize};

/// Metadata for one column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: AttrType,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: AttrType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_info() {
        let col = ColumnInfo::new("id", AttrType::Int);
        assert_eq!(col.name, "id");
        assert_eq!(col.data_type, AttrType::Int);
    }
}
