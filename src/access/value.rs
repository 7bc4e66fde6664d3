use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Tolerance used when comparing floats and when detecting a near-zero
/// divisor.
pub const EPSILON: f64 = 1e-6;

/// Value kinds supported by the engine.
///
/// `Undefined` marks a slot that has never been assigned (the initial
/// state of aggregate accumulators); `Null` is the SQL null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrType {
    Undefined,
    Null,
    Int,
    Float,
    Bool,
    Chars,
}

/// A single column value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Undefined,
    Null,
    Int(i32),
    Float(f64),
    Bool(bool),
    Chars(String),
}

impl Value {
    /// Get the kind tag of this value.
    pub fn attr_type(&self) -> AttrType {
        match self {
            Value::Undefined => AttrType::Undefined,
            Value::Null => AttrType::Null,
            Value::Int(_) => AttrType::Int,
            Value::Float(_) => AttrType::Float,
            Value::Bool(_) => AttrType::Bool,
            Value::Chars(_) => AttrType::Chars,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Compare two values.
    ///
    /// Total within one non-null kind. An `Int`/`Float` mix is compared
    /// after promotion to `f64`; floats within [`EPSILON`] of each other
    /// are equal. Any other pairing (null, undefined, cross-kind) is
    /// incomparable and returns `None`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Float(b)) => Some(compare_float(f64::from(*a), *b)),
            (Value::Float(a), Value::Int(b)) => Some(compare_float(*a, f64::from(*b))),
            (Value::Float(a), Value::Float(b)) => Some(compare_float(*a, *b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Chars(a), Value::Chars(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Numeric view of this value as an integer. Non-numeric kinds read
    /// as zero; the planner guarantees arithmetic operands are numeric.
    pub fn get_int(&self) -> i32 {
        match self {
            Value::Int(i) => *i,
            Value::Float(f) => *f as i32,
            Value::Bool(b) => i32::from(*b),
            _ => 0,
        }
    }

    /// Numeric view of this value as a float.
    pub fn get_float(&self) -> f64 {
        match self {
            Value::Int(i) => f64::from(*i),
            Value::Float(f) => *f,
            Value::Bool(b) => f64::from(u8::from(*b)),
            _ => 0.0,
        }
    }

    /// Boolean interpretation: numerics are truthy when non-zero,
    /// booleans are themselves. Other kinds have no boolean reading.
    pub fn get_boolean(&self) -> Option<bool> {
        match self {
            Value::Int(i) => Some(*i != 0),
            Value::Float(f) => Some(f.abs() >= EPSILON),
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

fn compare_float(a: f64, b: f64) -> Ordering {
    if (a - b).abs() < EPSILON {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "UNDEFINED"),
            Value::Null => write!(f, "NULL"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Chars(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_type() {
        assert_eq!(Value::Undefined.attr_type(), AttrType::Undefined);
        assert_eq!(Value::Null.attr_type(), AttrType::Null);
        assert_eq!(Value::Int(1).attr_type(), AttrType::Int);
        assert_eq!(Value::Float(1.5).attr_type(), AttrType::Float);
        assert_eq!(Value::Bool(true).attr_type(), AttrType::Bool);
        assert_eq!(Value::Chars("x".to_string()).attr_type(), AttrType::Chars);
    }

    #[test]
    fn test_compare_same_kind() {
        assert_eq!(Value::Int(1).compare(&Value::Int(2)), Some(Ordering::Less));
        assert_eq!(Value::Int(2).compare(&Value::Int(2)), Some(Ordering::Equal));
        assert_eq!(
            Value::Chars("abc".to_string()).compare(&Value::Chars("abd".to_string())),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Bool(false).compare(&Value::Bool(true)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_compare_numeric_promotion() {
        assert_eq!(
            Value::Int(2).compare(&Value::Float(1.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::Float(2.0).compare(&Value::Int(2)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_compare_float_epsilon() {
        let a = Value::Float(1.0);
        let b = Value::Float(1.0 + EPSILON / 2.0);
        assert_eq!(a.compare(&b), Some(Ordering::Equal));

        let c = Value::Float(1.0 + EPSILON * 10.0);
        assert_eq!(a.compare(&c), Some(Ordering::Less));
    }

    #[test]
    fn test_compare_incomparable() {
        assert_eq!(Value::Null.compare(&Value::Int(1)), None);
        assert_eq!(Value::Int(1).compare(&Value::Null), None);
        assert_eq!(Value::Int(1).compare(&Value::Chars("1".to_string())), None);
        assert_eq!(Value::Undefined.compare(&Value::Undefined), None);
    }

    #[test]
    fn test_get_boolean() {
        assert_eq!(Value::Int(0).get_boolean(), Some(false));
        assert_eq!(Value::Int(-3).get_boolean(), Some(true));
        assert_eq!(Value::Float(0.0).get_boolean(), Some(false));
        assert_eq!(Value::Float(0.25).get_boolean(), Some(true));
        assert_eq!(Value::Bool(true).get_boolean(), Some(true));
        assert_eq!(Value::Null.get_boolean(), None);
        assert_eq!(Value::Chars("true".to_string()).get_boolean(), None);
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(Value::Int(7).get_float(), 7.0);
        assert_eq!(Value::Float(7.9).get_int(), 7);
        assert_eq!(Value::Bool(true).get_int(), 1);
    }
}
