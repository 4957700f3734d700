use std::fmt;

use anyhow::{anyhow, bail, Result};

use crate::errors::DivideByZero;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Intentional absence of any other value
    None,
    /// All integers are internally represented as 128 bit signed to keep things simple
    Integer(i128),
    String(String),
    Boolean(bool),
    /// Mutable ordered sequence. Only ever read in this program
    List(Vec<Value>),
    /// Fixed-length ordered sequence, never mutated after construction
    Tuple(Vec<Value>),
}

impl Value {
    pub fn short_display(&self) -> String {
        match self {
            Value::List(vec) => format!("list[{}]", vec.len()),
            Value::Tuple(vec) => format!("tuple[{}]", vec.len()),
            v => v.repr(),
        }
    }

    pub fn as_integer(&self) -> Result<i128> {
        match self {
            Value::Integer(i) => Ok(*i),
            v => bail!("Expected integer, got '{}'", v.short_display()),
        }
    }

    /// Borrow the elements of a list or a tuple
    pub fn as_vec(&self) -> Result<&[Value]> {
        match self {
            Value::List(vec) | Value::Tuple(vec) => Ok(vec),
            v => bail!("Expected list or tuple, got '{}'", v.short_display()),
        }
    }

    /// Integer division rounding toward negative infinity
    ///
    /// A zero divisor fails with `DivideByZero` so callers can recover from it specifically.
    pub fn divide(&self, rhs: &Value) -> Result<Value> {
        let lhs_val = self.as_integer()?;
        let rhs_val = rhs.as_integer()?;

        if rhs_val == 0 {
            return Err(anyhow!(DivideByZero));
        }

        let quot = lhs_val
            .checked_div(rhs_val)
            .ok_or_else(|| anyhow!("{} / {} overflows", lhs_val, rhs_val))?;
        // Truncating division rounds toward zero; pull inexact negative quotients down
        let floored = if (lhs_val % rhs_val != 0) && ((lhs_val < 0) != (rhs_val < 0)) {
            quot - 1
        } else {
            quot
        };

        Ok(Value::Integer(floored))
    }

    /// Unambiguous rendering, the one used for elements inside containers
    ///
    /// Strings are quoted, single quotes preferred; everything else renders like `Display`.
    pub fn repr(&self) -> String {
        match self {
            Value::String(s) => {
                let escaped = s.replace('\\', "\\\\");
                if s.contains('\'') && !s.contains('"') {
                    format!("\"{}\"", escaped)
                } else {
                    format!("'{}'", escaped.replace('\'', "\\'"))
                }
            }
            v => v.to_string(),
        }
    }

    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }
}

fn join_repr(vals: &[Value]) -> String {
    vals.iter().map(Value::repr).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => {
                write!(f, "{}", if *b { "True" } else { "False" })
            }
            Value::List(vec) => write!(f, "[{}]", join_repr(vec)),
            // A single element tuple keeps its trailing comma so it doesn't read as a
            // parenthesized expression
            Value::Tuple(vec) if vec.len() == 1 => write!(f, "({},)", vec[0].repr()),
            Value::Tuple(vec) => write!(f, "({})", join_repr(vec)),
        }
    }
}

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[test]
fn test_display() {
    let tests = vec![
        (Value::None, "None"),
        (Value::Integer(-42), "-42"),
        (Value::from("apple"), "apple"),
        (Value::Boolean(true), "True"),
        (Value::Boolean(false), "False"),
        (Value::list(vec![2_i128, 3, 4]), "[2, 3, 4]"),
        (Value::list(Vec::<i128>::new()), "[]"),
        (
            Value::tuple(vec!["one", "two", "three"]),
            "('one', 'two', 'three')",
        ),
        (Value::tuple(vec!["spam"]), "('spam',)"),
        (Value::tuple(Vec::<i128>::new()), "()"),
        (
            Value::List(vec![
                Value::None,
                Value::Boolean(false),
                Value::list(vec![1_i128]),
                Value::from("it's"),
                Value::from(r#"it's "quoted""#),
            ]),
            r#"[None, False, [1], "it's", 'it\'s "quoted"']"#,
        ),
    ];

    for (val, expected) in tests {
        assert_eq!(val.to_string(), expected);
    }
}

#[test]
fn test_accessors() {
    assert_eq!(Value::Integer(3).as_integer().expect("not int"), 3);
    assert_eq!(
        Value::tuple(vec![1_i128, 2]).as_vec().expect("not vec"),
        &[Value::Integer(1), Value::Integer(2)]
    );

    let err = Value::from("eggs").as_integer().unwrap_err();
    assert_eq!(err.to_string(), "Expected integer, got ''eggs''");
    let err = Value::list(vec![1_i128, 2, 3]).as_integer().unwrap_err();
    assert_eq!(err.to_string(), "Expected integer, got 'list[3]'");
    assert!(Value::None.as_vec().is_err());
}

#[test]
fn test_divide() {
    let tests = vec![(7, 2, 3), (-7, 2, -4), (7, -2, -4), (-7, -2, 3), (6, 3, 2), (0, 5, 0)];

    for (lhs, rhs, expected) in tests {
        assert_eq!(
            Value::Integer(lhs)
                .divide(&Value::Integer(rhs))
                .expect("divide failed"),
            Value::Integer(expected)
        );
    }

    let err = Value::Integer(1).divide(&Value::Integer(0)).unwrap_err();
    assert!(err.is::<DivideByZero>());
    assert_eq!(err.to_string(), "Divide by zero");

    let err = Value::Integer(i128::MIN)
        .divide(&Value::Integer(-1))
        .unwrap_err();
    assert!(!err.is::<DivideByZero>());

    let err = Value::from("1").divide(&Value::Integer(0)).unwrap_err();
    assert!(!err.is::<DivideByZero>());
}
