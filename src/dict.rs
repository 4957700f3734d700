use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

/// Hashable subset of `Value` usable as a mapping key
///
/// Equality is per variant: `Boolean(true)` and `Integer(1)` are different keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    None,
    Integer(i128),
    String(String),
    Boolean(bool),
}

impl From<i128> for Key {
    fn from(i: i128) -> Self {
        Key::Integer(i)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Boolean(b)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::None => Value::None,
            Key::Integer(i) => Value::Integer(i),
            Key::String(s) => Value::String(s),
            Key::Boolean(b) => Value::Boolean(b),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dict {
    inner: BTreeMap<Key, Value>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `val` under `key`, returning the value it replaced
    ///
    /// The later insertion always wins.
    pub fn insert<K: Into<Key>, V: Into<Value>>(&mut self, key: K, val: V) -> Option<Value> {
        self.inner.insert(key.into(), val.into())
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.inner.contains_key(key)
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Like `get` but hands back `default` when `key` is absent
    pub fn get_or(&self, key: &Key, default: Value) -> Value {
        match self.inner.get(key) {
            Some(val) => val.clone(),
            None => default,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl fmt::Display for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .inner
            .iter()
            .map(|(k, v)| format!("{}: {}", Value::from(k.clone()).repr(), v.repr()))
            .collect::<Vec<_>>();

        write!(f, "{{{}}}", pairs.join(", "))
    }
}

#[cfg(test)]
fn fruit_dict() -> Dict {
    let mut dict = Dict::new();
    dict.insert(1_i128, "apple");
    dict.insert("orange", Value::list(vec![2_i128, 3, 4]));
    dict.insert(true, false);
    dict.insert(Key::None, "True");
    dict
}

#[test]
fn test_membership() {
    let dict = fruit_dict();

    assert!(dict.contains(&Key::from(1_i128)));
    assert!(dict.contains(&Key::from("orange")));
    assert!(dict.contains(&Key::None));
    assert!(!dict.contains(&Key::from(4_i128)));
    assert!(!dict.contains(&Key::from("apple")));
}

#[test]
fn test_bool_and_int_keys_are_distinct() {
    let dict = fruit_dict();

    assert_eq!(dict.len(), 4);
    assert_eq!(dict.get(&Key::from(1_i128)), Some(&Value::from("apple")));
    assert_eq!(dict.get(&Key::from(true)), Some(&Value::Boolean(false)));
    assert!(!dict.contains(&Key::from(false)));
    assert!(!dict.contains(&Key::from(0_i128)));
}

#[test]
fn test_lookup() {
    let dict = fruit_dict();

    assert_eq!(
        dict.get(&Key::from("orange")).expect("orange missing"),
        &Value::list(vec![2_i128, 3, 4])
    );
    assert_eq!(dict.get(&Key::None), Some(&Value::from("True")));
    assert_eq!(dict.get(&Key::from(12345_i128)), None);
    assert_eq!(
        dict.get_or(&Key::from(12345_i128), Value::from("not in dictionary")),
        Value::from("not in dictionary")
    );
    assert_eq!(dict.get_or(&Key::from(12345_i128), Value::None), Value::None);
    assert_eq!(
        dict.get_or(&Key::from(1_i128), Value::from("not in dictionary")),
        Value::from("apple")
    );
}

#[test]
fn test_later_insert_wins() {
    let mut dict = Dict::new();
    assert_eq!(dict.insert(1_i128, "apple"), None);
    assert_eq!(dict.insert(1_i128, "pear"), Some(Value::from("apple")));
    assert_eq!(dict.len(), 1);
    assert_eq!(dict.get(&Key::from(1_i128)), Some(&Value::from("pear")));
}

#[test]
fn test_display() {
    let dict = fruit_dict();
    assert_eq!(
        dict.to_string(),
        "{None: 'True', 1: 'apple', 'orange': [2, 3, 4], True: False}"
    );
}
