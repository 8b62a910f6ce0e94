//! Parameter values and the ordered parameter map passed to requests.

use std::fmt;

/// A single primitive parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Read a decoded query value back into a scalar.
    ///
    /// A value only becomes a number when that number renders back to the
    /// exact same text, so `007`, `1.0` or `1e3` stay strings and re-sign
    /// unchanged. `inf`, `NaN` and the like are never numbers.
    pub fn parse(s: &str) -> Self {
        if let Ok(n) = s.parse::<i64>() {
            if n.to_string() == s {
                return Scalar::Int(n);
            }
        }

        let numeric = s.chars().any(|c| c.is_ascii_digit())
            && s
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '-' | '.'));
        if numeric {
            if let Ok(f) = s.parse::<f64>() {
                if f.to_string() == s {
                    return Scalar::Float(f);
                }
            }
        }

        Scalar::Str(s.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::Str(s.clone())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

macro_rules! scalar_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Scalar {
            fn from(n: $t) -> Self {
                Scalar::Int(i64::from(n))
            }
        })*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! scalar_from_wide_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Scalar {
            fn from(n: $t) -> Self {
                match i64::try_from(n) {
                    Ok(n) => Scalar::Int(n),
                    Err(_) => Scalar::Str(n.to_string()),
                }
            }
        })*
    };
}

scalar_from_wide_int!(u64, usize, isize);

/// A parameter value: one scalar or an ordered list of them.
///
/// A one-element list stays a list. It signs to a single token and renders
/// as `filter[name][]=v`, never as a bare scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl FilterValue {
    /// All values in order: the scalar alone, or every list element.
    pub fn values(&self) -> &[Scalar] {
        match self {
            FilterValue::Scalar(s) => std::slice::from_ref(s),
            FilterValue::List(items) => items,
        }
    }

    /// Whether this value is a list (of any length).
    pub fn is_list(&self) -> bool {
        matches!(self, FilterValue::List(_))
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Scalar(s) => write!(f, "{}", s),
            FilterValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! filter_value_from_scalar {
    ($($t:ty),*) => {
        $(impl From<$t> for FilterValue {
            fn from(value: $t) -> Self {
                FilterValue::Scalar(value.into())
            }
        })*
    };
}

filter_value_from_scalar!(
    Scalar, &str, String, &String, bool, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize
);

impl<T: Into<Scalar>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for FilterValue {
    fn from(values: [T; N]) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar> + Clone> From<&[T]> for FilterValue {
    fn from(values: &[T]) -> Self {
        FilterValue::List(values.iter().cloned().map(Into::into).collect())
    }
}

/// Named request parameters in insertion order.
///
/// The names `page_size`, `page_number`, `order`, `key` and `digest` are
/// structural; every other name is a filter.
///
/// ```rust,ignore
/// let params = QueryParams::new()
///     .with("order", "profile-type")
///     .with("mention_sources_types", ["type:policy", "type:blog"])
///     .with("timeframe", "at");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, FilterValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name` to `value`. An existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}
