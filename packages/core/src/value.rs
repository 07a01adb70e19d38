use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// How a request reached the code that is inspecting it.
///
/// Rendered by its variant name, e.g. `REQUEST`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum DispatcherType {
  Forward,
  Include,
  #[default]
  Request,
  Async,
  Error,
}

impl DispatcherType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Forward => "FORWARD",
      Self::Include => "INCLUDE",
      Self::Request => "REQUEST",
      Self::Async => "ASYNC",
      Self::Error => "ERROR",
    }
  }
}

impl fmt::Display for DispatcherType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A value that appears on the right hand side of a dump entry.
///
/// Attribute and property values are heterogeneous, so everything a request
/// exposes is funneled into this type and rendered through [`fmt::Display`]:
///
/// | Variant      | Rendering                      |
/// |--------------|--------------------------------|
/// | `Null`       | `null`                         |
/// | `Bool`       | `true` / `false`               |
/// | `Int`        | decimal                        |
/// | `Str`        | as-is                          |
/// | `Dispatcher` | variant name, e.g. `REQUEST`   |
/// | `List`       | `[a, b, c]`                    |
///
/// # Example
///
/// ```
/// use reqdump::Value;
///
/// assert_eq!(Value::from(None::<String>).to_string(), "null");
/// assert_eq!(Value::from(vec!["bar", "baz"]).to_string(), "[bar, baz]");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
  #[default]
  Null,
  Bool(bool),
  Int(i64),
  Str(String),
  Dispatcher(DispatcherType),
  List(Vec<Value>),
}

impl Value {
  /// Captures the textual form of any displayable value.
  pub fn display(value: impl fmt::Display) -> Self {
    Self::Str(value.to_string())
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Self::Null)
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Null => f.write_str("null"),
      Self::Bool(v) => write!(f, "{v}"),
      Self::Int(v) => write!(f, "{v}"),
      Self::Str(v) => f.write_str(v),
      Self::Dispatcher(v) => write!(f, "{v}"),
      Self::List(values) => {
        f.write_str("[")?;
        for (i, v) in values.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{v}")?;
        }
        f.write_str("]")
      }
    }
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

macro_rules! impl_from_int {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for Value {
        fn from(value: $ty) -> Self {
          Self::Int(value as i64)
        }
      }
    )*
  };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Self::Str(value.to_string())
  }
}

impl From<String> for Value {
  fn from(value: String) -> Self {
    Self::Str(value)
  }
}

impl From<DispatcherType> for Value {
  fn from(value: DispatcherType) -> Self {
    Self::Dispatcher(value)
  }
}

impl From<IpAddr> for Value {
  fn from(value: IpAddr) -> Self {
    Self::display(value)
  }
}

impl From<SocketAddr> for Value {
  fn from(value: SocketAddr) -> Self {
    Self::display(value)
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(v) => v.into(),
      None => Self::Null,
    }
  }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
  fn from(values: Vec<T>) -> Self {
    Self::List(values.into_iter().map(Into::into).collect())
  }
}
