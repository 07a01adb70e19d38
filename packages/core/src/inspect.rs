use crate::{Property, Value};

/// A cookie sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
  name: String,
  value: String,
}

impl Cookie {
  pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn value(&self) -> &str {
    &self.value
  }
}

/// Read-only view of an inbound request.
///
/// This is everything [`RequestDump`](crate::RequestDump) needs to know about a
/// request. Collections return `Ok(None)` when the request has no such
/// collection at all, which is treated the same as an empty one.
///
/// Any error returned by an accessor aborts the dump and is handed to the
/// caller unchanged.
///
/// [`HttpInspector`](crate::HttpInspector) implements this trait for
/// [`http::Request`].
pub trait Inspect {
  /// Names of all headers on the request.
  fn header_names(&self) -> crate::Result<Option<Vec<String>>>;

  /// First value of the header with the given name.
  fn header(&self, name: &str) -> crate::Result<Option<String>>;

  /// Names of all query and form parameters.
  fn parameter_names(&self) -> crate::Result<Option<Vec<String>>>;

  /// Every value of the parameter with the given name, in arrival order.
  fn parameter_values(&self, name: &str) -> crate::Result<Vec<String>>;

  /// Cookies sent with the request, in the order the client sent them.
  /// Duplicated names are kept.
  fn cookies(&self) -> crate::Result<Option<Vec<Cookie>>>;

  /// Names of the attributes the server attached to the request.
  fn attribute_names(&self) -> crate::Result<Option<Vec<String>>>;

  /// Value of the named attribute, [`Value::Null`] when it is not set.
  fn attribute(&self, name: &str) -> crate::Result<Value>;

  /// Current value of a request property, [`Value::Null`] when the request
  /// has none.
  fn property(&self, property: Property) -> crate::Result<Value>;
}

impl<T: Inspect + ?Sized> Inspect for &T {
  fn header_names(&self) -> crate::Result<Option<Vec<String>>> {
    (**self).header_names()
  }

  fn header(&self, name: &str) -> crate::Result<Option<String>> {
    (**self).header(name)
  }

  fn parameter_names(&self) -> crate::Result<Option<Vec<String>>> {
    (**self).parameter_names()
  }

  fn parameter_values(&self, name: &str) -> crate::Result<Vec<String>> {
    (**self).parameter_values(name)
  }

  fn cookies(&self) -> crate::Result<Option<Vec<Cookie>>> {
    (**self).cookies()
  }

  fn attribute_names(&self) -> crate::Result<Option<Vec<String>>> {
    (**self).attribute_names()
  }

  fn attribute(&self, name: &str) -> crate::Result<Value> {
    (**self).attribute(name)
  }

  fn property(&self, property: Property) -> crate::Result<Value> {
    (**self).property(property)
  }
}
