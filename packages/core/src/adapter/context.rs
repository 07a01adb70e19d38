use crate::{DispatcherType, Value};
use std::net::SocketAddr;

/// Server assigned, request scoped attributes.
///
/// Insert it into the request extensions to have it dumped:
///
/// ```
/// use reqdump::Attributes;
///
/// let mut request = http::Request::new(Vec::<u8>::new());
/// request
///     .extensions_mut()
///     .insert(Attributes::new().with("user.id", 42).with("tenant", "acme"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
  entries: Vec<(String, Value)>,
}

impl Attributes {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets an attribute, replacing any previous value with the same name.
  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
    let name = name.into();
    let value = value.into();
    match self.entries.iter_mut().find(|(n, _)| *n == name) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((name, value)),
    }
    self
  }

  pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.insert(name, value);
    self
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self
      .entries
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, v)| v)
  }

  pub fn remove(&mut self, name: &str) -> Option<Value> {
    let i = self.entries.iter().position(|(n, _)| n == name)?;
    Some(self.entries.remove(i).1)
  }

  /// Attribute names in insertion order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(n, _)| n.as_str())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Connection and dispatch facts a server knows about a request that the
/// request itself does not carry.
///
/// Servers insert it into the request extensions. Every field is optional;
/// a request without a context reports `null`, `-1`, `false` or an empty path
/// for the affected properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
  pub local_addr: Option<SocketAddr>,
  pub local_name: Option<String>,
  pub remote_addr: Option<SocketAddr>,
  pub remote_host: Option<String>,
  pub remote_user: Option<String>,
  pub auth_type: Option<String>,
  pub scheme: Option<String>,
  pub context_path: String,
  pub servlet_path: String,
  pub dispatcher_type: DispatcherType,
  pub async_supported: bool,
  pub async_started: bool,
  pub session_valid: bool,
}

impl RequestContext {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn local_addr(mut self, addr: SocketAddr) -> Self {
    self.local_addr = Some(addr);
    self
  }

  pub fn local_name(mut self, name: impl Into<String>) -> Self {
    self.local_name = Some(name.into());
    self
  }

  pub fn remote_addr(mut self, addr: SocketAddr) -> Self {
    self.remote_addr = Some(addr);
    self
  }

  pub fn remote_host(mut self, host: impl Into<String>) -> Self {
    self.remote_host = Some(host.into());
    self
  }

  /// Records an authenticated user and the scheme used to authenticate it,
  /// e.g. `BASIC`.
  pub fn authenticated(mut self, auth_type: impl Into<String>, user: impl Into<String>) -> Self {
    self.auth_type = Some(auth_type.into());
    self.remote_user = Some(user.into());
    self
  }

  /// Scheme of the listener that accepted the connection, used when the
  /// request target carries none.
  pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
    self.scheme = Some(scheme.into());
    self
  }

  pub fn context_path(mut self, path: impl Into<String>) -> Self {
    self.context_path = path.into();
    self
  }

  pub fn servlet_path(mut self, path: impl Into<String>) -> Self {
    self.servlet_path = path.into();
    self
  }

  pub fn dispatcher_type(mut self, dispatcher_type: DispatcherType) -> Self {
    self.dispatcher_type = dispatcher_type;
    self
  }

  pub fn async_supported(mut self, supported: bool) -> Self {
    self.async_supported = supported;
    self
  }

  pub fn async_started(mut self, started: bool) -> Self {
    self.async_started = started;
    self
  }

  pub fn session_valid(mut self, valid: bool) -> Self {
    self.session_valid = valid;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn attributes_keep_insertion_order() {
    let attributes = Attributes::new().with("b", 1).with("a", 2).with("b", 3);
    assert_eq!(attributes.names().collect::<Vec<_>>(), ["b", "a"]);
    assert_eq!(attributes.get("b"), Some(&Value::Int(3)));
    assert_eq!(attributes.len(), 2);
  }

  #[test]
  fn remove_attribute() {
    let mut attributes = Attributes::new().with("a", "x");
    assert_eq!(attributes.remove("a"), Some(Value::from("x")));
    assert_eq!(attributes.remove("a"), None);
    assert!(attributes.is_empty());
  }
}
