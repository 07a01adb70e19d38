use crate::{Cookie, Error, Inspect, Property, Value};
use std::collections::HashMap;

/// In-memory request with case preserving names and scripted failures.
#[derive(Debug, Clone, Default)]
pub struct MockRequest {
  headers: Option<Vec<(String, String)>>,
  parameters: Option<Vec<(String, Vec<String>)>>,
  cookies: Option<Vec<Cookie>>,
  attributes: Option<Vec<(String, Value)>>,
  properties: HashMap<Property, Value>,
  failing: Option<Property>,
}

impl MockRequest {
  pub fn new() -> Self {
    Self {
      headers: Some(vec![]),
      parameters: Some(vec![]),
      cookies: Some(vec![]),
      attributes: Some(vec![]),
      ..Default::default()
    }
  }

  pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self
      .headers
      .get_or_insert_with(Vec::new)
      .push((name.into(), value.into()));
    self
  }

  pub fn parameter<I, S>(mut self, name: impl Into<String>, values: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .parameters
      .get_or_insert_with(Vec::new)
      .push((name.into(), values.into_iter().map(Into::into).collect()));
    self
  }

  pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self
      .cookies
      .get_or_insert_with(Vec::new)
      .push(Cookie::new(name, value));
    self
  }

  pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self
      .attributes
      .get_or_insert_with(Vec::new)
      .push((name.into(), value.into()));
    self
  }

  pub fn property(mut self, property: Property, value: impl Into<Value>) -> Self {
    self.properties.insert(property, value.into());
    self
  }

  pub fn failing_property(mut self, property: Property) -> Self {
    self.failing = Some(property);
    self
  }

  pub fn without_headers(mut self) -> Self {
    self.headers = None;
    self
  }

  pub fn without_parameters(mut self) -> Self {
    self.parameters = None;
    self
  }

  pub fn without_cookies(mut self) -> Self {
    self.cookies = None;
    self
  }

  pub fn without_attributes(mut self) -> Self {
    self.attributes = None;
    self
  }
}

fn names<T>(entries: &Option<Vec<(String, T)>>) -> Option<Vec<String>> {
  entries
    .as_ref()
    .map(|entries| entries.iter().map(|(name, _)| name.clone()).collect())
}

impl Inspect for MockRequest {
  fn header_names(&self) -> crate::Result<Option<Vec<String>>> {
    Ok(names(&self.headers))
  }

  fn header(&self, name: &str) -> crate::Result<Option<String>> {
    Ok(self.headers.as_ref().and_then(|headers| {
      headers
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.clone())
    }))
  }

  fn parameter_names(&self) -> crate::Result<Option<Vec<String>>> {
    Ok(names(&self.parameters))
  }

  fn parameter_values(&self, name: &str) -> crate::Result<Vec<String>> {
    Ok(
      self
        .parameters
        .iter()
        .flatten()
        .filter(|(n, _)| n == name)
        .flat_map(|(_, values)| values.iter().cloned())
        .collect(),
    )
  }

  fn cookies(&self) -> crate::Result<Option<Vec<Cookie>>> {
    Ok(self.cookies.clone())
  }

  fn attribute_names(&self) -> crate::Result<Option<Vec<String>>> {
    Ok(names(&self.attributes))
  }

  fn attribute(&self, name: &str) -> crate::Result<Value> {
    Ok(
      self
        .attributes
        .iter()
        .flatten()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.clone())
        .unwrap_or_default(),
    )
  }

  fn property(&self, property: Property) -> crate::Result<Value> {
    if self.failing == Some(property) {
      return Err(Error::accessor(property.name(), "scripted failure"));
    }
    Ok(self.properties.get(&property).cloned().unwrap_or_default())
  }
}
