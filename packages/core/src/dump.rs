use crate::{Cookie, Error, Inspect, Property, Value};
use std::fmt;

/// Minimum width of the name column of a dump entry.
pub const NAME_WIDTH: usize = 30;

/// Appends `value` followed by a line terminator.
pub(crate) fn append_line<W: fmt::Write + ?Sized>(
  w: &mut W,
  value: impl fmt::Display,
) -> fmt::Result {
  writeln!(w, "{value}")
}

/// Appends `name = value`, with `name` left justified to [`NAME_WIDTH`].
///
/// Longer names are written in full.
pub(crate) fn append_entry<W: fmt::Write + ?Sized>(
  w: &mut W,
  name: &str,
  value: impl fmt::Display,
) -> fmt::Result {
  writeln!(w, "{name:<width$} = {value}", width = NAME_WIDTH)
}

/// The sections of a dump, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SectionKind {
  Header,
  Parameter,
  Cookies,
  Attributes,
  Properties,
}

impl SectionKind {
  /// Returns the label line of the section.
  ///
  /// The labels are kept byte for byte as existing log consumers expect them,
  /// including the inconsistent trailing spaces.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Header => "Header: ",
      Self::Parameter => "Parameter:",
      Self::Cookies => "Cookies: ",
      Self::Attributes => "Attributes: ",
      Self::Properties => "Properties:",
    }
  }

  fn is_terminated(&self) -> bool {
    !matches!(self, Self::Properties)
  }
}

/// A single `name = value` line of a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entry {
  name: String,
  value: Value,
}

impl Entry {
  pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn value(&self) -> &Value {
    &self.value
  }
}

/// A labeled group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
  kind: SectionKind,
  entries: Vec<Entry>,
}

impl Section {
  pub fn kind(&self) -> SectionKind {
    self.kind
  }

  pub fn label(&self) -> &'static str {
    self.kind.label()
  }

  pub fn entries(&self) -> &[Entry] {
    &self.entries
  }

  fn write_to<W: fmt::Write + ?Sized>(&self, w: &mut W) -> fmt::Result {
    append_line(w, self.label())?;
    for entry in &self.entries {
      append_entry(w, entry.name(), entry.value())?;
    }
    if self.kind.is_terminated() {
      append_line(w, "")?;
    }
    Ok(())
  }
}

/// Structured form of a request dump.
///
/// Its [`Display`](fmt::Display) output is the dump text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
  sections: Vec<Section>,
}

impl Report {
  pub fn sections(&self) -> &[Section] {
    &self.sections
  }

  pub fn section(&self, kind: SectionKind) -> Option<&Section> {
    self.sections.iter().find(|s| s.kind == kind)
  }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for section in &self.sections {
      section.write_to(f)?;
    }
    Ok(())
  }
}

/// Dumps the headers, parameters, cookies, attributes and properties of a
/// request for diagnostic purposes.
///
/// # Example
///
/// ```
/// use reqdump::{HttpInspector, RequestDump};
///
/// let request = http::Request::builder()
///     .uri("http://localhost:8080/app?foo=bar")
///     .header("Accept", "text/html")
///     .body(Vec::<u8>::new())
///     .unwrap();
///
/// let inspector = HttpInspector::new(&request);
/// let text = RequestDump::new(Some(&inspector)).unwrap().dump().unwrap();
/// assert!(text.starts_with("Header: \naccept"));
/// ```
pub struct RequestDump<'a, R: Inspect + ?Sized> {
  request: &'a R,
}

impl<'a, R: Inspect + ?Sized> RequestDump<'a, R> {
  /// Prepares a dump of `request`.
  ///
  /// Fails with [`Error::InvalidArgument`] when no request is given.
  pub fn new(request: Option<&'a R>) -> crate::Result<Self> {
    let request = request.ok_or(Error::InvalidArgument("request must not be null"))?;
    Ok(Self { request })
  }

  /// Reads the request and returns the dump text.
  pub fn dump(&self) -> crate::Result<String> {
    let report = self.report()?;
    let mut text = String::with_capacity(2048);
    fmt::Write::write_fmt(&mut text, format_args!("{report}"))?;
    Ok(text)
  }

  /// Reads the request and returns the structured dump.
  pub fn report(&self) -> crate::Result<Report> {
    let request = self.request;
    let mut sections = Vec::with_capacity(5);

    sections.extend(collect_section(
      SectionKind::Header,
      request.header_names()?,
      |name| name.clone(),
      |name| Ok(Value::from(request.header(name)?)),
    )?);
    sections.extend(collect_section(
      SectionKind::Parameter,
      request.parameter_names()?,
      |name| name.clone(),
      |name| {
        let mut values = request.parameter_values(name)?;
        if values.len() == 1 {
          return Ok(Value::from(values.remove(0)));
        }
        Ok(Value::from(values))
      },
    )?);
    sections.extend(collect_section(
      SectionKind::Cookies,
      request.cookies()?,
      |cookie: &Cookie| cookie.name().to_string(),
      |cookie| Ok(Value::from(cookie.value())),
    )?);
    sections.extend(collect_section(
      SectionKind::Attributes,
      request.attribute_names()?,
      |name| name.clone(),
      |name| request.attribute(name),
    )?);

    let mut properties = Vec::with_capacity(Property::ALL.len());
    for property in Property::ALL {
      properties.push(Entry::new(property.name(), request.property(*property)?));
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(
      section = SectionKind::Properties.label(),
      entries = properties.len(),
      "collected section"
    );
    sections.push(Section {
      kind: SectionKind::Properties,
      entries: properties,
    });

    Ok(Report { sections })
  }
}

/// Dumps `request`. See [`RequestDump`].
pub fn dump<R: Inspect + ?Sized>(request: &R) -> crate::Result<String> {
  RequestDump::new(Some(request))?.dump()
}

/// Dumps `request` and emits the text as a single `debug` event.
#[cfg(feature = "tracing")]
pub fn log_request<R: Inspect + ?Sized>(request: &R) -> crate::Result<()> {
  let text = dump(request)?;
  tracing::debug!(target: "reqdump", "request dump:\n{text}");
  Ok(())
}

fn collect_section<T, N, V>(
  kind: SectionKind,
  source: Option<Vec<T>>,
  name_of: N,
  value_of: V,
) -> crate::Result<Option<Section>>
where
  N: Fn(&T) -> String,
  V: Fn(&T) -> crate::Result<Value>,
{
  let source = match source {
    Some(source) if !source.is_empty() => source,
    _ => return Ok(None),
  };
  let mut keyed = source
    .into_iter()
    .map(|element| (name_of(&element), element))
    .collect::<Vec<_>>();
  // stable, so duplicate names keep their source order
  keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

  let mut entries = Vec::with_capacity(keyed.len());
  for (name, element) in keyed {
    let value = value_of(&element)?;
    entries.push(Entry { name, value });
  }
  #[cfg(feature = "tracing")]
  tracing::trace!(section = kind.label(), entries = entries.len(), "collected section");
  Ok(Some(Section { kind, entries }))
}
