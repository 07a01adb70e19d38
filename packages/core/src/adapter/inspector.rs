use super::context::{Attributes, RequestContext};
use super::parse::{
  Parameters, charset, parse_cookies, parse_parameters, path_parameter, percent_decode,
  preferred_locale, strip_path_parameters, strip_path_prefix,
};
use crate::{Cookie, Inspect, InspectOptions, Property, Value};
use http::Request;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST};
use http::uri::Authority;

/// Where the requested session id was found.
enum SessionIdSource {
  Cookie,
  Url,
}

/// [`Inspect`] implementation for [`http::Request`].
///
/// Headers, parameters and cookies come from the request itself. Attributes
/// come from an [`Attributes`] value in the request extensions, and
/// connection level properties from a [`RequestContext`] there.
///
/// # Example
///
/// ```
/// use reqdump::{HttpInspector, RequestContext};
///
/// let mut request = http::Request::builder()
///     .method("POST")
///     .uri("/shop/cart?item=42")
///     .header("Host", "shop.example.com")
///     .body(Vec::<u8>::new())
///     .unwrap();
/// request.extensions_mut().insert(
///     RequestContext::new()
///         .remote_addr("10.0.0.7:52110".parse().unwrap())
///         .context_path("/shop"),
/// );
///
/// let text = reqdump::dump(&HttpInspector::new(&request)).unwrap();
/// ```
pub struct HttpInspector<'a, B> {
  request: &'a Request<B>,
  context: Option<&'a RequestContext>,
  attributes: Option<&'a Attributes>,
  parameters: Parameters,
  cookies: crate::Result<Vec<Cookie>>,
  session_id: Option<(String, SessionIdSource)>,
  options: InspectOptions,
}

impl<'a, B: AsRef<[u8]>> HttpInspector<'a, B> {
  pub fn new(request: &'a Request<B>) -> Self {
    Self::new_with_options(request, InspectOptions::default())
  }

  pub fn new_with_options(request: &'a Request<B>, options: InspectOptions) -> Self {
    let parameters = parse_parameters(
      request.uri().query(),
      request.headers(),
      request.body().as_ref(),
    );
    let cookies = parse_cookies(request.headers());
    let session_id = requested_session_id(request, cookies.as_deref().ok(), &options);
    Self {
      request,
      context: request.extensions().get::<RequestContext>(),
      attributes: request.extensions().get::<Attributes>(),
      parameters,
      cookies,
      session_id,
      options,
    }
  }
}

/// The session id cookie wins over the session path parameter.
fn requested_session_id<B>(
  request: &Request<B>,
  cookies: Option<&[Cookie]>,
  options: &InspectOptions,
) -> Option<(String, SessionIdSource)> {
  let from_cookie = cookies
    .unwrap_or_default()
    .iter()
    .find(|c| c.name() == options.session_cookie_name);
  if let Some(cookie) = from_cookie {
    return Some((cookie.value().to_string(), SessionIdSource::Cookie));
  }
  path_parameter(request.uri().path(), &options.session_path_parameter)
    .map(|id| (id.to_string(), SessionIdSource::Url))
}

impl<B> HttpInspector<'_, B> {
  pub fn options(&self) -> &InspectOptions {
    &self.options
  }

  fn header_str(&self, name: http::header::HeaderName) -> Option<&str> {
    self.request.headers().get(name)?.to_str().ok()
  }

  fn context_path(&self) -> &str {
    self.context.map(|c| c.context_path.as_str()).unwrap_or_default()
  }

  fn servlet_path(&self) -> &str {
    self.context.map(|c| c.servlet_path.as_str()).unwrap_or_default()
  }

  fn scheme(&self) -> String {
    if let Some(scheme) = self.request.uri().scheme_str() {
      return scheme.to_ascii_lowercase();
    }
    self
      .context
      .and_then(|c| c.scheme.clone())
      .unwrap_or_else(|| "http".to_string())
  }

  fn path_info(&self) -> Option<String> {
    let path = strip_path_parameters(self.request.uri().path());
    let rest = strip_path_prefix(&path, self.context_path())?;
    let rest = strip_path_prefix(rest, self.servlet_path())?;
    if rest.is_empty() {
      return None;
    }
    Some(percent_decode(rest))
  }

  fn path_translated(&self) -> Option<String> {
    let root = self.options.document_root.as_ref()?;
    let path_info = self.path_info()?;
    Some(
      root
        .join(path_info.trim_start_matches('/'))
        .to_string_lossy()
        .into_owned(),
    )
  }

  /// Host and port the client addressed, from `Host`, then the request
  /// target, then the accepting socket.
  fn server_authority(&self) -> (Option<String>, Option<u16>) {
    let from_host = self
      .header_str(HOST)
      .and_then(|host| host.parse::<Authority>().ok());
    if let Some(authority) = from_host.as_ref().or(self.request.uri().authority()) {
      return (Some(authority.host().to_string()), authority.port_u16());
    }
    match self.context {
      Some(context) => (
        context
          .local_name
          .clone()
          .or_else(|| context.local_addr.map(|a| a.ip().to_string())),
        context.local_addr.map(|a| a.port()),
      ),
      None => (None, None),
    }
  }

  fn server_port(&self) -> i64 {
    match self.server_authority().1 {
      Some(port) => port.into(),
      None if self.scheme() == "https" => 443,
      None => 80,
    }
  }

  fn content_length(&self) -> i64 {
    self
      .header_str(CONTENT_LENGTH)
      .and_then(|v| v.trim().parse::<i64>().ok())
      .unwrap_or(-1)
  }

  fn parsed_cookies(&self) -> crate::Result<&[Cookie]> {
    match &self.cookies {
      Ok(cookies) => Ok(cookies.as_slice()),
      // `Error` is not `Clone`, parse again for an owned error.
      Err(_) => parse_cookies(self.request.headers()).map(|_| &[][..]),
    }
  }

  /// Fails like the cookie section does when the `Cookie` header is malformed.
  fn requested_session_id(&self) -> crate::Result<Option<&(String, SessionIdSource)>> {
    self.parsed_cookies()?;
    Ok(self.session_id.as_ref())
  }
}

impl<B> Inspect for HttpInspector<'_, B> {
  fn header_names(&self) -> crate::Result<Option<Vec<String>>> {
    let names = self
      .request
      .headers()
      .keys()
      .map(|name| name.as_str().to_string())
      .collect();
    Ok(Some(names))
  }

  fn header(&self, name: &str) -> crate::Result<Option<String>> {
    Ok(
      self
        .request
        .headers()
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned()),
    )
  }

  fn parameter_names(&self) -> crate::Result<Option<Vec<String>>> {
    Ok(Some(
      self.parameters.iter().map(|(n, _)| n.clone()).collect(),
    ))
  }

  fn parameter_values(&self, name: &str) -> crate::Result<Vec<String>> {
    Ok(
      self
        .parameters
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, values)| values.clone())
        .unwrap_or_default(),
    )
  }

  fn cookies(&self) -> crate::Result<Option<Vec<Cookie>>> {
    self.parsed_cookies().map(|cookies| Some(cookies.to_vec()))
  }

  fn attribute_names(&self) -> crate::Result<Option<Vec<String>>> {
    Ok(
      self
        .attributes
        .map(|attributes| attributes.names().map(str::to_string).collect()),
    )
  }

  fn attribute(&self, name: &str) -> crate::Result<Value> {
    Ok(
      self
        .attributes
        .and_then(|attributes| attributes.get(name))
        .cloned()
        .unwrap_or_default(),
    )
  }

  fn property(&self, property: Property) -> crate::Result<Value> {
    let request = self.request;
    let context = self.context;
    let value: Value = match property {
      Property::AsyncStarted => context.is_some_and(|c| c.async_started).into(),
      Property::AsyncSupported => context.is_some_and(|c| c.async_supported).into(),
      Property::AuthType => context.and_then(|c| c.auth_type.clone()).into(),
      Property::CharacterEncoding => charset(request.headers()).into(),
      Property::ContentLength => self.content_length().into(),
      Property::ContentType => self.header_str(CONTENT_TYPE).into(),
      Property::ContextPath => self.context_path().into(),
      Property::DispatcherType => context.map(|c| c.dispatcher_type).unwrap_or_default().into(),
      Property::LocalAddr => context.and_then(|c| c.local_addr).map(|a| a.ip()).into(),
      Property::LocalName => context
        .and_then(|c| {
          c.local_name
            .clone()
            .or_else(|| c.local_addr.map(|a| a.ip().to_string()))
        })
        .into(),
      Property::LocalPort => port_or_unknown(context.and_then(|c| c.local_addr).map(|a| a.port())),
      Property::Locale => preferred_locale(request.headers())
        .unwrap_or_else(|| self.options.default_locale.clone())
        .into(),
      Property::Method => request.method().as_str().into(),
      Property::PathInfo => self.path_info().into(),
      Property::PathTranslated => self.path_translated().into(),
      Property::Protocol => Value::display(format_args!("{:?}", request.version())),
      Property::QueryString => request.uri().query().into(),
      Property::RemoteAddr => context.and_then(|c| c.remote_addr).map(|a| a.ip()).into(),
      Property::RemoteHost => context
        .and_then(|c| {
          c.remote_host
            .clone()
            .or_else(|| c.remote_addr.map(|a| a.ip().to_string()))
        })
        .into(),
      Property::RemotePort => {
        port_or_unknown(context.and_then(|c| c.remote_addr).map(|a| a.port()))
      }
      Property::RemoteUser => context.and_then(|c| c.remote_user.clone()).into(),
      Property::RequestedSessionId => self.requested_session_id()?.map(|(id, _)| id.as_str()).into(),
      Property::RequestedSessionIdFromCookie => matches!(
        self.requested_session_id()?,
        Some((_, SessionIdSource::Cookie))
      )
      .into(),
      Property::RequestedSessionIdFromUrl => {
        matches!(self.requested_session_id()?, Some((_, SessionIdSource::Url))).into()
      }
      Property::RequestedSessionIdValid => context.is_some_and(|c| c.session_valid).into(),
      Property::RequestUri => request.uri().path().into(),
      Property::Scheme => self.scheme().into(),
      Property::Secure => (self.scheme() == "https").into(),
      Property::ServerName => self.server_authority().0.into(),
      Property::ServerPort => self.server_port().into(),
      Property::ServletPath => self.servlet_path().into(),
    };
    Ok(value)
  }
}

fn port_or_unknown(port: Option<u16>) -> Value {
  port.map_or(Value::Int(-1), Value::from)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{DispatcherType, RequestDump, SectionKind};
  use std::collections::HashMap;

  fn properties<B>(inspector: &HttpInspector<'_, B>) -> HashMap<&'static str, String> {
    Property::ALL
      .iter()
      .map(|p| (p.name(), inspector.property(*p).unwrap().to_string()))
      .collect()
  }

  #[test]
  fn bare_request() {
    let request = Request::new(Vec::<u8>::new());
    let inspector = HttpInspector::new(&request);
    let props = properties(&inspector);
    assert_eq!(props["asyncStarted"], "false");
    assert_eq!(props["authType"], "null");
    assert_eq!(props["contentLength"], "-1");
    assert_eq!(props["contextPath"], "");
    assert_eq!(props["dispatcherType"], "REQUEST");
    assert_eq!(props["localAddr"], "null");
    assert_eq!(props["localPort"], "-1");
    assert_eq!(props["locale"], "en_US");
    assert_eq!(props["method"], "GET");
    assert_eq!(props["pathInfo"], "/");
    assert_eq!(props["protocol"], "HTTP/1.1");
    assert_eq!(props["queryString"], "null");
    assert_eq!(props["requestedSessionId"], "null");
    assert_eq!(props["requestURI"], "/");
    assert_eq!(props["scheme"], "http");
    assert_eq!(props["secure"], "false");
    assert_eq!(props["serverName"], "null");
    assert_eq!(props["serverPort"], "80");

    let report = RequestDump::new(Some(&inspector))
      .unwrap()
      .report()
      .unwrap();
    assert_eq!(report.sections().len(), 1);
  }

  #[test]
  fn full_request() {
    let mut request = Request::builder()
      .method("POST")
      .uri("https://shop.example.com:8443/shop/api/cart%20items;jsessionid=url-id?item=42&item=7")
      .version(http::Version::HTTP_2)
      .header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
      .header("Content-Length", "9")
      .header("Accept-Language", "de-DE,en;q=0.5")
      .header("Cookie", "JSESSIONID=cookie-id; theme=dark")
      .body(b"note=hi+there".to_vec())
      .unwrap();
    request.extensions_mut().insert(
      RequestContext::new()
        .local_addr("192.168.1.2:8443".parse().unwrap())
        .remote_addr("10.0.0.7:52110".parse().unwrap())
        .authenticated("BASIC", "alice")
        .context_path("/shop")
        .servlet_path("/api")
        .dispatcher_type(DispatcherType::Forward)
        .async_supported(true)
        .session_valid(true),
    );
    request
      .extensions_mut()
      .insert(Attributes::new().with("user.id", 42));

    let options = InspectOptions::new().document_root("/srv/www");
    let inspector = HttpInspector::new_with_options(&request, options);
    let props = properties(&inspector);
    assert_eq!(props["asyncSupported"], "true");
    assert_eq!(props["authType"], "BASIC");
    assert_eq!(props["characterEncoding"], "utf-8");
    assert_eq!(props["contentLength"], "9");
    assert_eq!(props["contextPath"], "/shop");
    assert_eq!(props["dispatcherType"], "FORWARD");
    assert_eq!(props["localAddr"], "192.168.1.2");
    assert_eq!(props["localName"], "192.168.1.2");
    assert_eq!(props["localPort"], "8443");
    assert_eq!(props["locale"], "de_DE");
    assert_eq!(props["method"], "POST");
    assert_eq!(props["pathInfo"], "/cart items");
    assert_eq!(props["pathTranslated"], "/srv/www/cart items");
    assert_eq!(props["protocol"], "HTTP/2.0");
    assert_eq!(props["queryString"], "item=42&item=7");
    assert_eq!(props["remoteAddr"], "10.0.0.7");
    assert_eq!(props["remoteHost"], "10.0.0.7");
    assert_eq!(props["remotePort"], "52110");
    assert_eq!(props["remoteUser"], "alice");
    assert_eq!(props["requestedSessionId"], "cookie-id");
    assert_eq!(props["requestedSessionIdFromCookie"], "true");
    assert_eq!(props["requestedSessionIdFromURL"], "false");
    assert_eq!(props["requestedSessionIdValid"], "true");
    assert_eq!(props["requestURI"], "/shop/api/cart%20items;jsessionid=url-id");
    assert_eq!(props["scheme"], "https");
    assert_eq!(props["secure"], "true");
    assert_eq!(props["serverName"], "shop.example.com");
    assert_eq!(props["serverPort"], "8443");
    assert_eq!(props["servletPath"], "/api");

    let report = RequestDump::new(Some(&inspector))
      .unwrap()
      .report()
      .unwrap();
    let parameters = report.section(SectionKind::Parameter).unwrap().entries();
    assert_eq!(parameters[0].name(), "item");
    assert_eq!(parameters[0].value().to_string(), "[42, 7]");
    assert_eq!(parameters[1].name(), "note");
    assert_eq!(parameters[1].value().to_string(), "hi there");

    let attributes = report.section(SectionKind::Attributes).unwrap().entries();
    assert_eq!(attributes[0].name(), "user.id");
    assert_eq!(attributes[0].value(), &Value::Int(42));
  }

  #[test]
  fn session_id_from_url() {
    let request = Request::builder()
      .uri("/cart;jsessionid=url-id")
      .header("Cookie", "theme=dark")
      .body(Vec::<u8>::new())
      .unwrap();
    let props = properties(&HttpInspector::new(&request));
    assert_eq!(props["requestedSessionId"], "url-id");
    assert_eq!(props["requestedSessionIdFromCookie"], "false");
    assert_eq!(props["requestedSessionIdFromURL"], "true");
    assert_eq!(props["pathInfo"], "/cart");
  }

  #[test]
  fn session_cookie_wins_over_url() {
    let request = Request::builder()
      .uri("/cart;jsessionid=url-id")
      .header("Cookie", "theme=dark")
      .header("Cookie", "JSESSIONID=cookie-id")
      .body(Vec::<u8>::new())
      .unwrap();
    let inspector = HttpInspector::new(&request);
    assert_eq!(
      inspector.property(Property::RequestedSessionId).unwrap(),
      Value::from("cookie-id")
    );
    assert_eq!(
      inspector.property(Property::RequestedSessionIdFromCookie).unwrap(),
      Value::Bool(true)
    );
    assert_eq!(
      inspector.property(Property::RequestedSessionIdFromUrl).unwrap(),
      Value::Bool(false)
    );
    assert_eq!(inspector.cookies().unwrap().unwrap().len(), 2);
  }

  #[test]
  fn malformed_cookie_fails_session_properties() {
    let request = Request::builder()
      .uri("/cart;jsessionid=url-id")
      .header("Cookie", "broken")
      .body(Vec::<u8>::new())
      .unwrap();
    let inspector = HttpInspector::new(&request);
    for property in [
      Property::RequestedSessionId,
      Property::RequestedSessionIdFromCookie,
      Property::RequestedSessionIdFromUrl,
    ] {
      assert!(matches!(
        inspector.property(property),
        Err(crate::Error::MalformedCookie(pair)) if pair == "broken"
      ));
    }
    assert!(matches!(
      inspector.cookies(),
      Err(crate::Error::MalformedCookie(_))
    ));
  }

  #[test]
  fn request_uri_keeps_path_parameters() {
    let request = Request::builder()
      .uri("/shop/cart;jsessionid=abc?x=1")
      .body(Vec::<u8>::new())
      .unwrap();
    let inspector = HttpInspector::new(&request);
    assert_eq!(
      inspector.property(Property::RequestUri).unwrap(),
      Value::from("/shop/cart;jsessionid=abc")
    );
    assert_eq!(
      inspector.property(Property::PathInfo).unwrap(),
      Value::from("/shop/cart")
    );
  }

  #[test]
  fn context_path_matches_whole_segments() {
    let mut request = Request::builder()
      .uri("/shopping/x")
      .body(Vec::<u8>::new())
      .unwrap();
    request
      .extensions_mut()
      .insert(RequestContext::new().context_path("/shop"));
    let props = properties(&HttpInspector::new(&request));
    assert_eq!(props["pathInfo"], "null");
    assert_eq!(props["pathTranslated"], "null");

    let mut request = Request::builder()
      .uri("/shop/apix/y")
      .body(Vec::<u8>::new())
      .unwrap();
    request
      .extensions_mut()
      .insert(RequestContext::new().context_path("/shop").servlet_path("/api"));
    let props = properties(&HttpInspector::new(&request));
    assert_eq!(props["pathInfo"], "null");

    let mut request = Request::builder()
      .uri("/shop/api")
      .body(Vec::<u8>::new())
      .unwrap();
    request
      .extensions_mut()
      .insert(RequestContext::new().context_path("/shop").servlet_path("/api"));
    let props = properties(&HttpInspector::new(&request));
    assert_eq!(props["pathInfo"], "null");
  }

  #[test]
  fn custom_session_cookie() {
    let request = Request::builder()
      .header("Cookie", "JSESSIONID=a; SID=b")
      .body(Vec::<u8>::new())
      .unwrap();
    let options = InspectOptions::new().session_cookie_name("SID");
    let inspector = HttpInspector::new_with_options(&request, options);
    assert_eq!(
      inspector.property(Property::RequestedSessionId).unwrap(),
      Value::from("b")
    );
  }

  #[test]
  fn server_from_host_header() {
    let request = Request::builder()
      .uri("/")
      .header("Host", "example.com")
      .body(Vec::<u8>::new())
      .unwrap();
    let props = properties(&HttpInspector::new(&request));
    assert_eq!(props["serverName"], "example.com");
    assert_eq!(props["serverPort"], "80");
  }

  #[test]
  fn server_from_local_addr() {
    let mut request = Request::new(Vec::<u8>::new());
    request.extensions_mut().insert(
      RequestContext::new()
        .local_addr("127.0.0.1:9000".parse().unwrap())
        .local_name("localhost")
        .scheme("https"),
    );
    let props = properties(&HttpInspector::new(&request));
    assert_eq!(props["serverName"], "localhost");
    assert_eq!(props["serverPort"], "9000");
    assert_eq!(props["scheme"], "https");
    assert_eq!(props["secure"], "true");
  }

  #[test]
  fn header_names_are_unique() {
    let request = Request::builder()
      .header("X-Trace", "a")
      .header("X-Trace", "b")
      .header("Accept", "*/*")
      .body(Vec::<u8>::new())
      .unwrap();
    let inspector = HttpInspector::new(&request);
    let mut names = inspector.header_names().unwrap().unwrap();
    names.sort();
    assert_eq!(names, ["accept", "x-trace"]);
    assert_eq!(inspector.header("x-trace").unwrap(), Some("a".to_string()));
    assert_eq!(inspector.header("missing").unwrap(), None);
  }

  #[test]
  fn malformed_cookie_fails_dump() {
    let request = Request::builder()
      .header("Cookie", "broken")
      .body(Vec::<u8>::new())
      .unwrap();
    let err = crate::dump(&HttpInspector::new(&request)).unwrap_err();
    assert!(matches!(err, crate::Error::MalformedCookie(_)));
  }
}
