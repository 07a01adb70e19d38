use std::fmt;

macro_rules! properties {
  ($($variant:ident => $name:literal,)*) => {
    /// A scalar, protocol level fact about a request.
    ///
    /// The variants are declared in the order they appear in a dump.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Property {
      $($variant,)*
    }

    impl Property {
      /// Every property, in dump order.
      pub const ALL: &'static [Property] = &[$(Property::$variant,)*];

      /// Returns the label used for this property in a dump.
      pub fn name(&self) -> &'static str {
        match self {
          $(Property::$variant => $name,)*
        }
      }
    }
  };
}

properties! {
  AsyncStarted => "asyncStarted",
  AsyncSupported => "asyncSupported",
  AuthType => "authType",
  CharacterEncoding => "characterEncoding",
  ContentLength => "contentLength",
  ContentType => "contentType",
  ContextPath => "contextPath",
  DispatcherType => "dispatcherType",
  LocalAddr => "localAddr",
  LocalName => "localName",
  LocalPort => "localPort",
  Locale => "locale",
  Method => "method",
  PathInfo => "pathInfo",
  PathTranslated => "pathTranslated",
  Protocol => "protocol",
  QueryString => "queryString",
  RemoteAddr => "remoteAddr",
  RemoteHost => "remoteHost",
  RemotePort => "remotePort",
  RemoteUser => "remoteUser",
  RequestedSessionId => "requestedSessionId",
  RequestedSessionIdFromCookie => "requestedSessionIdFromCookie",
  RequestedSessionIdFromUrl => "requestedSessionIdFromURL",
  RequestedSessionIdValid => "requestedSessionIdValid",
  RequestUri => "requestURI",
  Scheme => "scheme",
  Secure => "secure",
  ServerName => "serverName",
  ServerPort => "serverPort",
  ServletPath => "servletPath",
}

impl fmt::Display for Property {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn declaration_order() {
    let names = Property::ALL.iter().map(|p| p.name()).collect::<Vec<_>>();
    assert_eq!(
      names,
      [
        "asyncStarted",
        "asyncSupported",
        "authType",
        "characterEncoding",
        "contentLength",
        "contentType",
        "contextPath",
        "dispatcherType",
        "localAddr",
        "localName",
        "localPort",
        "locale",
        "method",
        "pathInfo",
        "pathTranslated",
        "protocol",
        "queryString",
        "remoteAddr",
        "remoteHost",
        "remotePort",
        "remoteUser",
        "requestedSessionId",
        "requestedSessionIdFromCookie",
        "requestedSessionIdFromURL",
        "requestedSessionIdValid",
        "requestURI",
        "scheme",
        "secure",
        "serverName",
        "serverPort",
        "servletPath",
      ]
    );
  }

  #[test]
  fn display() {
    assert_eq!(Property::RequestUri.to_string(), "requestURI");
  }
}
