use std::path::PathBuf;

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "JSESSIONID";
pub const DEFAULT_SESSION_PATH_PARAMETER: &str = "jsessionid";
pub const DEFAULT_LOCALE: &str = "en_US";

/// Options for deriving request properties from an [`http::Request`].
///
/// These only affect how property values are computed; the set of dumped
/// fields is fixed.
///
/// # Example
///
/// ```
/// use reqdump::InspectOptions;
///
/// let options = InspectOptions::new()
///     .session_cookie_name("SID")
///     .default_locale("de_DE")
///     .document_root("/srv/www");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InspectOptions {
  pub session_cookie_name: String,
  pub session_path_parameter: String,
  pub default_locale: String,
  pub document_root: Option<PathBuf>,
}

impl Default for InspectOptions {
  fn default() -> Self {
    Self {
      session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
      session_path_parameter: DEFAULT_SESSION_PATH_PARAMETER.to_string(),
      default_locale: DEFAULT_LOCALE.to_string(),
      document_root: None,
    }
  }
}

impl InspectOptions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Name of the cookie carrying the requested session id.
  pub fn session_cookie_name(mut self, name: impl Into<String>) -> Self {
    self.session_cookie_name = name.into();
    self
  }

  /// Name of the path parameter carrying the requested session id,
  /// e.g. `jsessionid` in `/cart;jsessionid=abc`.
  pub fn session_path_parameter(mut self, name: impl Into<String>) -> Self {
    self.session_path_parameter = name.into();
    self
  }

  /// Locale reported when the request has no usable `Accept-Language` header.
  pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
    self.default_locale = locale.into();
    self
  }

  /// Directory that `pathInfo` is resolved against for `pathTranslated`.
  pub fn document_root(mut self, root: impl Into<PathBuf>) -> Self {
    self.document_root = Some(root.into());
    self
  }
}
