pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("invalid argument: {0}")]
  InvalidArgument(&'static str),
  #[error("cookie header contains non visible ascii characters: {0}")]
  InvalidCookieHeader(#[from] http::header::ToStrError),
  #[error("malformed cookie pair: {0}")]
  MalformedCookie(String),
  #[error("fail to read `{name}` from request: {message}")]
  Accessor { name: String, message: String },
  #[error("fail to format dump: {0}")]
  Fmt(#[from] std::fmt::Error),
}

impl Error {
  /// Creates an error for a request accessor that could not produce its value.
  pub fn accessor(name: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Accessor {
      name: name.into(),
      message: message.into(),
    }
  }
}
