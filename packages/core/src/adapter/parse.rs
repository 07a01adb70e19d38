use crate::{Cookie, Error};
use http::HeaderMap;
use http::header::{ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE};

/// Parameters grouped by name, names in first seen order.
pub(crate) type Parameters = Vec<(String, Vec<String>)>;

fn push_parameter(parameters: &mut Parameters, name: String, value: String) {
  match parameters.iter_mut().find(|(n, _)| *n == name) {
    Some((_, values)) => values.push(value),
    None => parameters.push((name, vec![value])),
  }
}

/// Collects query string parameters followed by url encoded form body
/// parameters.
pub(crate) fn parse_parameters(
  query: Option<&str>,
  headers: &HeaderMap,
  body: &[u8],
) -> Parameters {
  let mut parameters = Parameters::new();
  if let Some(query) = query {
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
      push_parameter(&mut parameters, name.into_owned(), value.into_owned());
    }
  }
  if is_form(headers) {
    for (name, value) in form_urlencoded::parse(body) {
      push_parameter(&mut parameters, name.into_owned(), value.into_owned());
    }
  }
  parameters
}

fn content_type(headers: &HeaderMap) -> Option<mime::Mime> {
  headers.get(CONTENT_TYPE)?.to_str().ok()?.parse().ok()
}

fn is_form(headers: &HeaderMap) -> bool {
  content_type(headers).is_some_and(|mime| {
    mime.type_() == mime::APPLICATION && mime.subtype() == mime::WWW_FORM_URLENCODED
  })
}

/// Splits every `Cookie` header into name/value pairs, in header order.
pub(crate) fn parse_cookies(headers: &HeaderMap) -> crate::Result<Vec<Cookie>> {
  let mut cookies = vec![];
  for header in headers.get_all(COOKIE) {
    let header = header.to_str()?;
    for pair in header.split(';') {
      let pair = pair.trim();
      if pair.is_empty() {
        continue;
      }
      let (name, value) = pair
        .split_once('=')
        .ok_or_else(|| Error::MalformedCookie(pair.to_string()))?;
      let name = name.trim();
      if name.is_empty() {
        return Err(Error::MalformedCookie(pair.to_string()));
      }
      cookies.push(Cookie::new(name, value.trim().trim_matches('"')));
    }
  }
  Ok(cookies)
}

/// Returns the `charset` parameter of the `Content-Type` header, unquoted
/// and lowercased.
pub(crate) fn charset(headers: &HeaderMap) -> Option<String> {
  let mime = content_type(headers)?;
  mime
    .get_param(mime::CHARSET)
    .map(|charset| charset.as_str().to_string())
}

/// Picks the preferred language of the `Accept-Language` header and renders
/// it as `language_REGION`.
pub(crate) fn preferred_locale(headers: &HeaderMap) -> Option<String> {
  let mut best: Option<(&str, f32)> = None;
  for header in headers.get_all(ACCEPT_LANGUAGE) {
    let Ok(header) = header.to_str() else {
      continue;
    };
    for range in header.split(',') {
      let mut parts = range.split(';');
      let tag = parts.next().unwrap_or_default().trim();
      if tag.is_empty() || tag == "*" {
        continue;
      }
      let quality = match parts.find_map(|p| p.trim().strip_prefix("q=")) {
        Some(q) => match q.trim().parse::<f32>() {
          Ok(q) if (0.0..=1.0).contains(&q) => q,
          _ => continue,
        },
        None => 1.0,
      };
      if quality <= 0.0 {
        continue;
      }
      if best.is_none_or(|(_, q)| quality > q) {
        best = Some((tag, quality));
      }
    }
  }
  best.map(|(tag, _)| locale_from_tag(tag))
}

fn locale_from_tag(tag: &str) -> String {
  let mut parts = tag.split('-');
  let language = parts.next().unwrap_or_default().to_ascii_lowercase();
  match parts.next() {
    Some(region) if !region.is_empty() => format!("{language}_{}", region.to_ascii_uppercase()),
    _ => language,
  }
}

/// Removes `;name=value` path parameters from every segment.
pub(crate) fn strip_path_parameters(path: &str) -> String {
  path
    .split('/')
    .map(|segment| segment.split(';').next().unwrap_or_default())
    .collect::<Vec<_>>()
    .join("/")
}

/// Strips `prefix` from `path` when it covers whole segments, so `/shop`
/// matches `/shop` and `/shop/cart` but not `/shopping`.
pub(crate) fn strip_path_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
  let rest = path.strip_prefix(prefix)?;
  if prefix.is_empty() || rest.is_empty() || rest.starts_with('/') {
    Some(rest)
  } else {
    None
  }
}

/// Finds the value of the path parameter `name`, e.g. `abc` for
/// `/cart;jsessionid=abc`.
pub(crate) fn path_parameter<'a>(path: &'a str, name: &str) -> Option<&'a str> {
  path
    .split('/')
    .flat_map(|segment| segment.split(';').skip(1))
    .find_map(|param| {
      let (n, v) = param.split_once('=')?;
      if n.eq_ignore_ascii_case(name) {
        Some(v)
      } else {
        None
      }
    })
}

pub(crate) fn percent_decode(value: &str) -> String {
  percent_encoding::percent_decode_str(value)
    .decode_utf8_lossy()
    .to_string()
}
