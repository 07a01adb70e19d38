//! Serves every request with its own dump and logs it.
//!
//! ```text
//! RUST_LOG=reqdump=debug cargo run -p reqdump --example tiny_http_dump --features tracing
//! curl -b 'JSESSIONID=abc' 'http://127.0.0.1:8080/app/cart?item=1&item=2'
//! ```

use reqdump::{Attributes, HttpInspector, RequestContext};
use std::io::Read;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn into_http(request: &mut tiny_http::Request) -> Result<http::Request<Vec<u8>>, BoxError> {
  let version = match (request.http_version().0, request.http_version().1) {
    (1, 0) => http::Version::HTTP_10,
    (2, _) => http::Version::HTTP_2,
    _ => http::Version::HTTP_11,
  };
  let mut builder = http::Request::builder()
    .method(request.method().as_str())
    .uri(request.url())
    .version(version);
  for header in request.headers() {
    builder = builder.header(header.field.as_str().as_str(), header.value.as_str());
  }
  let mut body = Vec::new();
  request.as_reader().read_to_end(&mut body)?;
  Ok(builder.body(body)?)
}

fn main() -> Result<(), BoxError> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reqdump=debug")),
    )
    .init();

  let local_addr: SocketAddr = "127.0.0.1:8080".parse()?;
  let server = tiny_http::Server::http(local_addr)?;
  tracing::info!(%local_addr, "listening");

  for (n, mut request) in server.incoming_requests().enumerate() {
    let mut http_request = into_http(&mut request)?;
    let mut context = RequestContext::new().local_addr(local_addr).context_path("/app");
    if let Some(remote_addr) = request.remote_addr() {
      context = context.remote_addr(*remote_addr);
    }
    http_request.extensions_mut().insert(context);
    http_request
      .extensions_mut()
      .insert(Attributes::new().with("requestNumber", n as i64));

    let inspector = HttpInspector::new(&http_request);
    reqdump::log_request(&inspector)?;
    let text = reqdump::dump(&inspector)?;
    request.respond(tiny_http::Response::from_string(text))?;
  }
  Ok(())
}
