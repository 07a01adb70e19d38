mod context;
mod http_ext;
mod inspector;
mod parse;

pub use context::*;
pub use http_ext::*;
pub use inspector::*;
