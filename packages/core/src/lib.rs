//! Human-readable diagnostic dumps of inbound HTTP requests.
//!
//! A dump lists the headers, parameters, cookies and server assigned
//! attributes of a request, each sorted by name, followed by a fixed list of
//! protocol level properties:
//!
//! ```text
//! Header: 
//! accept                         = */*
//!
//! Parameter:
//! foo                            = [bar, baz]
//!
//! Properties:
//! asyncStarted                   = false
//! ...
//! servletPath                    = 
//! ```
//!
//! Anything implementing [`Inspect`] can be dumped. [`HttpInspector`] and
//! [`RequestDumpExt`] cover [`http::Request`].
//!
//! # Features
//!
//! - `tracing`: section level `trace!` events and [`log_request`].
//! - `serde`: `Serialize` for [`Report`] and the types it holds.

mod adapter;
mod dump;
mod error;
mod inspect;
mod options;
mod property;
mod testing;
mod value;

pub use adapter::*;
#[cfg(feature = "tracing")]
pub use dump::log_request;
pub use dump::{Entry, NAME_WIDTH, Report, RequestDump, Section, SectionKind, dump};
pub use error::*;
pub use inspect::*;
pub use options::*;
pub use property::*;
pub use value::*;
