use super::inspector::HttpInspector;
use crate::{InspectOptions, Report, RequestDump};

/// Dump shortcuts for [`http::Request`].
///
/// ```
/// use reqdump::RequestDumpExt;
///
/// let request = http::Request::get("/status?verbose").body(Vec::<u8>::new()).unwrap();
/// println!("{}", request.dump().unwrap());
/// ```
pub trait RequestDumpExt {
  fn dump(&self) -> crate::Result<String> {
    self.dump_with(InspectOptions::default())
  }

  fn dump_with(&self, options: InspectOptions) -> crate::Result<String>;

  fn report(&self) -> crate::Result<Report> {
    self.report_with(InspectOptions::default())
  }

  fn report_with(&self, options: InspectOptions) -> crate::Result<Report>;
}

impl<B: AsRef<[u8]>> RequestDumpExt for http::Request<B> {
  fn dump_with(&self, options: InspectOptions) -> crate::Result<String> {
    let inspector = HttpInspector::new_with_options(self, options);
    RequestDump::new(Some(&inspector))?.dump()
  }

  fn report_with(&self, options: InspectOptions) -> crate::Result<Report> {
    let inspector = HttpInspector::new_with_options(self, options);
    RequestDump::new(Some(&inspector))?.report()
  }
}
