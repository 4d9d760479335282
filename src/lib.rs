//! Turn a cURL command line into a structured request descriptor.
//!
//! ```
//! let req = curlreq::parse("curl -u name:pass -k -m 30 https://api.site.com").unwrap();
//! assert_eq!(req.method, "GET");
//! assert_eq!(req.header["authorization"], "Basic bmFtZTpwYXNz");
//! assert!(req.skip_tls);
//! assert_eq!(req.timeout, "30");
//! ```
//!
//! Nothing is executed and no network access happens: the command is split
//! into shell words, cleaned up, and folded through a small state machine.

pub mod curl;
pub mod error;
pub mod request;
#[cfg(test)]
mod test_util;

pub use curl::{CurlParser, is_curl, parse};
pub use error::{CurlError, Result, SplitError};
pub use request::{Header, Request};
