pub mod json;
pub mod parser;
pub mod sanitize;
pub mod words;

use log::debug;

use crate::{
    error::{CurlError, Result},
    request::Request,
};
use json::{CompactJson, JsonCanonicalizer};
use sanitize::sanitize;
use words::{ShellWords, WordSplitter};

/// Every accepted command starts with exactly this.
pub const CURL_PREFIX: &str = "curl ";

pub fn is_curl(input: &str) -> bool {
    input.starts_with(CURL_PREFIX)
}

/// Split, sanitize, run the state machine, then normalize a JSON body.
#[derive(Debug, Default, Clone)]
pub struct CurlParser<S = ShellWords, J = CompactJson> {
    splitter: S,
    canonicalizer: J,
}

impl CurlParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, J> CurlParser<S, J>
where
    S: WordSplitter,
    J: JsonCanonicalizer,
{
    pub fn with_splitter<T: WordSplitter>(self, splitter: T) -> CurlParser<T, J> {
        CurlParser {
            splitter,
            canonicalizer: self.canonicalizer,
        }
    }

    pub fn with_canonicalizer<K: JsonCanonicalizer>(self, canonicalizer: K) -> CurlParser<S, K> {
        CurlParser {
            splitter: self.splitter,
            canonicalizer,
        }
    }

    pub fn parse(&self, command: &str) -> Result<Request> {
        if !is_curl(command) {
            return Err(CurlError::InvalidCommand(command.into()));
        }

        let words = self.splitter.split_words(command)?;
        let tokens = sanitize(words);
        let mut req = parser::build(&tokens);

        if req.is_json() {
            req.body = self.canonicalizer.canonicalize(&req.body)?;
        }

        debug!(
            "parsed {} {} with {} header(s), {} body byte(s)",
            req.method,
            req.url,
            req.header.len(),
            req.body.len()
        );
        Ok(req)
    }
}

/// Parses `command` with the default splitter and JSON canonicalizer.
pub fn parse(command: &str) -> Result<Request> {
    CurlParser::new().parse(command)
}
