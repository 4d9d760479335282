use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{curl::parser::Patch, error::CurlError};

pub const KEY_CONTENT_TYPE: &str = "content-type";
pub const KEY_USER_AGENT: &str = "user-agent";
pub const KEY_COOKIE: &str = "cookie";
pub const KEY_AUTHORIZATION: &str = "authorization";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

pub const METHOD_GET: &str = "GET";
pub const METHOD_HEAD: &str = "HEAD";
pub const METHOD_POST: &str = "POST";

/// Header names are always stored lowercase.
pub type Header = BTreeMap<String, String>;

/// The request described by a cURL command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub header: Header,
    pub body: String,
    pub skip_tls: bool,
    pub timeout: String,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: METHOD_GET.into(),
            url: String::new(),
            header: Header::new(),
            body: String::new(),
            skip_tls: false,
            timeout: String::new(),
        }
    }
}

impl FromStr for Request {
    type Err = CurlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::curl::parse(s)
    }
}

impl Request {
    pub fn content_type(&self) -> Option<&str> {
        self.header.get(KEY_CONTENT_TYPE).map(String::as_str)
    }

    pub fn is_json(&self) -> bool {
        self.content_type() == Some(CONTENT_TYPE_JSON)
    }

    /// Applies one change produced by the state machine.
    pub fn apply(&mut self, patch: Patch) {
        match patch {
            Patch::Url(url) => self.url = url,
            Patch::SkipTls => self.skip_tls = true,
            Patch::Head => self.method = METHOD_HEAD.into(),
            Patch::Method(method) => self.method = method,
            Patch::Header(key, value) => {
                self.header.insert(key, value);
            }
            Patch::Data(data) => self.push_data(&data),
            Patch::Timeout(timeout) => self.timeout = timeout,
        }
    }

    /// Data flags accumulate: `-d a=1 -d b=2` gives `a=1&b=2`.
    fn push_data(&mut self, data: &str) {
        if self.method == METHOD_GET || self.method == METHOD_HEAD {
            self.method = METHOD_POST.into();
        }

        self.header
            .entry(KEY_CONTENT_TYPE.into())
            .or_insert_with(|| CONTENT_TYPE_FORM.into());

        if !self.body.is_empty() {
            self.body.push('&');
        }
        self.body.push_str(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let req = Request::default();
        assert_eq!(req.method, "GET");
        assert!(req.url.is_empty());
        assert!(req.header.is_empty());
        assert!(!req.skip_tls);
        assert!(req.timeout.is_empty());
    }

    #[test]
    fn test_data_promotes_method_and_defaults_content_type() {
        let mut req = Request::default();
        req.apply(Patch::Data("a=1".into()));
        req.apply(Patch::Data("b=2".into()));

        assert_eq!(req.method, "POST");
        assert_eq!(req.body, "a=1&b=2");
        assert_eq!(req.content_type(), Some(CONTENT_TYPE_FORM));
    }

    #[test]
    fn test_data_keeps_explicit_method_and_content_type() {
        let mut req = Request::default();
        req.apply(Patch::Method("PUT".into()));
        req.apply(Patch::Header(KEY_CONTENT_TYPE.into(), CONTENT_TYPE_JSON.into()));
        req.apply(Patch::Data("{}".into()));

        assert_eq!(req.method, "PUT");
        assert!(req.is_json());
    }

    #[test]
    fn test_head_is_promoted_by_data() {
        let mut req = Request::default();
        req.apply(Patch::Head);
        req.apply(Patch::Data("x".into()));
        assert_eq!(req.method, "POST");
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(Request::default()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["body", "header", "method", "skip_tls", "timeout", "url"]
        );
    }
}
