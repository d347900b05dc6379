use std::borrow::Cow;

use crate::status::{ResponseHeader, StatusGroup};

/// Meta of a success response with an empty MIME type.
pub const DEFAULT_MIME: &str = "text/gemini; charset=utf-8";

/// A complete response: validated header and the raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    header: ResponseHeader,
    body: Vec<u8>,
}

impl Response {
    pub fn new(header: ResponseHeader, body: Vec<u8>) -> Self {
        Self { header, body }
    }

    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    pub fn status(&self) -> u8 {
        self.header.code
    }

    pub fn group(&self) -> StatusGroup {
        self.header.group
    }

    pub fn meta(&self) -> &str {
        &self.header.meta
    }

    pub fn is_success(&self) -> bool {
        self.header.group == StatusGroup::Success
    }

    /// MIME type of a success response, parameters included.
    pub fn mime_type(&self) -> Option<&str> {
        match (self.is_success(), self.meta()) {
            (false, _) => None,
            (true, "") => Some(DEFAULT_MIME),
            (true, meta) => Some(meta),
        }
    }

    /// True for a success response carrying gemtext.
    pub fn is_gemtext(&self) -> bool {
        self.mime_type()
            .and_then(|mime| mime.split(';').next())
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("text/gemini"))
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
