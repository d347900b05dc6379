//! Status codes
//!
//! Two digits; the first one is the group. Codes outside 10..=69 are invalid and the
//! response is discarded. Codes inside the range that the protocol does not define are
//! accepted as they are, with a warning naming the group's default code.

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::framer::HeaderLine;

/// Codes defined by the protocol.
pub const DEFINED_CODES: &[u8] = &[
    10, 11, 20, 30, 31, 40, 41, 42, 43, 44, 50, 51, 52, 53, 59, 60, 61, 62,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid status code {code}")]
pub struct InvalidStatus {
    pub code: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusGroup {
    Input,
    Success,
    Redirect,
    TemporaryFailure,
    PermanentFailure,
    ClientCertificateRequired,
}

impl StatusGroup {
    /// The group of a code, `None` when its first digit is not 1 to 6.
    pub fn from_code(code: u8) -> Option<Self> {
        match code / 10 {
            1 => Some(StatusGroup::Input),
            2 => Some(StatusGroup::Success),
            3 => Some(StatusGroup::Redirect),
            4 => Some(StatusGroup::TemporaryFailure),
            5 => Some(StatusGroup::PermanentFailure),
            6 => Some(StatusGroup::ClientCertificateRequired),
            _ => None,
        }
    }

    pub fn digit(self) -> u8 {
        match self {
            StatusGroup::Input => 1,
            StatusGroup::Success => 2,
            StatusGroup::Redirect => 3,
            StatusGroup::TemporaryFailure => 4,
            StatusGroup::PermanentFailure => 5,
            StatusGroup::ClientCertificateRequired => 6,
        }
    }

    /// The `x0` code of the group, which stands in for undefined codes.
    pub fn default_code(self) -> u8 {
        self.digit() * 10
    }
}

impl fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusGroup::Input => "input",
            StatusGroup::Success => "success",
            StatusGroup::Redirect => "redirect",
            StatusGroup::TemporaryFailure => "temporary failure",
            StatusGroup::PermanentFailure => "permanent failure",
            StatusGroup::ClientCertificateRequired => "client certificate required",
        };
        f.write_str(name)
    }
}

/// Check a status code and return its group.
pub fn classify(code: u8) -> Result<StatusGroup, InvalidStatus> {
    if !(10..=69).contains(&code) {
        return Err(InvalidStatus { code });
    }
    let group = StatusGroup::from_code(code).ok_or(InvalidStatus { code })?;
    if !DEFINED_CODES.contains(&code) {
        warn!(
            code,
            default = group.default_code(),
            "undefined status code, passed through unchanged"
        );
    }
    Ok(group)
}

/// A validated response header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseHeader {
    pub code: u8,
    pub group: StatusGroup,
    pub meta: String,
}

impl ResponseHeader {
    pub fn from_line(line: HeaderLine) -> Result<Self, InvalidStatus> {
        let group = classify(line.status)?;
        Ok(Self {
            code: line.status,
            group,
            meta: line.meta,
        })
    }
}

impl fmt::Display for ResponseHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.meta)
    }
}
