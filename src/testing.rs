use serde::Serialize;

use crate::record::LogRecord;

/// A request audit record, the typical single-stream case.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize)]
pub(crate) struct RequestInfo {
    pub url: String,
    pub method: String,
    pub status: u16,
}

impl LogRecord for RequestInfo {
    const TYPE_NAME: &'static str = "RequestInfo";
}

/// A record with a different shape, written to its own stream.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize)]
pub(crate) struct ExceptionInfo {
    pub message: String,
    pub stack_trace: String,
}

impl LogRecord for ExceptionInfo {
    const TYPE_NAME: &'static str = "ExceptionInfo";
}

#[allow(dead_code)]
pub(crate) fn request(url: impl ToString, status: u16) -> RequestInfo {
    RequestInfo {
        url: url.to_string(),
        method: "GET".to_string(),
        status,
    }
}

/// Create a string
#[allow(dead_code)]
pub(crate) fn ss(x: impl ToString) -> String {
    x.to_string()
}
