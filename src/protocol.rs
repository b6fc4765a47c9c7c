//! Host boundary envelope types
//!
//! The request/response shapes exchanged with the embedding host: a
//! `{method, payload}` request, a single result record or an ordered
//! sequence of them, and the `{kind, message}` error object (see
//! [`crate::error::ErrorEnvelope`]).

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// One inbound request from the host.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub payload: Value,
}

impl Request {
    /// Build a request directly from a method name and payload.
    pub fn new(method: impl Into<String>, payload: Value) -> Self {
        Self {
            method: method.into(),
            payload,
        }
    }

    /// Parse the raw `{method, payload}` envelope.
    ///
    /// The method must be a non-empty string; the payload, when present, must
    /// be an object. Anything else is a `MalformedRequest`.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let envelope = value
            .as_object()
            .ok_or_else(|| Error::MalformedRequest("request is not an object".into()))?;

        let method = match envelope.get("method") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            Some(Value::String(_)) | None => {
                return Err(Error::MalformedRequest("request method is not set".into()))
            }
            Some(_) => {
                return Err(Error::MalformedRequest(
                    "request method is not a string".into(),
                ))
            }
        };

        let payload = match envelope.get("payload") {
            Some(payload @ Value::Object(_)) => payload.clone(),
            Some(_) => {
                return Err(Error::MalformedRequest(
                    "request payload is not an object".into(),
                ))
            }
            None => Value::Object(Default::default()),
        };

        Ok(Self { method, payload })
    }
}

/// Protocol-specific payload of one result record.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    PublicKey(keylink_wire::PublicKey),
    SignedTx(keylink_wire::SignedTx),
}

/// One per-batch result, echoing the path it was produced for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub path: Vec<u32>,
    pub serialized_path: String,
    #[serde(flatten)]
    pub payload: OperationOutput,
}

/// The command result: one record, or one record per batch in batch order.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Single(ResultRecord),
    Bundle(Vec<ResultRecord>),
}

impl Response {
    /// All records, in batch order.
    pub fn records(&self) -> &[ResultRecord] {
        match self {
            Response::Single(record) => std::slice::from_ref(record),
            Response::Bundle(records) => records,
        }
    }
}
