//! Method registry
//!
//! Maps inbound method names to their declarative [`MethodSpec`] descriptors.
//! A descriptor carries everything that used to warrant a subclass: required
//! capability tags, the supported firmware range, batch validation, the
//! confirmation label rule and the device-operation selector. Adding a
//! method means adding one descriptor to the table.

mod get_public_key;
mod sign_transaction;

use serde_json::Value;
use tracing::debug;

use keylink_wire::path;

use crate::command::{Batch, Command};
use crate::error::Error;
use crate::protocol::Request;

/// A firmware version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FirmwareVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FirmwareVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

/// Firmware versions an operation supports. Enforced by the host's
/// authorization collaborator, not by the command core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareRange {
    pub min: FirmwareVersion,
    pub max: Option<FirmwareVersion>,
}

/// Which device operation a method drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    GetPublicKey,
    SignTransaction,
}

/// Software confirmation step of a method, when it declares one.
#[derive(Debug)]
pub(crate) struct ConfirmationSpec {
    /// UI view identifier shown with the request.
    pub view: &'static str,
    /// Content-dependent label rule.
    pub label: fn(&[Batch]) -> String,
}

/// Declarative descriptor of one method.
#[derive(Debug)]
pub(crate) struct MethodSpec {
    pub name: &'static str,
    pub info: &'static str,
    pub required_capabilities: &'static [&'static str],
    pub firmware_range: FirmwareRange,
    pub confirmation: Option<ConfirmationSpec>,
    pub parse_batch: fn(&Value) -> Result<Batch, Error>,
    pub operation: Operation,
}

static METHODS: &[MethodSpec] = &[get_public_key::SPEC, sign_transaction::SPEC];

/// Resolve a request to a validated [`Command`].
///
/// Fails with `MalformedRequest` when the method name is unusable,
/// `MethodNotFound` when it is not registered, or a validation error from
/// command construction.
pub fn find(request: &Request) -> Result<Command, Error> {
    if request.method.is_empty() {
        return Err(Error::MalformedRequest("request method is not set".into()));
    }

    let spec = METHODS
        .iter()
        .find(|spec| spec.name == request.method)
        .ok_or_else(|| Error::MethodNotFound(request.method.clone()))?;

    debug!(method = spec.name, "resolved method");
    Command::new(spec, &request.payload)
}

/// Decode a batch's `path` field, which may be a `m/...` string or an array
/// of raw u32 components.
pub(crate) fn decode_path(value: &Value, required_len: usize) -> Result<Vec<u32>, Error> {
    match value {
        Value::String(input) => {
            path::parse(input, Some(required_len)).map_err(Error::validation)
        }
        Value::Array(items) => {
            let mut components = Vec::with_capacity(items.len());
            for item in items {
                let component = item
                    .as_u64()
                    .filter(|n| *n <= u32::MAX as u64)
                    .ok_or_else(|| {
                        Error::Validation(format!("path component {item} is not a u32"))
                    })?;
                components.push(component as u32);
            }
            path::validate(&components, Some(required_len)).map_err(Error::validation)?;
            Ok(components)
        }
        _ => Err(Error::Validation(
            "parameter \"path\" is not a derivation path".into(),
        )),
    }
}
