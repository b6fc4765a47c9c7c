//! `signTransaction`: sign one or more transactions.
//!
//! Carries no software confirmation step: the device itself renders the
//! transaction and requires physical approval before signing.

use serde_json::Value;

use super::{FirmwareRange, FirmwareVersion, MethodSpec, Operation, decode_path};
use crate::command::Batch;
use crate::error::Error;
use crate::params::{self, Kind, Rule};

const PATH_COMPONENTS: usize = 5;

pub(super) const SPEC: MethodSpec = MethodSpec {
    name: "signTransaction",
    info: "Sign transaction",
    required_capabilities: &["read", "write"],
    firmware_range: FirmwareRange {
        min: FirmwareVersion::new(2, 3, 0),
        max: None,
    },
    confirmation: None,
    parse_batch,
    operation: Operation::SignTransaction,
};

fn parse_batch(batch: &Value) -> Result<Batch, Error> {
    params::validate(
        batch,
        &[
            Rule::present("path"),
            Rule::required("generationHash", Kind::String),
            Rule::required("transaction", Kind::Object),
        ],
    )
    .map_err(Error::validation)?;

    let path = decode_path(&batch["path"], PATH_COMPONENTS)?;
    let generation_hash = batch["generationHash"].as_str().unwrap_or_default().to_string();

    Ok(Batch {
        path,
        show_on_device: false,
        transaction: Some(batch["transaction"].clone()),
        generation_hash: Some(generation_hash),
    })
}
