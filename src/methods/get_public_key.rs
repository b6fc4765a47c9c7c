//! `getPublicKey`: export one or more public keys.

use serde_json::Value;

use keylink_wire::path;

use super::{ConfirmationSpec, FirmwareRange, FirmwareVersion, MethodSpec, Operation, decode_path};
use crate::command::Batch;
use crate::error::Error;
use crate::params::{self, Kind, Rule};

/// Key-export paths are always the full 5-component account path.
const PATH_COMPONENTS: usize = 5;

pub(super) const SPEC: MethodSpec = MethodSpec {
    name: "getPublicKey",
    info: "Export public key",
    required_capabilities: &["read"],
    firmware_range: FirmwareRange {
        min: FirmwareVersion::new(2, 3, 0),
        max: None,
    },
    confirmation: Some(ConfirmationSpec {
        view: "export-xpub",
        label,
    }),
    parse_batch,
    operation: Operation::GetPublicKey,
};

fn parse_batch(batch: &Value) -> Result<Batch, Error> {
    params::validate(
        batch,
        &[
            Rule::present("path"),
            Rule::optional("showOnDevice", Kind::Boolean),
        ],
    )
    .map_err(Error::validation)?;

    let path = decode_path(&batch["path"], PATH_COMPONENTS)?;
    let show_on_device = batch
        .get("showOnDevice")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(Batch {
        path,
        show_on_device,
        transaction: None,
        generation_hash: None,
    })
}

fn label(batches: &[Batch]) -> String {
    if batches.len() > 1 {
        return "Export multiple public keys".into();
    }

    // The account component is shown un-hardened and one-based. Display
    // only; derivation always uses the raw path.
    let account = path::unharden(batches[0].path[2]) + 1;
    format!("Export public key for account #{account}")
}
