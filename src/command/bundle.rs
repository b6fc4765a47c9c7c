//! Sequential bundle execution
//!
//! The device session is a single stateful channel; batches therefore run
//! strictly in array order with exactly one in-flight device call. A failure
//! aborts the remaining batches and discards any collected results; progress
//! notifications already emitted stand.

use serde_json::Value;
use tracing::{debug, warn};

use keylink_wire::path;

use crate::command::Batch;
use crate::device::DeviceCommands;
use crate::encode;
use crate::error::Error;
use crate::methods::{MethodSpec, Operation};
use crate::protocol::{OperationOutput, Response, ResultRecord};
use crate::ui::UiChannel;

pub(super) async fn execute(
    spec: &'static MethodSpec,
    batches: &[Batch],
    is_bundle: bool,
    device: &dyn DeviceCommands,
    ui: &mut UiChannel,
) -> Result<Response, Error> {
    let mut records = Vec::with_capacity(batches.len());

    for (index, batch) in batches.iter().enumerate() {
        debug!(method = spec.name, index, "executing batch");

        let (record, raw) = match run_batch(spec, batch, device).await {
            Ok(result) => result,
            Err(err) => {
                warn!(method = spec.name, index, %err, "batch failed, aborting bundle");
                return Err(Error::Batch {
                    index,
                    source: Box::new(err),
                });
            }
        };

        records.push(record);

        if is_bundle {
            ui.report_progress(index, raw).await;
        }
    }

    if is_bundle {
        Ok(Response::Bundle(records))
    } else {
        // Construction guarantees at least one batch.
        Ok(Response::Single(records.remove(0)))
    }
}

async fn run_batch(
    spec: &MethodSpec,
    batch: &Batch,
    device: &dyn DeviceCommands,
) -> Result<(ResultRecord, Value), Error> {
    match spec.operation {
        Operation::GetPublicKey => {
            let response = device
                .get_public_key(&batch.path, batch.show_on_device)
                .await
                .map_err(Error::Device)?;

            let raw = serde_json::to_value(&response).unwrap_or(Value::Null);
            Ok((record(batch, OperationOutput::PublicKey(response)), raw))
        }
        Operation::SignTransaction => {
            let transaction = batch
                .transaction
                .as_ref()
                .ok_or_else(|| Error::Validation("batch carries no transaction".into()))?;
            let generation_hash = batch.generation_hash.as_deref().unwrap_or_default();

            // Encoder failure aborts the whole run before the device sees
            // this batch.
            let message = encode::sign_tx_message(transaction, &batch.path, generation_hash)?;

            let response = device
                .sign_transaction(message)
                .await
                .map_err(Error::Device)?;

            let raw = serde_json::to_value(&response).unwrap_or(Value::Null);
            Ok((record(batch, OperationOutput::SignedTx(response)), raw))
        }
    }
}

fn record(batch: &Batch, payload: OperationOutput) -> ResultRecord {
    ResultRecord {
        path: batch.path.clone(),
        serialized_path: path::format(&batch.path),
        payload,
    }
}
