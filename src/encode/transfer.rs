//! Transfer variant builder

use serde_json::Value;

use keylink_wire::{Address, Mosaic, SignTx, Transfer, TransferMessage};

use super::{amount, number_u32, string};
use crate::error::Error;
use crate::params::{self, Kind, Rule};

pub(super) fn build(transaction: &Value, message: &mut SignTx) -> Result<(), Error> {
    params::validate(
        transaction,
        &[
            Rule::required("recipientAddress", Kind::Object),
            Rule::optional("mosaics", Kind::Array),
            Rule::optional("message", Kind::Object),
        ],
    )
    .map_err(Error::invalid_parameter)?;

    let recipient = &transaction["recipientAddress"];
    params::validate(
        recipient,
        &[
            Rule::required("address", Kind::String),
            Rule::required("networkType", Kind::Number),
        ],
    )
    .map_err(Error::invalid_parameter)?;

    let mut mosaics = Vec::new();
    if let Some(items) = transaction.get("mosaics").and_then(Value::as_array) {
        for item in items {
            params::validate(
                item,
                &[
                    Rule::required("id", Kind::String),
                    Rule::required("amount", Kind::Amount),
                ],
            )
            .map_err(Error::invalid_parameter)?;

            mosaics.push(Mosaic::new(string(item, "id")?, amount(item, "amount")?));
        }
    }

    let attached_message = match transaction.get("message").filter(|m| !m.is_null()) {
        Some(value) => {
            params::validate(
                value,
                &[
                    Rule::required("payload", Kind::String),
                    Rule::optional("type", Kind::Number),
                ],
            )
            .map_err(Error::invalid_parameter)?;

            Some(TransferMessage {
                payload: string(value, "payload")?,
                message_type: value
                    .get("type")
                    .and_then(Value::as_u64)
                    .unwrap_or(0) as u32,
            })
        }
        None => None,
    };

    message.transfer = Some(Transfer {
        recipient_address: Some(Address::new(
            string(recipient, "address")?,
            number_u32(recipient, "networkType")?,
        )),
        mosaics,
        message: attached_message,
    });

    Ok(())
}
