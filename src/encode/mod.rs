//! Transaction encoder
//!
//! Maps a protocol-specific transaction descriptor onto the minimal typed
//! wire message the device firmware signs. The common sub-message is built
//! unconditionally; the variant payload is selected by exact match against
//! a static type→builder table, so a new transaction kind is one new table
//! row and one new builder, with existing builders untouched.

mod mosaic;
mod namespace;
mod transfer;

use serde_json::Value;

use keylink_wire::{SignTx, TransactionCommon, tx_type};

use crate::error::Error;
use crate::params::{self, Kind, Rule};

type VariantBuilder = fn(&Value, &mut SignTx) -> Result<(), Error>;

static VARIANTS: &[(u32, VariantBuilder)] = &[
    (tx_type::TRANSFER, transfer::build),
    (tx_type::NAMESPACE_REGISTRATION, namespace::build),
    (tx_type::MOSAIC_DEFINITION, mosaic::build),
];

/// Encode a transaction descriptor into the device sign request.
///
/// `address_n` and `generation_hash` are the cross-cutting context fields
/// not present on the descriptor itself. An unrecognized `type` is a hard
/// failure; there is no default encoding.
pub fn sign_tx_message(
    transaction: &Value,
    address_n: &[u32],
    generation_hash: &str,
) -> Result<SignTx, Error> {
    let common = common_message(transaction)?;
    let code = common.tx_type;

    let builder = VARIANTS
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, builder)| builder)
        .ok_or(Error::UnknownTransactionType(code))?;

    let mut message = SignTx::new(address_n.to_vec(), generation_hash, common);
    builder(transaction, &mut message)?;

    Ok(message)
}

fn common_message(transaction: &Value) -> Result<TransactionCommon, Error> {
    params::validate(
        transaction,
        &[
            Rule::required("type", Kind::Number),
            Rule::required("networkType", Kind::Number),
            Rule::required("version", Kind::Number),
            Rule::required("maxFee", Kind::Amount),
            Rule::required("deadline", Kind::Amount),
        ],
    )
    .map_err(Error::invalid_parameter)?;

    Ok(TransactionCommon {
        tx_type: number_u32(transaction, "type")?,
        network_type: number_u32(transaction, "networkType")?,
        version: number_u32(transaction, "version")?,
        max_fee: amount(transaction, "maxFee")?,
        deadline: amount(transaction, "deadline")?,
    })
}

pub(crate) fn number_u32(object: &Value, name: &'static str) -> Result<u32, Error> {
    object
        .get(name)
        .and_then(Value::as_u64)
        .filter(|n| *n <= u32::MAX as u64)
        .map(|n| n as u32)
        .ok_or_else(|| Error::InvalidParameter(format!("parameter {name:?} is not a u32")))
}

pub(crate) fn amount(object: &Value, name: &'static str) -> Result<u64, Error> {
    object
        .get(name)
        .and_then(params::as_amount)
        .ok_or_else(|| Error::InvalidParameter(format!("parameter {name:?} is not a uint64 amount")))
}

pub(crate) fn string(object: &Value, name: &'static str) -> Result<String, Error> {
    object
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidParameter(format!("parameter {name:?} is not a string")))
}
