//! Mosaic definition variant builder

use serde_json::Value;

use keylink_wire::{MosaicDefinition, SignTx};

use super::{amount, number_u32, string};
use crate::error::Error;
use crate::params::{self, Kind, Rule};

pub(super) fn build(transaction: &Value, message: &mut SignTx) -> Result<(), Error> {
    params::validate(
        transaction,
        &[
            Rule::required("nonce", Kind::Number),
            Rule::required("mosaicId", Kind::String),
            Rule::required("flags", Kind::Number),
            Rule::required("divisibility", Kind::Number),
            Rule::required("duration", Kind::Amount),
        ],
    )
    .map_err(Error::invalid_parameter)?;

    message.mosaic_definition = Some(MosaicDefinition {
        nonce: number_u32(transaction, "nonce")?,
        mosaic_id: string(transaction, "mosaicId")?,
        flags: number_u32(transaction, "flags")?,
        divisibility: number_u32(transaction, "divisibility")?,
        duration: amount(transaction, "duration")?,
    });

    Ok(())
}
