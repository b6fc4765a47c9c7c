//! Namespace registration variant builder
//!
//! Root registrations (`registrationType == 0`) are bounded by a block
//! `duration`; sub-namespaces (`== 1`) are anchored to a `parentId`. Any
//! other registration type is invalid.

use serde_json::Value;

use keylink_wire::{NamespaceRegistration, SignTx};

use super::{amount, number_u32, string};
use crate::error::Error;
use crate::params::{self, Kind, Rule};

pub(super) fn build(transaction: &Value, message: &mut SignTx) -> Result<(), Error> {
    params::validate(
        transaction,
        &[
            Rule::required("namespaceName", Kind::String),
            Rule::required("registrationType", Kind::Number),
            Rule::required("id", Kind::String),
        ],
    )
    .map_err(Error::invalid_parameter)?;

    let registration_type = number_u32(transaction, "registrationType")?;
    let mut registration = NamespaceRegistration {
        registration_type,
        namespace_name: string(transaction, "namespaceName")?,
        id: string(transaction, "id")?,
        duration: None,
        parent_id: None,
    };

    match registration_type {
        0 => {
            params::validate(transaction, &[Rule::required("duration", Kind::Amount)])
                .map_err(Error::invalid_parameter)?;
            registration.duration = Some(amount(transaction, "duration")?);
        }
        1 => {
            params::validate(transaction, &[Rule::required("parentId", Kind::String)])
                .map_err(Error::invalid_parameter)?;
            registration.parent_id = Some(string(transaction, "parentId")?);
        }
        other => {
            return Err(Error::InvalidParameter(format!(
                "invalid registration type: {other}"
            )))
        }
    }

    message.namespace_registration = Some(registration);
    Ok(())
}
