//! Command lifecycle
//!
//! This module handles:
//! - Normalizing and validating an inbound payload into batches
//! - The user confirmation state machine
//! - Driving the device through the batches, in order
//! - Assembling the single or bundled response

mod bundle;

use serde_json::Value;
use tracing::{debug, info};

use crate::device::DeviceCommands;
use crate::error::Error;
use crate::methods::{FirmwareRange, MethodSpec};
use crate::params::{self, Kind, Rule};
use crate::protocol::Response;
use crate::ui::UiChannel;

/// One unit of device work within a command.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Decoded derivation path.
    pub path: Vec<u32>,
    /// Whether the device must display the derived value for physical
    /// verification, independent of the software confirmation step.
    pub show_on_device: bool,
    /// Transaction descriptor, signing operations only. Variant fields are
    /// validated by the encoder when the batch executes.
    pub transaction: Option<Value>,
    /// Network-identifying hash, signing operations only.
    pub generation_hash: Option<String>,
}

/// Outcome of the confirmation step. Written at most once; `Granted` and
/// `Denied` are final for the command's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Unknown,
    Granted,
    Denied,
}

/// One inbound request's lifecycle: validated at construction, optionally
/// gated by a confirmation round trip, executed batch by batch.
#[derive(Debug)]
pub struct Command {
    spec: &'static MethodSpec,
    batches: Vec<Batch>,
    is_bundle: bool,
    confirmed: Confirmation,
}

impl Command {
    /// Normalize and validate the payload into a command.
    ///
    /// A payload without an explicit `bundle` array is treated as a single
    /// implicit batch built from its own top-level fields, so single-item
    /// and multi-item calls share one code path. Any invalid batch aborts
    /// construction entirely; no device interaction has happened yet.
    pub(crate) fn new(spec: &'static MethodSpec, payload: &Value) -> Result<Self, Error> {
        let is_bundle = payload.get("bundle").is_some();

        let entries: Vec<&Value> = if is_bundle {
            params::validate(payload, &[Rule::required("bundle", Kind::Array)])
                .map_err(Error::validation)?;
            payload["bundle"]
                .as_array()
                .map(|items| items.iter().collect())
                .unwrap_or_default()
        } else {
            vec![payload]
        };

        if entries.is_empty() {
            return Err(Error::Validation("bundle is empty".into()));
        }

        let batches = entries
            .into_iter()
            .map(spec.parse_batch)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            method = spec.name,
            batches = batches.len(),
            is_bundle,
            "command constructed"
        );

        Ok(Self {
            spec,
            batches,
            is_bundle,
            confirmed: Confirmation::Unknown,
        })
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Human-readable description of the operation.
    pub fn info(&self) -> &'static str {
        self.spec.info
    }

    /// Capability tags the caller must hold. Checked by the host's
    /// authorization collaborator.
    pub fn required_capabilities(&self) -> &'static [&'static str] {
        self.spec.required_capabilities
    }

    /// Firmware versions this operation supports.
    pub fn firmware_range(&self) -> FirmwareRange {
        self.spec.firmware_range
    }

    pub fn is_bundle(&self) -> bool {
        self.is_bundle
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn confirmed(&self) -> Confirmation {
        self.confirmed
    }

    /// Run the confirmation round trip, returning whether the user granted
    /// the operation.
    ///
    /// Idempotent: once the decision is terminal, repeated calls return it
    /// without prompting again. Methods that declare no confirmation step
    /// are granted immediately without a notification. Waits for the popup
    /// surface, emits exactly one confirmation request, then suspends until
    /// the single boolean decision arrives; a closed popup resolves as
    /// denial.
    pub async fn confirm(&mut self, ui: &mut UiChannel) -> Result<bool, Error> {
        match self.confirmed {
            Confirmation::Granted => return Ok(true),
            Confirmation::Denied => return Ok(false),
            Confirmation::Unknown => {}
        }

        let Some(confirmation) = &self.spec.confirmation else {
            return Ok(true);
        };

        ui.wait_popup_ready().await?;

        let label = (confirmation.label)(&self.batches);
        debug!(method = self.spec.name, %label, "requesting confirmation");

        let granted = ui.request_confirmation(confirmation.view, label).await;

        self.confirmed = if granted {
            Confirmation::Granted
        } else {
            Confirmation::Denied
        };
        info!(method = self.spec.name, granted, "confirmation resolved");

        Ok(granted)
    }

    /// Execute the batches strictly in order and assemble the response.
    ///
    /// Refuses with `ActionDenied` when confirmation was denied, or was
    /// declared by the method but never granted. Zero device calls happen
    /// in that case.
    pub async fn run(
        &mut self,
        device: &dyn DeviceCommands,
        ui: &mut UiChannel,
    ) -> Result<Response, Error> {
        match (self.confirmed, &self.spec.confirmation) {
            (Confirmation::Denied, _) | (Confirmation::Unknown, Some(_)) => {
                return Err(Error::ActionDenied)
            }
            _ => {}
        }

        bundle::execute(self.spec, &self.batches, self.is_bundle, device, ui).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::find;
    use crate::protocol::Request;
    use serde_json::json;

    fn get_public_key(payload: Value) -> Result<Command, Error> {
        find(&Request::new("getPublicKey", payload))
    }

    #[test]
    fn test_implicit_single_batch() {
        let command = get_public_key(json!({ "path": "m/44'/43'/0'/0'/0'" })).expect("valid");
        assert!(!command.is_bundle());
        assert_eq!(command.batches().len(), 1);
        assert_eq!(command.confirmed(), Confirmation::Unknown);
    }

    #[test]
    fn test_explicit_bundle() {
        let command = get_public_key(json!({
            "bundle": [
                { "path": "m/44'/43'/0'/0'/0'" },
                { "path": "m/44'/43'/1'/0'/0'", "showOnDevice": true },
            ],
        }))
        .expect("valid");
        assert!(command.is_bundle());
        assert_eq!(command.batches().len(), 2);
        assert!(command.batches()[1].show_on_device);
    }

    #[test]
    fn test_single_entry_bundle_stays_bundle() {
        let command = get_public_key(json!({
            "bundle": [{ "path": "m/44'/43'/0'/0'/0'" }],
        }))
        .expect("valid");
        assert!(command.is_bundle());
    }

    #[test]
    fn test_construction_is_atomic() {
        // Second batch invalid: no command at all.
        let err = get_public_key(json!({
            "bundle": [
                { "path": "m/44'/43'/0'/0'/0'" },
                { "path": "m/44'" },
            ],
        }))
        .unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_empty_bundle_rejected() {
        let err = get_public_key(json!({ "bundle": [] })).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_bundle_must_be_array() {
        let err = get_public_key(json!({ "bundle": { "path": "m/44'" } })).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_capability_and_firmware_metadata() {
        let command = get_public_key(json!({ "path": "m/44'/43'/0'/0'/0'" })).expect("valid");
        assert_eq!(command.required_capabilities(), &["read"]);
        assert_eq!(command.firmware_range().min.major, 2);
    }
}
