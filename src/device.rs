//! Device command seam
//!
//! One async operation per operation kind. The core treats the device as an
//! opaque, exclusively-owned collaborator: calls are awaited one at a time,
//! failures surface verbatim and are never retried at this layer.

use anyhow::Result;
use async_trait::async_trait;
use keylink_wire::{PublicKey, SignTx, SignedTx};

/// Operations the connected signing device exposes to the core.
#[async_trait]
pub trait DeviceCommands: Send + Sync {
    /// Export the public key for a derivation path, optionally showing the
    /// derived value on the device display for physical verification.
    async fn get_public_key(&self, path: &[u32], show_on_device: bool) -> Result<PublicKey>;

    /// Sign an encoded transaction message.
    async fn sign_transaction(&self, message: SignTx) -> Result<SignedTx>;
}
