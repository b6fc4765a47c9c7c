//! Keylink Shared Wire Types
//!
//! This crate provides the wire-protocol messages exchanged with the signing
//! device firmware, the protocol constants (network types, transaction type
//! codes), and the derivation-path codec shared by the host core and tooling.
//!
//! The message structs are written by hand with `prost` derives; the firmware
//! schema is small and stable enough that generated code would only add a
//! build-time protoc dependency.

pub mod path;

use prost::Message;
use serde::Serialize;

/// Network type identifiers carried in every transaction.
pub mod network {
    /// Main network (`0x68`)
    pub const MAINNET: u32 = 0x68;
    /// Test network (`0x98`)
    pub const TESTNET: u32 = 0x98;
    /// Mijin private network (`0x60`)
    pub const MIJIN: u32 = 0x60;
    /// Mijin test network (`0x90`)
    pub const MIJIN_TEST: u32 = 0x90;
}

/// Transaction type codes understood by the firmware.
pub mod tx_type {
    /// Transfer transaction (`0x4154`)
    pub const TRANSFER: u32 = 0x4154;
    /// Mosaic definition transaction (`0x414D`)
    pub const MOSAIC_DEFINITION: u32 = 0x414D;
    /// Namespace registration transaction (`0x414E`)
    pub const NAMESPACE_REGISTRATION: u32 = 0x414E;
}

/// Fields shared by every transaction, regardless of variant.
#[derive(Clone, PartialEq, Message)]
pub struct TransactionCommon {
    #[prost(uint32, tag = "1")]
    pub tx_type: u32,

    #[prost(uint32, tag = "2")]
    pub network_type: u32,

    #[prost(uint32, tag = "3")]
    pub version: u32,

    #[prost(uint64, tag = "4")]
    pub max_fee: u64,

    #[prost(uint64, tag = "5")]
    pub deadline: u64,
}

/// A recipient address qualified with its network.
#[derive(Clone, PartialEq, Message)]
pub struct Address {
    #[prost(string, tag = "1")]
    pub address: String,

    #[prost(uint32, tag = "2")]
    pub network_type: u32,
}

/// One mosaic attached to a transfer.
#[derive(Clone, PartialEq, Message)]
pub struct Mosaic {
    /// Mosaic identifier as a hexadecimal string.
    #[prost(string, tag = "1")]
    pub id: String,

    #[prost(uint64, tag = "2")]
    pub amount: u64,
}

/// Optional plain or encrypted message attached to a transfer.
#[derive(Clone, PartialEq, Message)]
pub struct TransferMessage {
    #[prost(string, tag = "1")]
    pub payload: String,

    #[prost(uint32, tag = "2")]
    pub message_type: u32,
}

/// Transfer variant payload.
#[derive(Clone, PartialEq, Message)]
pub struct Transfer {
    #[prost(message, optional, tag = "1")]
    pub recipient_address: Option<Address>,

    #[prost(message, repeated, tag = "2")]
    pub mosaics: Vec<Mosaic>,

    #[prost(message, optional, tag = "3")]
    pub message: Option<TransferMessage>,
}

/// Namespace registration variant payload.
///
/// `duration` is set for root registrations, `parent_id` for sub-namespaces;
/// exactly one of the two is present in a valid message.
#[derive(Clone, PartialEq, Message)]
pub struct NamespaceRegistration {
    #[prost(uint32, tag = "1")]
    pub registration_type: u32,

    #[prost(string, tag = "2")]
    pub namespace_name: String,

    /// Namespace identifier as a hexadecimal string.
    #[prost(string, tag = "3")]
    pub id: String,

    #[prost(uint64, optional, tag = "4")]
    pub duration: Option<u64>,

    #[prost(string, optional, tag = "5")]
    pub parent_id: Option<String>,
}

/// Mosaic definition variant payload.
#[derive(Clone, PartialEq, Message)]
pub struct MosaicDefinition {
    #[prost(uint32, tag = "1")]
    pub nonce: u32,

    /// Mosaic identifier as a hexadecimal string.
    #[prost(string, tag = "2")]
    pub mosaic_id: String,

    #[prost(uint32, tag = "3")]
    pub flags: u32,

    #[prost(uint32, tag = "4")]
    pub divisibility: u32,

    #[prost(uint64, tag = "5")]
    pub duration: u64,
}

/// The sign-transaction request sent to the device.
///
/// The common sub-message is always present; exactly one variant field is set,
/// matching `transaction.tx_type`.
#[derive(Clone, PartialEq, Message)]
pub struct SignTx {
    #[prost(uint32, repeated, tag = "1")]
    pub address_n: Vec<u32>,

    #[prost(string, tag = "2")]
    pub generation_hash: String,

    #[prost(message, optional, tag = "3")]
    pub transaction: Option<TransactionCommon>,

    #[prost(message, optional, tag = "4")]
    pub transfer: Option<Transfer>,

    #[prost(message, optional, tag = "5")]
    pub namespace_registration: Option<NamespaceRegistration>,

    #[prost(message, optional, tag = "6")]
    pub mosaic_definition: Option<MosaicDefinition>,
}

/// Public key exported by the device.
#[derive(Clone, PartialEq, Message, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKey {
    /// Hex-encoded public key bytes.
    #[prost(string, tag = "1")]
    pub public_key: String,
}

/// A transaction signed by the device.
#[derive(Clone, PartialEq, Message, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTx {
    /// Hex-encoded signed transaction payload.
    #[prost(string, tag = "1")]
    pub payload: String,

    /// Hex-encoded transaction hash.
    #[prost(string, tag = "2")]
    pub hash: String,

    /// Hex-encoded detached signature.
    #[prost(string, tag = "3")]
    pub signature: String,
}

impl SignTx {
    /// Create a sign request carrying only the common sub-message.
    ///
    /// Variant payloads are filled in afterwards by the encoder.
    pub fn new(address_n: Vec<u32>, generation_hash: impl Into<String>, transaction: TransactionCommon) -> Self {
        Self {
            address_n,
            generation_hash: generation_hash.into(),
            transaction: Some(transaction),
            ..Default::default()
        }
    }
}

impl Address {
    pub fn new(address: impl Into<String>, network_type: u32) -> Self {
        Self {
            address: address.into(),
            network_type,
        }
    }
}

impl Mosaic {
    pub fn new(id: impl Into<String>, amount: u64) -> Self {
        Self { id: id.into(), amount }
    }
}

/// Encode a wire message into a byte vector.
pub fn encode<M: Message>(message: &M) -> Vec<u8> {
    let mut buf = Vec::with_capacity(message.encoded_len());
    message
        .encode(&mut buf)
        .unwrap_or_else(|_| unreachable!("Vec<u8> has unlimited capacity"));
    buf
}
