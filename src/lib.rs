//! Keylink Command Core
//!
//! Host-side framework for driving a connected hardware signing device:
//! a method registry resolves each inbound `{method, payload}` request to a
//! validated [`Command`], the command optionally runs a user-confirmation
//! round trip through the embedding UI, then executes its batches against
//! the device strictly in order, encoding transaction descriptors into the
//! typed wire messages the firmware signs.
//!
//! The physical transport, popup rendering and the signing itself live in
//! the host; they appear here only as seams ([`DeviceCommands`], the
//! [`ui`] channels).
//!
//! ```no_run
//! # async fn example(device: &dyn keylink::DeviceCommands, ui: &mut keylink::UiChannel) -> Result<(), keylink::Error> {
//! use serde_json::json;
//!
//! let request = keylink::Request::new("getPublicKey", json!({
//!     "path": "m/44'/43'/0'/0'/0'",
//! }));
//!
//! let mut command = keylink::find(&request)?;
//! if command.confirm(ui).await? {
//!     let response = command.run(device, ui).await?;
//!     println!("{}", serde_json::to_string(&response).unwrap());
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod device;
pub mod encode;
pub mod error;
pub mod methods;
pub mod params;
pub mod protocol;
pub mod ui;

pub use command::{Batch, Command, Confirmation};
pub use device::DeviceCommands;
pub use error::{Error, ErrorEnvelope};
pub use methods::{find, FirmwareRange, FirmwareVersion};
pub use protocol::{OperationOutput, Request, Response, ResultRecord};
pub use ui::{PopupState, UiChannel, UiEvent, UiHost};
