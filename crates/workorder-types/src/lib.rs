//! Work order schemas and translation between the client and TracOS.
//!
//! Two disjoint representations of the same maintenance task are modelled here:
//!
//! - [`ExternalWorkOrder`] - the client's schema, exchanged as JSON files
//! - [`InternalWorkOrder`] - the canonical TracOS schema, held in MongoDB
//!
//! # Modules
//!
//! - [`validate`] - required-field gate run on raw client JSON
//! - [`forward`] - client → TracOS translation
//! - [`reverse`] - TracOS → client translation
//!
//! Nothing in this crate performs I/O; the translators are pure functions.
//!
//! # Example
//!
//! ```ignore
//! use workorder_types::{forward, reverse, ExternalWorkOrder};
//!
//! let external = ExternalWorkOrder::from_json(value)?;
//! let internal = forward::to_internal(&external)?;
//! let echoed = reverse::to_external(&internal);
//! ```

mod error;
mod external;
pub mod forward;
mod internal;
pub mod reverse;
mod status;
mod timestamp;
pub mod validate;

pub use error::{TranslationError, ValidationError};
pub use external::ExternalWorkOrder;
pub use internal::InternalWorkOrder;
pub use status::WorkOrderStatus;
pub use timestamp::Timestamp;
pub use validate::{validate, REQUIRED_FIELDS};
