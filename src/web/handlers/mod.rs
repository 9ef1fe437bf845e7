//! Web handlers module
//!
//! One module per protocol document. Handlers stay thin and delegate to the
//! [`DeviceEmulator`](crate::device::DeviceEmulator) held in the app state.

pub mod discover;
pub mod index;
pub mod lineup;
pub mod stream;

pub use crate::web::responses::*;
