#[macro_use]
mod par;

pub mod alphabets;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod orf;
pub mod pipeline;
pub mod resolve;
pub mod roles;
pub mod seq;

pub use config::{CallFormat, StartsConfig};
pub use error::{StartsError, StartsResult};
