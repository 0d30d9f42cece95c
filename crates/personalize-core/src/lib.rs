pub mod catalog;
pub mod config;
pub mod detect;
pub mod error;
pub mod guard;
pub mod host;
pub mod io;
pub mod item;
pub mod mount;
pub mod paths;
pub mod preview;
pub mod serialize;
pub mod validate;
pub mod wizard;

pub use error::{PersonalizeError, Result};
