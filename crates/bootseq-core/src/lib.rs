pub mod config;
pub mod env_dump;
pub mod error;
pub mod identity;
pub mod idle;
pub mod invocation;
pub mod readiness;
pub mod sequence;

pub use error::{BootstrapError, Result};
