//! Export AWS credentials from the shared profile files as shell or Terraform variables.
//!
//! ```text
//! eval $(envaws env default)
//! eval $(envaws unset)
//! ```

pub mod cli;
pub mod error;
pub mod probe;
pub mod profile;
pub mod render;
pub mod role;
pub mod sdk;
pub mod settings;

pub use error::{EnvawsError, Result};
