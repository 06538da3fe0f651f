//! Identity domain module.
//!
//! # Module Structure
//!
//! - `model`: Trainee identity (`Identity`, `Role`)
//! - `assertion`: Out-of-band capability claim attached to privileged requests
//! - `service`: Port for registering or updating an identity remotely

mod assertion;
mod model;
mod service;

pub use assertion::{IDENTITY_ASSERTION_HEADER, IdentityAssertion};
pub use model::{Identity, Role};
pub use service::ProfileService;
