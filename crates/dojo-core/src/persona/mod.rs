//! Persona domain module.
//!
//! Personas are read-only reference data fetched once at startup.
//!
//! # Module Structure
//!
//! - `model`: Simulated buyer persona (`Persona`)
//! - `catalog`: Ordered, immutable set of personas known to the client
//! - `repository`: Port for listing personas

mod catalog;
mod model;
mod repository;

pub use catalog::PersonaCatalog;
pub use model::Persona;
pub use repository::PersonaRepository;
