//! Scoring weight configuration.
//!
//! Weights are scoped by user, team or global default. Resolution picks the
//! most specific scope that has an override.
//!
//! # Module Structure
//!
//! - `model`: `WeightVector`, `WeightScope`, `WeightTarget`
//! - `resolver`: Precedence resolution and guarded saves (`WeightResolver`)
//! - `store`: Port to the remote configuration store

mod model;
mod resolver;
mod store;

pub use model::{WeightScope, WeightTarget, WeightVector};
pub use resolver::{ResolvedWeights, WeightResolver, resolution_order};
pub use store::WeightStore;
