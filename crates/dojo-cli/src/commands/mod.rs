pub mod context;
pub mod dashboard;
pub mod personas;
pub mod profile;
pub mod train;
pub mod weights;
