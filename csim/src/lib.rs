//! Set-associative LRU cache simulator (`csim`)

// Modules
pub mod cache;
pub mod data;
pub mod geometry;
pub mod sim;
pub mod trace;

// Exports
pub use self::{
	cache::{Cache, Outcome},
	geometry::{Geometry, SetIdx, Tag},
	sim::Simulator,
	trace::TraceReader,
};
