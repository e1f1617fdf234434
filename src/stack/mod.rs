//! Stack layout
//!
//! Pure and deterministic:
//! - Records are consumed in dataset order, never re-sorted
//! - Placement depends only on the initial anchor, settings and records
//! - No rendering or physics dependencies; units are passive data

pub mod builder;
pub mod partition;
pub mod registry;
pub mod state;
pub mod transform;

pub use builder::{BuildReport, StackBuilder};
pub use partition::{layer_count, partition};
pub use registry::StackRegistry;
pub use state::{SimulationMode, StackDefinition, Unit};
pub use transform::Transform;
