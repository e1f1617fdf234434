//! Stack Lab - data-driven block stacks with a timed stability test
//!
//! Core modules:
//! - `stack`: Deterministic layout (partitioning, placement, registry)
//! - `session`: Countdown state machine that removes weak blocks
//! - `view`: Cyclic selection of the stack on display
//! - `settings`: Data-driven layout and session configuration

pub mod error;
pub mod record;
pub mod session;
pub mod settings;
pub mod stack;
pub mod view;

pub use error::{Result, StackError};
pub use record::{Category, Record};
pub use session::{SessionController, SessionEvent, SessionState};
pub use settings::{CategoryPolicy, Settings};
pub use stack::{
    BuildReport, SimulationMode, StackBuilder, StackDefinition, StackRegistry, Transform, Unit,
};
pub use view::ViewSelector;

/// Layout and session defaults
pub mod consts {
    use glam::Vec3;

    /// Block extents: width across the layer, height, depth
    pub const BLOCK_SIZE: Vec3 = Vec3::new(0.25, 0.15, 0.85);
    /// Gap between blocks in a layer
    pub const HORIZONTAL_SPACING: f32 = 0.01;
    /// Gap between layers
    pub const VERTICAL_SPACING: f32 = 0.01;
    /// Blocks per layer
    pub const LAYER_CAPACITY: usize = 3;

    /// Default test length (one tick per second)
    pub const COUNTDOWN_SECONDS: u32 = 10;
}
