//! CLI flags.

mod globals;
pub use globals::GlobalArgs;

mod engine;
pub use engine::EngineArgs;
