pub mod env;
pub mod tracing_init;

pub use env::EngineSettings;
pub use tracing_init::init_tracing;
