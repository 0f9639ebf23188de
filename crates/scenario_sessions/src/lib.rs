pub mod config;
pub mod error;
pub mod manager;
pub mod scheduler;
pub mod session;
pub mod store;

pub use config::SchedulerConfig;
pub use error::SessionError;
pub use manager::SimulationManager;
pub use scheduler::SimulationScheduler;
pub use session::{SessionSnapshot, SessionStatus};
pub use store::SessionStore;
