pub mod error;
pub mod exit;
mod signals;
pub mod spawn;
pub mod target;

pub use error::LaunchError;
pub use exit::ExitOutcome;
pub use spawn::launch;
pub use target::TargetProgram;
