pub mod env;
pub mod keys;
pub mod resolve;

pub use env::EnvSnapshot;
pub use keys::ConfigKey;
pub use resolve::{ConfigEntry, ConfigSet, Source};
