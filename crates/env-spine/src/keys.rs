use std::fmt;

/// The configuration variables every target program is guaranteed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    DatabaseUrl,
    Host,
    LocalPort,
    Debug,
}

impl ConfigKey {
    /// Resolution order. Child environments append missing keys in this order too.
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::DatabaseUrl,
        ConfigKey::Host,
        ConfigKey::LocalPort,
        ConfigKey::Debug,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::DatabaseUrl => "DATABASE_URL",
            Self::Host => "HOST",
            Self::LocalPort => "LOCAL_PORT",
            Self::Debug => "DEBUG",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            Self::DatabaseUrl => "sqlite:///fraternity.db",
            Self::Host => "127.0.0.1",
            Self::LocalPort => "8080",
            Self::Debug => "True",
        }
    }

    /// Exact, case-sensitive lookup by variable name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
