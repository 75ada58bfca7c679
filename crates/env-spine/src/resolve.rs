use crate::env::EnvSnapshot;
use crate::keys::ConfigKey;
use log::debug;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Present and non-empty in the environment.
    Inherited,
    /// Unset or empty, so the literal default was applied.
    Defaulted,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigEntry {
    #[serde(serialize_with = "serialize_key")]
    pub key: ConfigKey,
    #[serde(serialize_with = "serialize_lossy")]
    pub value: OsString,
    pub source: Source,
}

/// The resolved configuration: one non-empty value per [`ConfigKey`], in
/// `ConfigKey::ALL` order.
///
/// Equality compares keys and values only; `source` is provenance.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ConfigSet {
    entries: Vec<ConfigEntry>,
}

impl ConfigSet {
    /// Resolve every key against `env`. An empty value counts as unset, like
    /// shell `${VAR:-default}`. Cannot fail.
    pub fn resolve(env: &EnvSnapshot) -> Self {
        let entries = ConfigKey::ALL
            .into_iter()
            .map(|key| match env.get(key.name()) {
                Some(value) if !value.is_empty() => ConfigEntry {
                    key,
                    value: value.to_os_string(),
                    source: Source::Inherited,
                },
                present => {
                    debug!(
                        "{} is {}; using default {:?}",
                        key,
                        if present.is_some() { "empty" } else { "unset" },
                        key.default_value()
                    );
                    ConfigEntry {
                        key,
                        value: OsString::from(key.default_value()),
                        source: Source::Defaulted,
                    }
                }
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: ConfigKey) -> &OsStr {
        &self.entry(key).value
    }

    pub fn get_str(&self, key: ConfigKey) -> Cow<'_, str> {
        self.get(key).to_string_lossy()
    }

    pub fn source(&self, key: ConfigKey) -> Source {
        self.entry(key).source
    }

    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    /// Keys that fell back to their default.
    pub fn defaulted(&self) -> impl Iterator<Item = ConfigKey> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.source == Source::Defaulted)
            .map(|entry| entry.key)
    }

    /// A copy with selected values rewritten, e.g. for display. `f` returns
    /// `None` to keep a value as is.
    pub fn map_values<F>(&self, mut f: F) -> ConfigSet
    where
        F: FnMut(ConfigKey, &OsStr) -> Option<OsString>,
    {
        let entries = self
            .entries
            .iter()
            .map(|entry| ConfigEntry {
                key: entry.key,
                value: f(entry.key, &entry.value).unwrap_or_else(|| entry.value.clone()),
                source: entry.source,
            })
            .collect();
        ConfigSet { entries }
    }

    fn entry(&self, key: ConfigKey) -> &ConfigEntry {
        // `resolve` fills every key in ALL order.
        &self.entries[key as usize]
    }
}

impl PartialEq for ConfigSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.key == b.key && a.value == b.value)
    }
}

impl Eq for ConfigSet {}

fn serialize_key<S: Serializer>(key: &ConfigKey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(key.name())
}

fn serialize_lossy<S: Serializer>(value: &OsString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string_lossy())
}
