use crate::resolve::ConfigSet;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

/// An explicit, ordered copy of a process environment.
///
/// Names and values are kept as `OsString` so variables that are not valid
/// UTF-8 pass through to the child byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: Vec<(OsString, OsString)>,
}

impl EnvSnapshot {
    /// Read the current process environment once.
    pub fn capture() -> Self {
        Self::from_pairs(std::env::vars_os())
    }

    /// Build a snapshot from explicit pairs. A repeated name replaces the
    /// earlier value but keeps its original position.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut snapshot = Self::default();
        for (name, value) in pairs {
            snapshot.set(name.into(), value.into());
        }
        snapshot
    }

    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&OsStr> {
        let name = name.as_ref();
        self.vars
            .iter()
            .find(|(n, _)| n.as_os_str() == name)
            .map(|(_, v)| v.as_os_str())
    }

    /// Value as text, with invalid UTF-8 replaced.
    pub fn get_lossy(&self, name: impl AsRef<OsStr>) -> Option<Cow<'_, str>> {
        self.get(name).map(OsStr::to_string_lossy)
    }

    pub fn contains(&self, name: impl AsRef<OsStr>) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(n, v)| (n.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The environment a child should inherit: every pair of `self` in its
    /// original order, with the configuration keys carrying their resolved
    /// values. Keys the snapshot lacks are appended in `ConfigKey::ALL` order.
    pub fn with_config(&self, config: &ConfigSet) -> EnvSnapshot {
        let mut child = self.clone();
        for entry in config.entries() {
            child.set(OsString::from(entry.key.name()), entry.value.clone());
        }
        child
    }

    fn set(&mut self, name: OsString, value: OsString) {
        match self.vars.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((name, value)),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigKey;

    #[test]
    fn duplicate_names_keep_first_position() {
        let env = EnvSnapshot::from_pairs([("A", "1"), ("B", "2"), ("A", "3")]);
        let pairs: Vec<_> = env.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (OsStr::new("A"), OsStr::new("3")),
                (OsStr::new("B"), OsStr::new("2")),
            ]
        );
    }

    #[test]
    fn get_distinguishes_unset_from_empty() {
        let env = EnvSnapshot::from_pairs([("EMPTY", "")]);
        assert_eq!(env.get("EMPTY"), Some(OsStr::new("")));
        assert_eq!(env.get("MISSING"), None);
        assert!(env.contains("EMPTY"));
        assert!(!env.contains("MISSING"));
    }

    #[test]
    fn with_config_preserves_unrelated_pairs_and_order() {
        let env = EnvSnapshot::from_pairs([
            ("PATH", "/usr/bin"),
            ("HOST", "0.0.0.0"),
            ("HOME", "/home/treasurer"),
        ]);
        let config = ConfigSet::resolve(&env);
        let child = env.with_config(&config);

        let names: Vec<_> = child.iter().map(|(n, _)| n.to_os_string()).collect();
        assert_eq!(
            names,
            vec![
                OsString::from("PATH"),
                OsString::from("HOST"),
                OsString::from("HOME"),
                OsString::from("DATABASE_URL"),
                OsString::from("LOCAL_PORT"),
                OsString::from("DEBUG"),
            ]
        );
        assert_eq!(child.get("PATH"), Some(OsStr::new("/usr/bin")));
        assert_eq!(child.get("HOME"), Some(OsStr::new("/home/treasurer")));
        assert_eq!(child.get("HOST"), Some(OsStr::new("0.0.0.0")));
    }

    #[test]
    fn with_config_replaces_empty_values_in_place() {
        let env = EnvSnapshot::from_pairs([("DEBUG", ""), ("OTHER", "x")]);
        let child = env.with_config(&ConfigSet::resolve(&env));
        let (first_name, first_value) = child.iter().next().unwrap();
        assert_eq!(first_name, OsStr::new("DEBUG"));
        assert_eq!(first_value, ConfigKey::Debug.default_value());
        assert_eq!(child.len(), 2 + 3);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_values_pass_through() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(&[0x66, 0x6f, 0xff, 0x6f]);
        let env = EnvSnapshot::from_pairs([(OsStr::new("BLOB"), raw)]);
        let child = env.with_config(&ConfigSet::resolve(&env));
        assert_eq!(child.get("BLOB"), Some(raw));
        assert_eq!(child.get_lossy("BLOB").as_deref(), Some("fo\u{fffd}o"));
    }
}
