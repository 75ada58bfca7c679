use env_spine::{ConfigKey, ConfigSet};
use std::ffi::OsString;
use url::Url;

const MASK: &str = "****";

/// Hide the password in a connection URI's userinfo. Values that do not
/// parse as a URL are cut down to their scheme.
pub fn redact_database_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_some() && url.set_password(Some(MASK)).is_err() {
                return format!("{}://{MASK}", url.scheme());
            }
            url.to_string()
        }
        Err(_) => match raw.split_once("://") {
            Some((scheme, _)) => format!("{scheme}://{MASK}"),
            None => MASK.to_string(),
        },
    }
}

/// A copy of `config` that is safe to log.
pub fn redact_config(config: &ConfigSet) -> ConfigSet {
    config.map_values(|key, value| {
        (key == ConfigKey::DatabaseUrl)
            .then(|| OsString::from(redact_database_url(&value.to_string_lossy())))
    })
}
