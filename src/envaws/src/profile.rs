//! Reading profiles out of the shared credentials and config files.

use crate::error::{EnvawsError, Result};
use crate::settings::{expand_home, Settings};
use ini::{Ini, ParseOption};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
pub const REGION: &str = "region";

/// Config file sections are named `[profile <name>]`.
pub const CONFIG_PROFILE_PREFIX: &str = "profile ";

/// Key/value pairs of one INI section.
pub type Section = BTreeMap<String, String>;

/// A parsed profile file.
#[derive(Debug)]
pub struct ProfileStore {
    path: String,
    ini: Ini,
}

impl ProfileStore {
    /// Reads and parses the INI file at `path`, expanding a leading `~`.
    ///
    /// # Errors
    ///
    /// Fails if the home directory cannot be resolved, the file cannot be read, or it is not valid INI.
    pub fn load(path: &str) -> Result<Self> {
        let expanded = expand_home(path)?;
        let content = fs::read_to_string(&expanded)
            .map_err(|e| EnvawsError::FileRead(expanded.display().to_string(), e))?;
        Self::parse(&expanded, &content)
    }

    /// Parses INI `content` that was read from `path`.
    ///
    /// Quotes and backslashes are kept verbatim since secrets are copied as-is.
    ///
    /// # Errors
    ///
    /// Returns [`EnvawsError::Parse`] for malformed INI.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let path = path.display().to_string();
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, options)
            .map_err(|e| EnvawsError::Parse(path.clone(), e))?;
        debug!("parsed {} sections from {}", ini.sections().flatten().count(), path);
        Ok(Self { path, ini })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Named sections, sorted. Keys outside any section are ignored.
    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ini.sections().flatten().map(str::to_string).collect();
        names.sort();
        names.dedup();
        names
    }

    /// The section called exactly `name`, if present.
    pub fn section(&self, name: &str) -> Option<Section> {
        self.ini.section(Some(name)).map(|props| {
            props
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
    }

    /// Looks up `profile`, optionally insisting it carries an access key pair.
    ///
    /// A missing section is an error only when `require_credentials` is set; otherwise an
    /// empty section is returned.
    ///
    /// # Errors
    ///
    /// Returns [`EnvawsError::MissingProfile`] or [`EnvawsError::EmptyKey`] when credentials are required.
    pub fn lookup(&self, profile: &str, require_credentials: bool) -> Result<Section> {
        let Some(section) = self.section(profile) else {
            if require_credentials {
                return Err(EnvawsError::MissingProfile {
                    profile: profile.to_string(),
                    path: self.path.clone(),
                });
            }
            return Ok(Section::new());
        };

        if require_credentials {
            for key in [ACCESS_KEY_ID, SECRET_ACCESS_KEY] {
                if section.get(key).map_or(true, String::is_empty) {
                    return Err(EnvawsError::EmptyKey {
                        key,
                        profile: profile.to_string(),
                    });
                }
            }
        }

        Ok(section)
    }
}

/// Loads one section from the INI file at `path`.
///
/// # Errors
///
/// Any failure from [`ProfileStore::load`] or [`ProfileStore::lookup`].
pub fn load_section(path: &str, profile: &str, require_credentials: bool) -> Result<Section> {
    ProfileStore::load(path)?.lookup(profile, require_credentials)
}

/// Copies every key of `overlay` into `base`, overwriting on collision.
pub fn merge(mut base: Section, overlay: Section) -> Section {
    base.extend(overlay);
    base
}

/// Resolves `profile` from the credentials file, with its config file section layered on top.
///
/// The credentials section must hold both access keys. The config section and the config
/// file itself are optional.
///
/// # Errors
///
/// Fails on any credentials file problem, or if the config file exists but cannot be read or parsed.
pub fn load_params(settings: &Settings, profile: &str) -> Result<Section> {
    let credentials = load_section(&settings.credentials_file, profile, true)?;

    let config_section = format!("{CONFIG_PROFILE_PREFIX}{profile}");
    let config = match load_section(&settings.config_file, &config_section, false) {
        Ok(section) => section,
        Err(e) if e.is_not_found() => {
            debug!("no config file at {}, skipping merge", settings.config_file);
            Section::new()
        }
        Err(e) => return Err(e),
    };

    Ok(merge(credentials, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const CREDENTIALS: &str = "\
[default]
aws_access_key_id = AKIA1
aws_secret_access_key = SECRET1

[work]
aws_access_key_id = AKIA2
aws_secret_access_key = SECRET2
region = eu-west-1
extra = kept

[half]
aws_access_key_id = AKIA3

[blank]
aws_access_key_id =
aws_secret_access_key = SECRET4
";

    fn store() -> ProfileStore {
        ProfileStore::parse(&PathBuf::from("credentials"), CREDENTIALS).unwrap()
    }

    fn section(pairs: &[(&str, &str)]) -> Section {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_lookup_default_returns_exact_pairs() {
        let found = store().lookup("default", true).unwrap();
        assert_eq!(
            found,
            section(&[(ACCESS_KEY_ID, "AKIA1"), (SECRET_ACCESS_KEY, "SECRET1")])
        );
    }

    #[test]
    fn test_lookup_keeps_unrecognized_keys() {
        let found = store().lookup("work", true).unwrap();
        assert_eq!(found.get("extra").map(String::as_str), Some("kept"));
        assert_eq!(found.get(REGION).map(String::as_str), Some("eu-west-1"));
    }

    #[test]
    fn test_lookup_missing_secret_fails() {
        let err = store().lookup("half", true).unwrap_err();
        assert!(matches!(err, EnvawsError::EmptyKey { key: SECRET_ACCESS_KEY, .. }));
    }

    #[test]
    fn test_lookup_empty_access_key_fails() {
        let err = store().lookup("blank", true).unwrap_err();
        assert!(matches!(err, EnvawsError::EmptyKey { key: ACCESS_KEY_ID, .. }));
    }

    #[test]
    fn test_lookup_missing_profile() {
        let err = store().lookup("nope", true).unwrap_err();
        assert_eq!(err.to_string(), "missing nope in credentials");

        let empty = store().lookup("nope", false).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_lookup_without_check_allows_partial_sections() {
        let found = store().lookup("half", false).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_profile_names_sorted() {
        assert_eq!(store().profile_names(), vec!["blank", "default", "half", "work"]);
    }

    #[test]
    fn test_values_are_not_unquoted() {
        let store = ProfileStore::parse(
            &PathBuf::from("credentials"),
            "[q]\naws_access_key_id = \"AKIA\"\naws_secret_access_key = a\\b\n",
        )
        .unwrap();
        let found = store.lookup("q", true).unwrap();
        assert_eq!(found[ACCESS_KEY_ID], "\"AKIA\"");
        assert_eq!(found[SECRET_ACCESS_KEY], "a\\b");
    }

    #[test]
    fn test_merge_config_wins() {
        let merged = merge(
            section(&[("a", "1"), ("b", "2")]),
            section(&[("b", "9"), ("c", "3")]),
        );
        assert_eq!(merged, section(&[("a", "1"), ("b", "9"), ("c", "3")]));
    }

    #[test]
    fn test_load_section_missing_file() {
        let err = load_section("/definitely/not/here/credentials", "default", true).unwrap_err();
        assert!(err.is_not_found());
    }
}
