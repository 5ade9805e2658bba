//! Configuration resolution for the CLI.
//!
//! Settings resolve in order:
//! 1. Command-line flags
//! 2. Environment variables (`RANKMETER_SEED`, `RANKMETER_LIST_LEN`)
//! 3. Defaults from [`rankmeter_core::config`]

use anyhow::{anyhow, bail, Context, Result};
use rankmeter_core::config::{DEFAULT_LIST_LEN, DEFAULT_SEED};

use crate::commands::parse_flag;

/// Environment variable for the randomize/shuffle seed
const SEED_ENV: &str = "RANKMETER_SEED";

/// Environment variable for the initial list length in interactive mode
const LIST_LEN_ENV: &str = "RANKMETER_LIST_LEN";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Seed for randomize and shuffle
    pub seed: u64,
    /// Length of a fresh list when none is given on the command line
    pub list_len: usize,
}

impl Settings {
    /// Resolves settings from flags and the process environment.
    pub fn resolve(seed: Option<u64>, list_len: Option<usize>) -> Result<Self> {
        Self::resolve_with(seed, list_len, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        seed: Option<u64>,
        list_len: Option<usize>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let seed = match seed {
            Some(seed) => seed,
            None => env_value(&env, SEED_ENV)?.unwrap_or(DEFAULT_SEED),
        };
        let list_len = match list_len {
            Some(len) => len,
            None => env_value(&env, LIST_LEN_ENV)?.unwrap_or(DEFAULT_LIST_LEN),
        };
        if list_len == 0 {
            bail!("List length must be at least 1");
        }
        Ok(Self { seed, list_len })
    }
}

fn env_value<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid ${} value: {:?}", key, raw))
        })
        .transpose()
}

/// Builds the initial `(grade, relevant)` entries from `--grades` and `--relevant`.
///
/// Either list may be given alone: missing grades are empty (read as 0),
/// missing flags are not relevant. When both are given their lengths must
/// match. Returns `None` when neither is given.
pub fn initial_entries(
    grades: Option<&[String]>,
    relevant: Option<&[String]>,
) -> Result<Option<Vec<(String, bool)>>> {
    let flags = relevant
        .map(|flags| {
            flags
                .iter()
                .map(|flag| parse_flag(flag))
                .collect::<Result<Vec<bool>>>()
        })
        .transpose()
        .context("Failed to parse --relevant")?;

    let entries: Vec<(String, bool)> = match (grades, flags) {
        (None, None) => return Ok(None),
        (Some(grades), None) => grades
            .iter()
            .map(|g| (g.trim().to_string(), false))
            .collect(),
        (None, Some(flags)) => flags.into_iter().map(|f| (String::new(), f)).collect(),
        (Some(grades), Some(flags)) => {
            if grades.len() != flags.len() {
                return Err(anyhow!(
                    "--grades has {} entries but --relevant has {}",
                    grades.len(),
                    flags.len()
                ));
            }
            grades
                .iter()
                .map(|g| g.trim().to_string())
                .zip(flags)
                .collect()
        }
    };

    Ok(Some(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve_with(None, None, env_from(&[])).unwrap();
        assert_eq!(settings.seed, DEFAULT_SEED);
        assert_eq!(settings.list_len, DEFAULT_LIST_LEN);
    }

    #[test]
    fn test_env_overrides_defaults() {
        let env = env_from(&[(SEED_ENV, "99"), (LIST_LEN_ENV, " 4 ")]);
        let settings = Settings::resolve_with(None, None, env).unwrap();
        assert_eq!(settings, Settings { seed: 99, list_len: 4 });
    }

    #[test]
    fn test_flags_override_env() {
        let env = env_from(&[(SEED_ENV, "99"), (LIST_LEN_ENV, "4")]);
        let settings = Settings::resolve_with(Some(1), Some(7), env).unwrap();
        assert_eq!(settings, Settings { seed: 1, list_len: 7 });
    }

    #[test]
    fn test_invalid_env_value() {
        let env = env_from(&[(SEED_ENV, "lots")]);
        let err = Settings::resolve_with(None, None, env).unwrap_err();
        assert!(err.to_string().contains("RANKMETER_SEED"));
    }

    #[test]
    fn test_zero_list_len_rejected() {
        assert!(Settings::resolve_with(None, Some(0), env_from(&[])).is_err());
    }

    #[test]
    fn test_initial_entries() {
        assert!(initial_entries(None, None).unwrap().is_none());

        let grades = strings(&["3", " 2", ""]);
        let flags = strings(&["1", "0", "yes"]);
        let entries = initial_entries(Some(grades.as_slice()), Some(flags.as_slice()))
            .unwrap()
            .unwrap();
        assert_eq!(
            entries,
            vec![
                ("3".to_string(), true),
                ("2".to_string(), false),
                (String::new(), true)
            ]
        );

        let only_flags = initial_entries(None, Some(flags.as_slice())).unwrap().unwrap();
        assert!(only_flags.iter().all(|(grade, _)| grade.is_empty()));
    }

    #[test]
    fn test_initial_entries_errors() {
        let grades = strings(&["3", "2"]);
        let flags = strings(&["1"]);
        assert!(initial_entries(Some(grades.as_slice()), Some(flags.as_slice())).is_err());

        let bad = strings(&["maybe"]);
        let err = initial_entries(None, Some(bad.as_slice())).unwrap_err();
        assert!(err.to_string().contains("--relevant"));
    }
}
