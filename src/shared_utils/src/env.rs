use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// An environment variable is set but its value does not parse.
#[derive(Debug, Error)]
#[error("Invalid value {value:?} for environment variable {name}: {reason}")]
pub struct InvalidEnvVarError {
    pub name: String,
    pub value: String,
    pub reason: String,
}

/// Reads an optional environment variable. Unset, blank and non-UTF-8 values
/// all count as absent.
pub fn get_env_var_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Looks `name` up through `lookup` and parses it.
///
/// `lookup` is usually [`get_env_var_opt`]; tests pass a map instead of
/// touching the process environment.
pub fn parse_var_with<T, F>(name: &str, lookup: F) -> Result<Option<T>, InvalidEnvVarError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| InvalidEnvVarError {
            name: name.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        })
}
