//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get a boolean flag. Accepts `1`/`0`, `true`/`false`, `yes`/`no` (case-insensitive).
pub fn get_env_bool(name: &'static str) -> Result<bool, Error> {
    let val = get_env(name)?;
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(Error::WrongFormat(name)),
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_missing_env() {
        assert_eq!(
            get_env("LIB_UTILS_TEST_SURELY_UNSET_VAR"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_SURELY_UNSET_VAR"))
        );
    }

    #[test]
    #[serial]
    fn test_parse_env() {
        env::set_var("LIB_UTILS_TEST_PARSE_U64", " 42 ");
        assert_eq!(get_env_parse::<u64>("LIB_UTILS_TEST_PARSE_U64"), Ok(42));

        env::set_var("LIB_UTILS_TEST_PARSE_BAD", "forty-two");
        assert_eq!(
            get_env_parse::<u64>("LIB_UTILS_TEST_PARSE_BAD"),
            Err(Error::WrongFormat("LIB_UTILS_TEST_PARSE_BAD"))
        );
    }

    #[test]
    #[serial]
    fn test_bool_env() {
        env::set_var("LIB_UTILS_TEST_BOOL_TRUE", "Yes");
        env::set_var("LIB_UTILS_TEST_BOOL_FALSE", "0");
        env::set_var("LIB_UTILS_TEST_BOOL_BAD", "maybe");
        assert_eq!(get_env_bool("LIB_UTILS_TEST_BOOL_TRUE"), Ok(true));
        assert_eq!(get_env_bool("LIB_UTILS_TEST_BOOL_FALSE"), Ok(false));
        assert!(get_env_bool("LIB_UTILS_TEST_BOOL_BAD").is_err());
    }
}
