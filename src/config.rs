/// Runtime configuration
///
/// Built from command-line arguments. Global options may appear anywhere
/// before a literal `--`; everything else is handed back as the command.

use crate::error::{LedgerError, Result};
use crate::store::{FlushPolicy, LoadPolicy, StoreOptions};
use std::path::PathBuf;

/// Directory under the user's home that holds the card list
const DATA_DIR: &str = ".card-ledger";
const DATA_FILE: &str = "CardList.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: Option<PathBuf>, // None means the default, resolved on demand
    pub load_policy: LoadPolicy,
    pub flush_policy: FlushPolicy,
    pub json: bool,
}

impl Config {
    /// `~/.card-ledger/CardList.csv`
    pub fn default_data_file() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            LedgerError::Config("Could not determine home directory".to_string())
        })?;
        Ok(home.join(DATA_DIR).join(DATA_FILE))
    }

    /// Split `args` into a config and the remaining command words
    ///
    /// # Arguments
    /// * `args` - Arguments without the program name
    ///
    /// # Returns
    /// * `Ok((Config, Vec<String>))` - Config plus command and its arguments
    /// * `Err(LedgerError::Config)` - Unknown option or `--file` without a path
    pub fn from_args(args: &[String]) -> Result<(Config, Vec<String>)> {
        let mut data_file: Option<PathBuf> = None;
        let mut load_policy = LoadPolicy::default();
        let mut flush_policy = FlushPolicy::default();
        let mut json = false;
        let mut rest = Vec::new();

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "--" => {
                    rest.extend(args[i + 1..].iter().cloned());
                    break;
                }
                "--file" | "-f" => {
                    i += 1;
                    let path = args.get(i).ok_or_else(|| {
                        LedgerError::Config(format!("{} needs a path", arg))
                    })?;
                    data_file = Some(PathBuf::from(path));
                }
                "--strict" => load_policy = LoadPolicy::Strict,
                "--deferred" => flush_policy = FlushPolicy::Deferred,
                "--json" => json = true,
                _ if arg.starts_with("--file=") => {
                    data_file = Some(PathBuf::from(&arg["--file=".len()..]));
                }
                // "-2" is a count, "--bogus" is a mistake
                _ if arg.starts_with("--") && !is_help_or_version(arg) => {
                    return Err(LedgerError::Config(format!("Unknown option: {}", arg)));
                }
                _ => rest.push(arg.to_string()),
            }
            i += 1;
        }

        let config = Config {
            data_file,
            load_policy,
            flush_policy,
            json,
        };

        Ok((config, rest))
    }

    /// The card list to open: `--file` if given, otherwise the default
    ///
    /// Only touches the home directory when no `--file` was passed, so
    /// `help` and `version` work without one.
    pub fn resolve_data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Self::default_data_file(),
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            load_policy: self.load_policy,
            flush_policy: self.flush_policy,
        }
    }
}

fn is_help_or_version(arg: &str) -> bool {
    matches!(arg, "--help" | "--version")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options_anywhere() {
        let (config, rest) =
            Config::from_args(&args(&["add", "--file", "/tmp/cards.csv", "Foo", "-2", "--strict"]))
                .unwrap();

        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/cards.csv")));
        assert_eq!(config.load_policy, LoadPolicy::Strict);
        assert_eq!(config.flush_policy, FlushPolicy::WriteThrough);
        assert!(!config.json);
        assert_eq!(rest, args(&["add", "Foo", "-2"]));
    }

    #[test]
    fn test_parse_file_equals_and_flags() {
        let (config, rest) =
            Config::from_args(&args(&["--file=cards.csv", "--deferred", "--json", "list"])).unwrap();

        assert_eq!(config.resolve_data_file().unwrap(), PathBuf::from("cards.csv"));
        assert_eq!(config.flush_policy, FlushPolicy::Deferred);
        assert!(config.json);
        assert_eq!(rest, args(&["list"]));
    }

    #[test]
    fn test_double_dash_stops_parsing() {
        let (_, rest) =
            Config::from_args(&args(&["-f", "x.csv", "add", "--", "--weird name--", "1"])).unwrap();
        assert_eq!(rest, args(&["add", "--weird name--", "1"]));
    }

    #[test]
    fn test_unknown_option() {
        let result = Config::from_args(&args(&["--file", "x.csv", "--bogus"]));
        assert!(matches!(result, Err(LedgerError::Config(_))));

        let result = Config::from_args(&args(&["--file"]));
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_help_without_file_leaves_path_unresolved() {
        let (config, rest) = Config::from_args(&args(&["--help"])).unwrap();
        assert_eq!(config.data_file, None);
        assert_eq!(rest, args(&["--help"]));

        let (config, rest) = Config::from_args(&args(&["version", "--json"])).unwrap();
        assert_eq!(config.data_file, None);
        assert!(config.json);
        assert_eq!(rest, args(&["version"]));
    }

    #[test]
    fn test_store_options() {
        let (config, _) = Config::from_args(&args(&["-f", "x.csv", "--deferred"])).unwrap();
        let options = config.store_options();
        assert_eq!(options.flush_policy, FlushPolicy::Deferred);
        assert_eq!(options.load_policy, LoadPolicy::SkipInvalid);
    }
}
