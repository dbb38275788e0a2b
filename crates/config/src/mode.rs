//! Resolution of `config generate` flags into a single mode.
//!
//! [`resolve_config_mode`] is pure: it depends only on the options and on
//! whether a configuration file already exists.

use std::fmt;

use crate::error::{ConfigError, Result};

/// How a configuration file is about to be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode {
    /// No file exists yet.
    Create,
    /// Edit the existing file through the wizard.
    Modify,
    /// Replace an existing file.
    Overwrite,
    /// Replace whatever is there with a fresh record.
    Reset,
}

impl fmt::Display for ConfigMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "CREATE",
            Self::Modify => "MODIFY",
            Self::Overwrite => "OVERWRITE",
            Self::Reset => "RESET",
        })
    }
}

/// Flags accepted by `config generate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// `--reset`
    pub reset: bool,
    /// `--modify`
    pub modify: bool,
    /// `--overwrite`
    pub overwrite: bool,
    /// `--interactive`
    pub interactive: bool,
    /// `--dry-run`
    pub dry_run: bool,
    /// `--backup`
    pub backup: bool,
    /// `--show`
    pub show: bool,
}

/// Decides the mode for a generate request.
///
/// Conflicting flags are rejected before file existence is considered, so a
/// bad flag combination fails the same way on every machine.
///
/// # Errors
///
/// - [`ConfigError::Conflict`] when two of `reset`, `modify`, `overwrite`
///   are combined, or when a file exists and neither `overwrite` nor
///   `modify` was given.
/// - [`ConfigError::NothingToModify`] for `modify` without a file.
///
/// # Examples
///
/// ```
/// use rcurl_config::mode::{ConfigMode, GenerateOptions, resolve_config_mode};
///
/// let opts = GenerateOptions::default();
/// assert_eq!(resolve_config_mode(&opts, false).unwrap(), ConfigMode::Create);
///
/// let opts = GenerateOptions { overwrite: true, ..Default::default() };
/// assert_eq!(resolve_config_mode(&opts, true).unwrap(), ConfigMode::Overwrite);
/// ```
pub fn resolve_config_mode(options: &GenerateOptions, config_exists: bool) -> Result<ConfigMode> {
    if options.reset && options.modify {
        return Err(conflict("cannot combine --reset with --modify"));
    }
    if options.reset && options.overwrite {
        return Err(conflict("cannot combine --reset with --overwrite"));
    }
    if options.modify && options.overwrite {
        return Err(conflict("cannot combine --modify with --overwrite"));
    }
    if options.modify && !config_exists {
        return Err(ConfigError::NothingToModify);
    }

    if options.reset {
        return Ok(ConfigMode::Reset);
    }
    if options.modify {
        return Ok(ConfigMode::Modify);
    }
    if config_exists {
        if options.overwrite {
            return Ok(ConfigMode::Overwrite);
        }
        return Err(conflict(
            "config already exists; use --overwrite or --modify",
        ));
    }
    Ok(ConfigMode::Create)
}

/// Rejects `--dry-run` outside of create and modify.
///
/// # Errors
///
/// Returns [`ConfigError::Conflict`] for a dry run in overwrite or reset
/// mode.
pub fn check_dry_run(options: &GenerateOptions, mode: ConfigMode) -> Result<()> {
    match mode {
        ConfigMode::Create | ConfigMode::Modify => Ok(()),
        ConfigMode::Overwrite | ConfigMode::Reset if options.dry_run => Err(conflict(format!(
            "--dry-run cannot be used in {mode} mode"
        ))),
        ConfigMode::Overwrite | ConfigMode::Reset => Ok(()),
    }
}

/// Rejects `--show` combined with any flag that would write.
///
/// # Errors
///
/// Returns [`ConfigError::Conflict`] naming the first offending flag.
pub fn check_show_exclusive(options: &GenerateOptions) -> Result<()> {
    if !options.show {
        return Ok(());
    }
    let others = [
        ("--reset", options.reset),
        ("--modify", options.modify),
        ("--overwrite", options.overwrite),
        ("--dry-run", options.dry_run),
        ("--backup", options.backup),
        ("--interactive", options.interactive),
    ];
    match others.iter().find(|(_, set)| *set) {
        Some((flag, _)) => Err(conflict(format!("cannot combine --show with {flag}"))),
        None => Ok(()),
    }
}

fn conflict(message: impl Into<String>) -> ConfigError {
    ConfigError::Conflict(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_bits(bits: u8) -> GenerateOptions {
        GenerateOptions {
            reset: bits & 1 != 0,
            modify: bits & 2 != 0,
            overwrite: bits & 4 != 0,
            interactive: bits & 8 != 0,
            dry_run: bits & 16 != 0,
            backup: bits & 32 != 0,
            show: bits & 64 != 0,
        }
    }

    #[test]
    fn no_flags_no_file_creates() {
        let mode = resolve_config_mode(&GenerateOptions::default(), false).unwrap();
        assert_eq!(mode, ConfigMode::Create);
    }

    #[test]
    fn no_flags_existing_file_conflicts() {
        let err = resolve_config_mode(&GenerateOptions::default(), true).unwrap_err();
        assert!(matches!(err, ConfigError::Conflict(_)));
        assert!(err.to_string().contains("--overwrite"));
    }

    #[test]
    fn modify_without_file_is_not_found() {
        let opts = GenerateOptions {
            modify: true,
            ..Default::default()
        };
        let err = resolve_config_mode(&opts, false).unwrap_err();
        assert!(matches!(err, ConfigError::NothingToModify));
    }

    #[test]
    fn single_flag_modes() {
        let reset = GenerateOptions {
            reset: true,
            ..Default::default()
        };
        assert_eq!(resolve_config_mode(&reset, true).unwrap(), ConfigMode::Reset);
        assert_eq!(resolve_config_mode(&reset, false).unwrap(), ConfigMode::Reset);

        let modify = GenerateOptions {
            modify: true,
            ..Default::default()
        };
        assert_eq!(resolve_config_mode(&modify, true).unwrap(), ConfigMode::Modify);

        let overwrite = GenerateOptions {
            overwrite: true,
            ..Default::default()
        };
        assert_eq!(
            resolve_config_mode(&overwrite, true).unwrap(),
            ConfigMode::Overwrite
        );
        // nothing to overwrite yet
        assert_eq!(
            resolve_config_mode(&overwrite, false).unwrap(),
            ConfigMode::Create
        );
    }

    #[test]
    fn pairwise_conflicts_over_whole_flag_space() {
        for bits in 0..128u8 {
            let opts = from_bits(bits);
            let exclusive = [opts.reset, opts.modify, opts.overwrite]
                .iter()
                .filter(|b| **b)
                .count();
            for exists in [false, true] {
                let result = resolve_config_mode(&opts, exists);
                if exclusive >= 2 {
                    assert!(
                        matches!(result, Err(ConfigError::Conflict(_))),
                        "{opts:?} exists={exists} gave {result:?}"
                    );
                } else {
                    assert!(
                        !matches!(&result, Err(ConfigError::Conflict(msg)) if msg.contains("combine")),
                        "{opts:?} exists={exists} gave {result:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn dry_run_only_for_create_and_modify() {
        let opts = GenerateOptions {
            dry_run: true,
            ..Default::default()
        };
        assert!(check_dry_run(&opts, ConfigMode::Create).is_ok());
        assert!(check_dry_run(&opts, ConfigMode::Modify).is_ok());
        assert!(check_dry_run(&opts, ConfigMode::Overwrite).is_err());
        assert!(check_dry_run(&opts, ConfigMode::Reset).is_err());
        assert!(check_dry_run(&GenerateOptions::default(), ConfigMode::Reset).is_ok());
    }

    #[test]
    fn show_excludes_every_writing_flag() {
        for bits in 0..128u8 {
            let opts = from_bits(bits);
            let writes = bits & 63 != 0;
            let result = check_show_exclusive(&opts);
            assert_eq!(result.is_err(), opts.show && writes, "{opts:?}");
        }
    }

    #[test]
    fn mode_display() {
        assert_eq!(ConfigMode::Create.to_string(), "CREATE");
        assert_eq!(ConfigMode::Reset.to_string(), "RESET");
    }
}
