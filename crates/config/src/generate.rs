//! The `config generate` workflow.
//!
//! Generation is split in two so the caller can show a dry-run preview and
//! ask for confirmation between deciding and writing:
//!
//! 1. [`prepare`] checks the flags, resolves the [`ConfigMode`], and builds
//!    the new record (from defaults or through the wizard).
//! 2. [`GenerationPlan::commit`] takes the backup, if asked, and writes.
//!
//! A dry run calls [`GenerationPlan::take_backup`] before its preview, so the
//! backup exists even when the write is then cancelled. `commit` does not
//! back up a second time.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::mode::{
    ConfigMode, GenerateOptions, check_dry_run, check_show_exclusive, resolve_config_mode,
};
use crate::persistence::{backup, load_and_validate, write};
use crate::wizard::{Prompter, run_wizard};

/// What a generate request turned out to be.
#[derive(Debug)]
pub enum Generation {
    /// `--show`: the current record, read-only.
    Show(Config),
    /// A record ready to be written.
    Plan(GenerationPlan),
}

/// A new configuration record and how to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// The resolved mode.
    pub mode: ConfigMode,
    /// The record to write.
    pub config: Config,
    /// Back up the existing file first.
    pub backup: bool,
    /// The caller should preview and confirm before committing.
    pub dry_run: bool,
    /// Whether a file existed when the plan was made.
    pub config_exists: bool,
    /// Where the existing file was copied, once backed up.
    pub backup_path: Option<PathBuf>,
}

/// The result of a committed plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    /// The mode that was executed.
    pub mode: ConfigMode,
    /// Where the previous file was copied, if a backup was taken.
    pub backup_path: Option<PathBuf>,
}

/// Resolves a generate request into a [`Generation`].
///
/// The wizard runs for `--interactive` and always for modify mode, which
/// pre-fills it from the current record.
///
/// # Errors
///
/// Returns a conflict for bad flag combinations, a not-found error for
/// `--show` or `--modify` without a file, an error if the existing file
/// fails to load, or a wizard error.
#[instrument(skip(options, prompter), fields(config = %config_path.display()))]
pub fn prepare<P>(
    config_path: &Path,
    default_token_file: &Path,
    options: &GenerateOptions,
    prompter: &mut P,
) -> Result<Generation>
where
    P: Prompter + ?Sized,
{
    check_show_exclusive(options)?;

    let config_exists = config_path.exists();
    if options.show {
        if !config_exists {
            return Err(ConfigError::NotFound {
                path: config_path.to_path_buf(),
            });
        }
        return Ok(Generation::Show(load_and_validate(config_path)?));
    }

    let mode = resolve_config_mode(options, config_exists)?;
    check_dry_run(options, mode)?;
    debug!(%mode, config_exists, "resolved generate mode");

    let config = match mode {
        ConfigMode::Modify => {
            let current = load_and_validate(config_path)?;
            run_wizard(prompter, Some(&current), default_token_file)?
        }
        ConfigMode::Create | ConfigMode::Overwrite | ConfigMode::Reset => {
            if options.interactive {
                run_wizard(prompter, None, default_token_file)?
            } else {
                Config::for_token_path(default_token_file)
            }
        }
    };

    Ok(Generation::Plan(GenerationPlan {
        mode,
        config,
        backup: options.backup,
        dry_run: options.dry_run,
        config_exists,
        backup_path: None,
    }))
}

impl GenerationPlan {
    /// Copies the existing file aside, if requested and there is something
    /// to back up. Only the first call copies.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup cannot be written.
    pub fn take_backup(&mut self, config_path: &Path) -> Result<Option<PathBuf>> {
        if self.backup_path.is_none() && self.backup && self.config_exists {
            self.backup_path = Some(backup(config_path)?);
        }
        Ok(self.backup_path.clone())
    }

    /// Takes the backup if that has not happened yet, then writes the record.
    ///
    /// A failed backup aborts before the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup or the write fails.
    pub fn commit(mut self, config_path: &Path) -> Result<Committed> {
        self.take_backup(config_path)?;

        write(config_path, &self.config)?;
        debug!(mode = %self.mode, "generated config");

        Ok(Committed {
            mode: self.mode,
            backup_path: self.backup_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::BACKUP_DIR;
    use crate::wizard::tests::ScriptedPrompter;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn config_path(&self) -> PathBuf {
            self.dir.path().join("config.json")
        }

        fn token_path(&self) -> PathBuf {
            self.dir.path().join("tokens")
        }

        fn prepare(&self, options: GenerateOptions, answers: &[&str]) -> Result<Generation> {
            let mut prompter = ScriptedPrompter::new(answers);
            prepare(&self.config_path(), &self.token_path(), &options, &mut prompter)
        }

        fn plan(&self, options: GenerateOptions, answers: &[&str]) -> GenerationPlan {
            match self.prepare(options, answers).unwrap() {
                Generation::Plan(plan) => plan,
                Generation::Show(_) => panic!("expected a plan"),
            }
        }
    }

    #[test]
    fn create_writes_default_record() {
        let fx = Fixture::new();
        let plan = fx.plan(GenerateOptions::default(), &[]);
        assert_eq!(plan.mode, ConfigMode::Create);

        let committed = plan.commit(&fx.config_path()).unwrap();
        assert!(committed.backup_path.is_none());

        let config = load_and_validate(fx.config_path()).unwrap();
        assert_eq!(config, Config::for_token_path(&fx.token_path()));
    }

    #[test]
    fn create_interactive_uses_answers() {
        let fx = Fixture::new();
        let options = GenerateOptions {
            interactive: true,
            ..Default::default()
        };
        let plan = fx.plan(options, &["", "Token", "work"]);
        assert_eq!(plan.config.auth.token_type, "Token");
        assert_eq!(plan.config.default_alias(), Some("work"));
    }

    #[test]
    fn existing_file_needs_a_flag() {
        let fx = Fixture::new();
        write(fx.config_path(), &Config::with_defaults("/t")).unwrap();

        let err = fx.prepare(GenerateOptions::default(), &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Conflict(_)));
    }

    #[test]
    fn overwrite_with_backup() {
        let fx = Fixture::new();
        write(fx.config_path(), &Config::with_defaults("/old")).unwrap();
        let options = GenerateOptions {
            overwrite: true,
            backup: true,
            ..Default::default()
        };

        let committed = fx.plan(options, &[]).commit(&fx.config_path()).unwrap();
        assert_eq!(committed.mode, ConfigMode::Overwrite);

        let backup_path = committed.backup_path.unwrap();
        assert_eq!(backup_path.parent().unwrap(), fx.dir.path().join(BACKUP_DIR));
        assert_eq!(
            load_and_validate(&backup_path).unwrap().auth.token_file,
            "/old"
        );
        assert_eq!(
            load_and_validate(fx.config_path()).unwrap().token_path(),
            fx.token_path()
        );
    }

    #[test]
    fn backup_skipped_when_nothing_exists() {
        let fx = Fixture::new();
        let options = GenerateOptions {
            backup: true,
            ..Default::default()
        };
        let committed = fx.plan(options, &[]).commit(&fx.config_path()).unwrap();
        assert!(committed.backup_path.is_none());
        assert!(!fx.dir.path().join(BACKUP_DIR).exists());
    }

    #[test]
    fn reset_replaces_invalid_file() {
        let fx = Fixture::new();
        std::fs::write(fx.config_path(), "{ broken").unwrap();
        let options = GenerateOptions {
            reset: true,
            ..Default::default()
        };

        let plan = fx.plan(options, &[]);
        assert_eq!(plan.mode, ConfigMode::Reset);
        plan.commit(&fx.config_path()).unwrap();
        assert!(load_and_validate(fx.config_path()).is_ok());
    }

    #[test]
    fn modify_prefills_from_existing() {
        let fx = Fixture::new();
        let mut existing = Config::for_token_path(&fx.token_path());
        existing.auth.token_type = "Token".to_string();
        write(fx.config_path(), &existing).unwrap();
        let options = GenerateOptions {
            modify: true,
            ..Default::default()
        };

        let plan = fx.plan(options, &["", "", "work"]);
        assert_eq!(plan.mode, ConfigMode::Modify);
        assert_eq!(plan.config.auth.token_type, "Token");
        assert_eq!(plan.config.default_alias(), Some("work"));
    }

    #[test]
    fn modify_invalid_file_fails() {
        let fx = Fixture::new();
        std::fs::write(fx.config_path(), r#"{"auth": {}}"#).unwrap();
        let options = GenerateOptions {
            modify: true,
            ..Default::default()
        };

        let err = fx.prepare(options, &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn dry_run_plan_touches_nothing() {
        let fx = Fixture::new();
        let options = GenerateOptions {
            dry_run: true,
            backup: true,
            ..Default::default()
        };
        let plan = fx.plan(options, &[]);
        assert!(plan.dry_run);
        assert!(!fx.config_path().exists());
    }

    #[test]
    fn dry_run_backup_survives_cancel() {
        let fx = Fixture::new();
        write(fx.config_path(), &Config::with_defaults("/old")).unwrap();
        let before = std::fs::read(fx.config_path()).unwrap();
        let options = GenerateOptions {
            modify: true,
            dry_run: true,
            backup: true,
            ..Default::default()
        };

        let mut plan = fx.plan(options, &["", "Token", ""]);
        let backup_path = plan.take_backup(&fx.config_path()).unwrap().unwrap();
        assert_eq!(
            plan.take_backup(&fx.config_path()).unwrap(),
            Some(backup_path.clone())
        );
        drop(plan);

        assert_eq!(std::fs::read(&backup_path).unwrap(), before);
        assert_eq!(std::fs::read(fx.config_path()).unwrap(), before);
        assert_eq!(
            std::fs::read_dir(fx.dir.path().join(BACKUP_DIR)).unwrap().count(),
            1
        );
    }

    #[test]
    fn commit_reuses_earlier_backup() {
        let fx = Fixture::new();
        write(fx.config_path(), &Config::with_defaults("/old")).unwrap();
        let options = GenerateOptions {
            overwrite: true,
            backup: true,
            ..Default::default()
        };

        let mut plan = fx.plan(options, &[]);
        let taken = plan.take_backup(&fx.config_path()).unwrap();
        let committed = plan.commit(&fx.config_path()).unwrap();
        assert_eq!(committed.backup_path, taken);
        assert_eq!(
            std::fs::read_dir(fx.dir.path().join(BACKUP_DIR)).unwrap().count(),
            1
        );
    }

    #[test]
    fn dry_run_rejected_for_reset() {
        let fx = Fixture::new();
        let options = GenerateOptions {
            reset: true,
            dry_run: true,
            ..Default::default()
        };
        assert!(matches!(
            fx.prepare(options, &[]).unwrap_err(),
            ConfigError::Conflict(_)
        ));
    }

    #[test]
    fn show_reads_current_record() {
        let fx = Fixture::new();
        let options = GenerateOptions {
            show: true,
            ..Default::default()
        };
        assert!(matches!(
            fx.prepare(options, &[]).unwrap_err(),
            ConfigError::NotFound { .. }
        ));

        write(fx.config_path(), &Config::with_defaults("/t")).unwrap();
        match fx.prepare(options, &[]).unwrap() {
            Generation::Show(config) => assert_eq!(config.auth.token_file, "/t"),
            Generation::Plan(_) => panic!("expected show"),
        }
    }

    #[test]
    fn show_with_other_flags_conflicts() {
        let fx = Fixture::new();
        let options = GenerateOptions {
            show: true,
            backup: true,
            ..Default::default()
        };
        assert!(matches!(
            fx.prepare(options, &[]).unwrap_err(),
            ConfigError::Conflict(_)
        ));
    }
}
