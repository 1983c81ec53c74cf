use std::env;
use std::path::PathBuf;

use crate::error::{NavError, NavResult};

/// Environment override for the statistics program.
pub const MSGFMT_ENV: &str = "PO_NAVIGATOR_MSGFMT";
/// Environment override for the workspace used to resolve source references.
pub const WORKSPACE_ENV: &str = "PO_NAVIGATOR_WORKSPACE";

/// Verbosity level for diagnostic logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Warnings and errors only
    Silent = 0,
    /// Log search results (default)
    Normal = 1,
    /// Log boundary decisions and every message visited
    Verbose = 2,
}

impl VerbosityLevel {
    /// Default tracing filter directive for this level; `RUST_LOG` wins over it.
    pub fn directive(&self) -> &'static str {
        match self {
            VerbosityLevel::Silent => "warn",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "po_navigator=trace,info",
        }
    }

    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => VerbosityLevel::Silent,
            (false, true) => VerbosityLevel::Verbose,
            (false, false) => VerbosityLevel::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub verbosity: VerbosityLevel,
    pub msgfmt_program: String,
    pub workspace: PathBuf,
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            verbosity: VerbosityLevel::Normal,
            msgfmt_program: "msgfmt".to_string(),
            workspace: PathBuf::from("."),
            json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply environment overrides on top of the defaults.
    pub fn from_env() -> NavResult<Self> {
        let mut settings = Settings::default();
        if let Some(program) = read_env(MSGFMT_ENV)? {
            settings.msgfmt_program = program;
        }
        if let Some(workspace) = read_env(WORKSPACE_ENV)? {
            settings.workspace = PathBuf::from(workspace);
        }
        Ok(settings)
    }

    pub fn with_verbosity(&mut self, verbosity: VerbosityLevel) -> &mut Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_msgfmt_program(&mut self, program: &str) -> &mut Self {
        self.msgfmt_program = program.to_string();
        self
    }

    pub fn with_workspace(&mut self, workspace: PathBuf) -> &mut Self {
        self.workspace = workspace;
        self
    }

    pub fn with_json(&mut self, json: bool) -> &mut Self {
        self.json = json;
        self
    }
}

fn read_env(name: &str) -> NavResult<Option<String>> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(NavError::Config(format!("{} is not valid unicode", name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new();
        assert_eq!(settings.verbosity, VerbosityLevel::Normal);
        assert_eq!(settings.msgfmt_program, "msgfmt");
        assert_eq!(settings.workspace, PathBuf::from("."));
        assert!(!settings.json);
    }

    #[test]
    fn test_builder_overrides() {
        let mut settings = Settings::new();
        settings
            .with_verbosity(VerbosityLevel::Verbose)
            .with_msgfmt_program("/usr/local/bin/msgfmt")
            .with_workspace(PathBuf::from("/src/project"))
            .with_json(true);
        assert_eq!(settings.verbosity, VerbosityLevel::Verbose);
        assert_eq!(settings.msgfmt_program, "/usr/local/bin/msgfmt");
        assert_eq!(settings.workspace, PathBuf::from("/src/project"));
        assert!(settings.json);
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(VerbosityLevel::from_flags(true, true), VerbosityLevel::Silent);
        assert_eq!(VerbosityLevel::from_flags(false, true), VerbosityLevel::Verbose);
        assert_eq!(VerbosityLevel::from_flags(false, false), VerbosityLevel::Normal);
        assert!(VerbosityLevel::Verbose > VerbosityLevel::Normal);
        assert_eq!(VerbosityLevel::Silent.directive(), "warn");
    }
}
