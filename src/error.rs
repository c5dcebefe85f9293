use crate::core::spec::DependencyKind;
use colored::Colorize;
use std::{fmt::Display, path::PathBuf};

pub type Fault = Box<dyn std::error::Error>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("failed to detect user's home directory; please set the LINKPLAN_HOME environment variable")]
    HomeNotFound,
    #[error("directory {0:?} does not exist for LINKPLAN_HOME")]
    HomeMissing(PathBuf),
    #[error("no module manifest found in current directory or any parent directory{0}")]
    NoModuleFound(Hint),
    #[error("a module manifest already exists at {0:?}{1}")]
    ManifestAlreadyExists(PathBuf, Hint),
    #[error("unable to derive a module name from the path{0}")]
    ModuleNameMissing(Hint),
    #[error("failed to parse {0:?}: {1}")]
    ManifestParseFailed(PathBuf, LastError),
    #[error("failed to parse {0:?}: {1}")]
    ConfigParseFailed(PathBuf, LastError),
    #[error("failed to modify configuration: {0}")]
    ConfigNotSaved(LastError),
    #[error("configuration key {0:?} does not exist")]
    ConfigKeyMissing(String),
    #[error("unsupported key {0:?}: expected the table.key format")]
    ConfigKeyUnsupported(String),
    #[error("missing '=' separator in {0:?}")]
    EntrySeparatorMissing(String),
    #[error("unknown build profile {0:?}")]
    ProfileUnknown(String),
    #[error("unknown link mode {0:?}")]
    LinkModeUnknown(String),
    #[error("unknown plan format {0:?}")]
    FormatUnknown(String),
    #[error("no help topic named {0:?}")]
    TopicUnknown(String),
    #[error("dependency {0:?} resolves {1:?} as a {2} library but it is already required as a {3} library")]
    DependencyConflict(String, PathBuf, DependencyKind, DependencyKind),
    #[error("runtime dependency {0:?} does not exist{1}")]
    RuntimeFileMissing(PathBuf, Hint),
    #[error("failed to write plan file: {0}")]
    PlanNotSaved(LastError),
    #[error("failed to stage {0:?}: {1}")]
    StageCopyFailed(PathBuf, LastError),
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

impl Error {
    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = s.split_whitespace().into_iter().next().unwrap_or("");
        // retain punctuation if the first word is all-caps and longer than 1 character
        if first_word.len() > 1
            && first_word
                .chars()
                .find(|c| c.is_ascii_lowercase() == true)
                .is_none()
        {
            s.to_string()
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    InitModule,
    EditManifest,
    CheckManifest,
    NameSeparate,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::InitModule => "use `linkplan init` to create a module manifest",
            Self::EditManifest => "edit the existing manifest instead of creating a new one",
            Self::CheckManifest => {
                "verify the dependency's library directory and file names in the module manifest"
            }
            Self::NameSeparate => {
                "see the \"--name\" option for setting a module name separate from the directory name"
            }
        };
        write!(
            f,
            "\n\n{}: {}",
            "hint".green(),
            Error::lowerize(message.to_string())
        )
    }
}
