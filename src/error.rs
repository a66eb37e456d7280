use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JdkupError {
    #[error("Invalid version '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Network error from {provider}: {message}")]
    Network { provider: String, message: String },

    #[error("No release matches '{request}'{context}")]
    NoMatch { request: String, context: String },

    #[error("'{request}' matches several installed releases: {}", .candidates.join(", "))]
    AmbiguousInstall {
        request: String,
        candidates: Vec<String>,
    },

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Installation layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Failures while unpacking a release archive.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("unsupported archive format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("cannot read archive {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while locating or flattening an installation root.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("no JDK installation (bin/{executable} and lib/) found in {}", .dir.display())]
    NotFound { dir: PathBuf, executable: String },

    #[error("multiple candidate installation roots in {}: {}", .dir.display(), .candidates.join(", "))]
    Ambiguous {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for JdkupError {
    fn from(err: reqwest::Error) -> Self {
        let provider = err
            .url()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| "remote".to_string());
        JdkupError::Network {
            provider,
            message: err.to_string(),
        }
    }
}

impl JdkupError {
    pub fn parse(input: &str, reason: impl Into<String>) -> Self {
        JdkupError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn network(provider: impl Into<String>, message: impl Into<String>) -> Self {
        JdkupError::Network {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn no_match(request: &str, context: impl Into<String>) -> Self {
        JdkupError::NoMatch {
            request: request.to_string(),
            context: context.into(),
        }
    }

    /// Remediation hint shown under the error message.
    pub fn suggestion(&self) -> &'static str {
        match self {
            JdkupError::Parse { .. } => {
                "Use a version like 17, 17.0, 17.0.5, 8u352 or 1.8.0_352."
            }
            JdkupError::Network { .. } => {
                "Check your network connection or pick another provider with --provider."
            }
            JdkupError::NoMatch { .. } => {
                "Run `jdkup list-remote` to see the versions available from this provider."
            }
            JdkupError::Extraction(ExtractionError::UnsupportedFormat(_)) => {
                "Only .zip and .tar.gz archives can be installed; try another provider."
            }
            JdkupError::Extraction(_) => {
                "Check free disk space and permissions, then retry the install."
            }
            JdkupError::AmbiguousInstall { .. } => {
                "Name one of the listed releases exactly, e.g. 21.0.2."
            }
            JdkupError::Layout(LayoutError::Ambiguous { .. }) => {
                "The archive holds several JDKs; try another provider or version."
            }
            JdkupError::Layout(_) => {
                "The archive does not look like a JDK; try another provider or version."
            }
            JdkupError::Config(_) => "Fix the configuration file or set JDKUP_CONFIG.",
            JdkupError::JsonError(_) => {
                "The catalog returned unexpected data; try another provider."
            }
            JdkupError::IoError(_) => "Check permissions on the install root.",
            JdkupError::Other(_) => "Re-run with --verbose for more details.",
        }
    }
}

pub type Result<T> = std::result::Result<T, JdkupError>;
