// Error types for neko-poster.
// Covers the image APIs, the Fediverse instance, the image directory and configuration.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One of the three chained phases of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Metadata lookup, image download and write to disk.
    Fetch,
    /// Media upload to the instance.
    Upload,
    /// Status creation on the instance.
    Status,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::Fetch => "image fetch",
            Step::Upload => "media upload",
            Step::Status => "status post",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug)]
pub enum NekoError {
    #[error("Unknown endpoint: {0}")]
    UnknownCategory(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Response is missing {0}")]
    MissingField(&'static str),

    #[error("Cannot derive an image file name from {0:?}")]
    InvalidFileName(PathBuf),

    #[error("Token cannot be used as an Authorization header")]
    InvalidToken,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("{step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: Box<NekoError>,
    },
}

impl NekoError {
    /// The phase this error was raised in, if it was tagged with one.
    pub fn step(&self) -> Option<Step> {
        match self {
            NekoError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NekoError>;

/// Tags an error with the phase it happened in.
pub trait StepExt<T> {
    fn during(self, step: Step) -> Result<T>;
}

impl<T> StepExt<T> for Result<T> {
    fn during(self, step: Step) -> Result<T> {
        self.map_err(|e| match e {
            // Unknown categories are caller errors, never a failed phase.
            NekoError::UnknownCategory(_) | NekoError::Step { .. } => e,
            other => NekoError::Step {
                step,
                source: Box::new(other),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_during_tags_step() {
        let result: Result<()> = Err(NekoError::MissingField("id"));
        let err = result.during(Step::Upload).unwrap_err();
        assert_eq!(err.step(), Some(Step::Upload));
        assert_eq!(err.to_string(), "media upload failed: Response is missing id");
    }

    #[test]
    fn test_during_keeps_innermost_step() {
        let result: Result<()> = Err(NekoError::MissingField("id")).during(Step::Fetch);
        let err = result.during(Step::Status).unwrap_err();
        assert_eq!(err.step(), Some(Step::Fetch));
    }

    #[test]
    fn test_during_passes_unknown_category_through() {
        let result: Result<()> = Err(NekoError::UnknownCategory("dog".to_string()));
        let err = result.during(Step::Fetch).unwrap_err();
        assert!(matches!(err, NekoError::UnknownCategory(ref c) if c == "dog"));
        assert_eq!(err.step(), None);
    }
}
