// Fediverse API types.
// Mastodon-compatible media and status payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NekoError;
use crate::id::RemoteId;

/// Who can see a posted status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
    Direct,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
            Visibility::Direct => "direct",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = NekoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "unlisted" => Ok(Visibility::Unlisted),
            "private" => Ok(Visibility::Private),
            "direct" => Ok(Visibility::Direct),
            other => Err(NekoError::Config(format!("unknown visibility: {}", other))),
        }
    }
}

/// Uploaded media, as returned by `POST /api/v1/media`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub id: RemoteId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_default_and_parse() {
        assert_eq!(Visibility::default(), Visibility::Public);
        assert_eq!("unlisted".parse::<Visibility>().unwrap(), Visibility::Unlisted);
        assert!("everyone".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_media_attachment_requires_id() {
        let media: MediaAttachment =
            serde_json::from_str(r#"{"id":"22348641","type":"image","url":null}"#).unwrap();
        assert_eq!(media.id.to_string(), "22348641");

        assert!(serde_json::from_str::<MediaAttachment>(r#"{"error":"nope"}"#).is_err());
    }
}
