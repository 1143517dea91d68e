// Image API response types.
// Only the fields the fetcher reads are modelled; everything else is ignored.

use serde::{Deserialize, Serialize};

use crate::error::{NekoError, Result};
use crate::id::RemoteId;

/// Response of the categorized API (`GET <base>/<category>`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub results: Vec<CategoryImage>,
}

/// One entry of a categorized response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryImage {
    pub url: String,
}

impl CategoryResponse {
    /// URL of the first result.
    pub fn first_url(&self) -> Result<&str> {
        self.results
            .first()
            .map(|image| image.url.as_str())
            .ok_or(NekoError::MissingField("results[0].url"))
    }
}

/// Response of the random image API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomResponse {
    pub data: RandomImage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomImage {
    pub id: RemoteId,
    pub attributes: RandomAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomAttributes {
    /// Download URL of the image.
    pub file: String,
}
