// Fediverse instance HTTP client.
// Handles bearer authentication, media upload and status creation.

use reqwest::{
    Client, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
    multipart::{Form, Part},
};

use crate::error::{NekoError, Result};
use crate::http::{USER_AGENT, check_response};
use crate::id::RemoteId;

use super::types::{MediaAttachment, Visibility};

const MEDIA_ROUTE: &str = "api/v1/media";
const STATUSES_ROUTE: &str = "api/v1/statuses";

/// Client for a Mastodon-compatible instance.
pub struct FediClient {
    client: Client,
    instance: String,
}

impl FediClient {
    /// Create a client for `instance`, authenticating with `token`.
    pub fn new(instance: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| NekoError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            instance: instance.trim_end_matches('/').to_string(),
        })
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.instance, route)
    }

    /// Upload an image as media. The file name doubles as its description.
    pub async fn upload_media(&self, name: &str, bytes: Vec<u8>) -> Result<MediaAttachment> {
        let file = Part::bytes(bytes)
            .file_name(name.to_string())
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .part("file", file)
            .text("description", name.to_string());

        let response = self
            .client
            .post(self.url(MEDIA_ROUTE))
            .multipart(form)
            .send()
            .await?;
        let response = check_response(response);

        let content = response.bytes().await?;
        let media = serde_json::from_slice(&content)?;
        Ok(media)
    }

    /// Create a status with one attached media item.
    pub async fn post_status(
        &self,
        text: &str,
        visibility: Visibility,
        media_id: &RemoteId,
    ) -> Result<StatusCode> {
        let media_id = media_id.to_string();
        let params = [
            ("status", text),
            ("visibility", visibility.as_str()),
            ("media_ids[]", media_id.as_str()),
        ];

        let response = self
            .client
            .post(self.url(STATUSES_ROUTE))
            .form(&params)
            .send()
            .await?;

        Ok(check_response(response).status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_instance_trailing_slash_trimmed() {
        let client = FediClient::new("https://example.social/", "secret").unwrap();
        assert_eq!(client.instance(), "https://example.social");
        assert_eq!(client.url(MEDIA_ROUTE), "https://example.social/api/v1/media");
    }

    #[test]
    fn test_invalid_token() {
        let err = FediClient::new("https://example.social", "bad\ntoken").err();
        assert!(matches!(err, Some(NekoError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_upload_media() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/media")
            .match_header("authorization", "Bearer secret")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="abc.gif""#.to_string()),
                Matcher::Regex("application/octet-stream".to_string()),
                Matcher::Regex(r#"name="description""#.to_string()),
                Matcher::Regex("GIF89a".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"id":"42","type":"image"}"#)
            .create_async()
            .await;

        let client = FediClient::new(&server.url(), "secret").unwrap();
        let media = client
            .upload_media("abc.gif", b"GIF89a".to_vec())
            .await
            .unwrap();

        assert_eq!(media.id, RemoteId::from("42"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_media_without_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/v1/media")
            .with_status(422)
            .with_body(r#"{"error":"Validation failed"}"#)
            .create_async()
            .await;

        let client = FediClient::new(&server.url(), "secret").unwrap();
        let err = client
            .upload_media("abc.gif", b"GIF89a".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, NekoError::Json(_)));
    }

    #[tokio::test]
    async fn test_post_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/statuses")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("status".to_string(), "".to_string()),
                Matcher::UrlEncoded("visibility".to_string(), "unlisted".to_string()),
                Matcher::UrlEncoded("media_ids[]".to_string(), "42".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"id":"1"}"#)
            .create_async()
            .await;

        let client = FediClient::new(&server.url(), "secret").unwrap();
        let status = client
            .post_status("", Visibility::Unlisted, &RemoteId::from("42"))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        mock.assert_async().await;
    }
}
