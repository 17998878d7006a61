//! Zoom REST API client for user and cloud recording management.
//!
//! Every request carries a bearer token taken from a [`TokenSource`], which
//! refreshes the account-level OAuth token on demand.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::*;
use meeting_auth::oauth::token::TokenSource;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Largest page size the listing endpoints accept.
pub const PAGE_SIZE: u32 = 300;

/// File type of the video files surfaced to clients.
pub const MP4_FILE_TYPE: &str = "MP4";

/// Account user as returned by `GET /v2/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// One file of a cloud recording (video, audio, chat, transcript, ...).
///
/// Only `file_type` is interpreted; every other attribute Zoom sends is kept
/// and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingFile {
    #[serde(default)]
    pub file_type: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RecordingFile {
    pub fn is_mp4(&self) -> bool {
        self.file_type == MP4_FILE_TYPE
    }
}

/// A recorded meeting with its files, annotated with the user it was listed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: u64,
    /// Meeting duration in minutes.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub host_email: String,
    #[serde(default)]
    pub host_id: String,
    #[serde(default)]
    pub recording_files: Vec<RecordingFile>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Recording {
    /// Stamp the identity of the user whose recordings listing returned this meeting.
    pub fn with_host(mut self, user_id: &str, email: &str) -> Self {
        self.host_id = user_id.to_string();
        self.host_email = email.to_string();
        self
    }

    pub fn mp4_files(&self) -> impl Iterator<Item = &RecordingFile> {
        self.recording_files.iter().filter(|file| file.is_mp4())
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Zoom answers the last page with an empty `next_page_token`, which is
    /// treated exactly like an absent one.
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token: next_page_token.filter(|token| !token.is_empty()),
        }
    }
}

/// Inclusive meeting date range for recording listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("from", self.from.format("%Y-%m-%d").to_string()),
            ("to", self.to.format("%Y-%m-%d").to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordingsResponse {
    #[serde(default)]
    meetings: Vec<Recording>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Zoom operations the recordings pipeline is built on.
#[async_trait]
pub trait Api: Send + Sync {
    /// One page of active users of the account.
    async fn list_users_page(&self, next_page_token: Option<&str>) -> Result<Page<User>, Error>;

    /// One page of a user's cloud recordings within `range`. Returned meetings
    /// are not yet annotated with the user.
    async fn list_recordings_page(
        &self,
        user_id: &str,
        range: DateRange,
        next_page_token: Option<&str>,
    ) -> Result<Page<Recording>, Error>;

    /// Delete one recording file of a meeting.
    async fn delete_recording(&self, meeting_id: &str, recording_id: &str) -> Result<(), Error>;

    /// Move every recording file of a meeting to the trash.
    async fn trash_meeting_recordings(&self, meeting_id: &str) -> Result<(), Error>;
}

/// Zoom API client
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl Client {
    /// Create a new Zoom client.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for API requests
    /// * `base_url` - API base URL without trailing slash, e.g. `https://api.zoom.us`
    /// * `tokens` - Source of bearer tokens
    pub fn new(client: reqwest::Client, base_url: &str, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Issue one authenticated request and return the JSON body (`Null` when
    /// the response has no body).
    ///
    /// `params` are sent as the query string for `GET` only. Other methods
    /// ignore them, so filters for those must already be part of `path`.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, Error> {
        let token = self.tokens.access_token().await.map_err(|e| {
            warn!("Zoom API {method} {path}: no access token: {e}");
            Error::from(e)
        })?;

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(token.expose_secret())
            .header(CONTENT_TYPE, "application/json");
        if method == Method::GET {
            request = request.query(params);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Zoom API {method} {path} failed: {:?}", e);
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Zoom API {method} {path} returned {status}: {error_text}");
            return Err(Error {
                source: Some(error_text.into()),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Status(status.as_u16())),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let body = self.call(Method::GET, path, params).await?;
        serde_json::from_value(body).map_err(|e| {
            warn!("Failed to parse Zoom response for {path}: {:?}", e);
            Error::from(e)
        })
    }
}

fn paging_params(next_page_token: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![("page_size", PAGE_SIZE.to_string())];
    if let Some(token) = next_page_token {
        params.push(("next_page_token", token.to_string()));
    }
    params
}

#[async_trait]
impl Api for Client {
    async fn list_users_page(&self, next_page_token: Option<&str>) -> Result<Page<User>, Error> {
        let mut params = vec![("status", "active".to_string())];
        params.extend(paging_params(next_page_token));

        let response: UsersResponse = self.get("/v2/users", &params).await?;
        Ok(Page::new(response.users, response.next_page_token))
    }

    async fn list_recordings_page(
        &self,
        user_id: &str,
        range: DateRange,
        next_page_token: Option<&str>,
    ) -> Result<Page<Recording>, Error> {
        let path = format!("/v2/users/{}/recordings", urlencoding::encode(user_id));
        let mut params = range.query_params().to_vec();
        params.extend(paging_params(next_page_token));

        let response: RecordingsResponse = self.get(&path, &params).await?;
        Ok(Page::new(response.meetings, response.next_page_token))
    }

    async fn delete_recording(&self, meeting_id: &str, recording_id: &str) -> Result<(), Error> {
        let path = format!(
            "/v2/meetings/{}/recordings/{}",
            urlencoding::encode(meeting_id),
            urlencoding::encode(recording_id)
        );
        self.call(Method::DELETE, &path, &[]).await?;
        Ok(())
    }

    async fn trash_meeting_recordings(&self, meeting_id: &str) -> Result<(), Error> {
        let path = format!(
            "/v2/meetings/{}/recordings?action=trash",
            urlencoding::encode(meeting_id)
        );
        self.call(Method::DELETE, &path, &[]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meeting_auth::error::{oauth_error, OAuthErrorKind};
    use mockito::{Matcher, Server};
    use secrecy::SecretString;

    struct StaticToken;

    #[async_trait]
    impl TokenSource for StaticToken {
        async fn access_token(&self) -> Result<SecretString, meeting_auth::Error> {
            Ok(SecretString::from("test-token".to_string()))
        }
    }

    struct NoToken;

    #[async_trait]
    impl TokenSource for NoToken {
        async fn access_token(&self) -> Result<SecretString, meeting_auth::Error> {
            Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed(401),
                "invalid_client",
            ))
        }
    }

    fn client_for(server_url: &str) -> Client {
        Client::new(reqwest::Client::new(), server_url, Arc::new(StaticToken))
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[tokio::test]
    async fn test_list_users_page_sends_bearer_and_filters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/users")
            .match_header("authorization", "Bearer test-token")
            .match_header("content-type", "application/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("status".into(), "active".into()),
                Matcher::UrlEncoded("page_size".into(), "300".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"page_size":300,"total_records":2,"next_page_token":"P1","users":[
                    {"id":"u1","email":"ann@example.com","status":"active"},
                    {"id":"u2","email":"bob@example.com","status":"active"}]}"#,
            )
            .create_async()
            .await;

        let page = client_for(&server.url()).list_users_page(None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].email, "bob@example.com");
        assert_eq!(page.next_page_token.as_deref(), Some("P1"));
    }

    #[tokio::test]
    async fn test_list_users_page_follows_cursor() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/users")
            .match_query(Matcher::UrlEncoded("next_page_token".into(), "P1".into()))
            .with_status(200)
            .with_body(r#"{"next_page_token":"","users":[{"id":"u3","email":"cy@example.com"}]}"#)
            .create_async()
            .await;

        let page = client_for(&server.url())
            .list_users_page(Some("P1"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.items[0].id, "u3");
        assert_eq!(page.next_page_token, None);
    }

    #[tokio::test]
    async fn test_list_recordings_page_sends_date_range() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/users/u1/recordings")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("from".into(), "2024-01-01".into()),
                Matcher::UrlEncoded("to".into(), "2024-01-31".into()),
                Matcher::UrlEncoded("page_size".into(), "300".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"from":"2024-01-01","to":"2024-01-31","next_page_token":"","meetings":[
                    {"uuid":"abc==","id":85012345678,"host_id":"zoom-host","topic":"Weekly","duration":42,
                     "recording_files":[
                        {"id":"f1","file_type":"MP4","file_size":1024,"download_url":"https://zoom.us/rec/f1"},
                        {"id":"f2","file_type":"CHAT"}]}]}"#,
            )
            .create_async()
            .await;

        let page = client_for(&server.url())
            .list_recordings_page("u1", DateRange::new(jan(1), jan(31)), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.next_page_token, None);
        let recording = &page.items[0];
        assert_eq!(recording.id, 85012345678);
        assert_eq!(recording.duration, 42);
        assert_eq!(recording.host_id, "zoom-host");
        assert_eq!(recording.attributes["topic"], "Weekly");
        assert_eq!(recording.recording_files.len(), 2);
        assert_eq!(recording.recording_files[0].attributes["file_size"], 1024);
        assert_eq!(recording.mp4_files().count(), 1);
    }

    #[tokio::test]
    async fn test_list_recordings_page_without_meetings_field() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v2/users/u1/recordings")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"total_records":0}"#)
            .create_async()
            .await;

        let page = client_for(&server.url())
            .list_recordings_page("u1", DateRange::new(jan(1), jan(2)), None)
            .await
            .unwrap();

        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_keeps_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v2/users/u9/recordings")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"code":1001,"message":"User does not exist: u9."}"#)
            .create_async()
            .await;

        let err = client_for(&server.url())
            .list_recordings_page("u9", DateRange::new(jan(1), jan(2)), None)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_recording_sends_no_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/v2/meetings/85012345678/recordings/f1")
            .match_header("authorization", "Bearer test-token")
            .match_query(Matcher::Missing)
            .with_status(204)
            .create_async()
            .await;

        let result = client_for(&server.url())
            .delete_recording("85012345678", "f1")
            .await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_trash_meeting_recordings_embeds_action_in_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/v2/meetings/85012345678/recordings")
            .match_query(Matcher::UrlEncoded("action".into(), "trash".into()))
            .with_status(204)
            .create_async()
            .await;

        let result = client_for(&server.url())
            .trash_meeting_recordings("85012345678")
            .await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_call_ignores_params_for_non_get() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/v2/meetings/1/recordings")
            .match_query(Matcher::Missing)
            .with_status(204)
            .create_async()
            .await;

        let body = client_for(&server.url())
            .call(
                Method::DELETE,
                "/v2/meetings/1/recordings",
                &[("action", "trash".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(body, Value::Null);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_token_failure_makes_no_api_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/users")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = Client::new(reqwest::Client::new(), &server.url(), Arc::new(NoToken));
        let err = client.list_users_page(None).await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Auth)
        );
        mock.assert_async().await;
    }
}
