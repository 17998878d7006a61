//! Cloud recording enumeration and deletion across a whole Zoom account.
//!
//! Listing walks every active user and concatenates their recordings.
//! Failures never escape this module as errors: a listing that cannot be
//! completed is reported as [`Listing::Degraded`] (and logged), which callers
//! collapse to an empty result. Deletions report plain success flags.

use crate::error::Error;
use crate::gateway::zoom::{self, Api, DateRange, Recording, User};
use crate::pagination::collect_pages;
use crate::throttle::{FixedDelay, Throttle};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::*;
use meeting_auth::clock::{Clock, SystemClock};
use meeting_auth::http::ClientBuilder;
use meeting_auth::oauth::providers::zoom as zoom_oauth;
use meeting_auth::oauth::token::Cache;
use secrecy::SecretString;
use service::config::Config;
use std::sync::Arc;

/// Outcome of a listing: every page was fetched, or the listing was cut short
/// by the carried error.
#[derive(Debug)]
pub enum Listing<T> {
    Complete(Vec<T>),
    Degraded(Error),
}

impl<T> Listing<T> {
    /// Items of a complete listing; a degraded listing yields nothing.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Complete(items) => items,
            Listing::Degraded(_) => Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Listing::Degraded(_))
    }
}

/// All active users of the account, following the listing cursor to the end.
pub async fn list_users(api: &dyn Api) -> Listing<User> {
    info!("Listing active Zoom users");

    match collect_pages(|token| async move { api.list_users_page(token.as_deref()).await }).await {
        Ok(users) => {
            info!("Found {} users", users.len());
            Listing::Complete(users)
        }
        Err(e) => {
            error!("Failed to list Zoom users: {e}");
            Listing::Degraded(e)
        }
    }
}

/// Every recording of one user in `range`, stamped with the user's id and email.
///
/// A 404 means the user has no recordings or no cloud recording entitlement
/// and yields a complete, empty listing.
pub async fn list_recordings_for_user(
    api: &dyn Api,
    user_id: &str,
    email: &str,
    range: DateRange,
) -> Listing<Recording> {
    let pages = collect_pages(|token| async move {
        api.list_recordings_page(user_id, range, token.as_deref())
            .await
    })
    .await;

    match pages {
        Ok(meetings) => {
            let recordings: Vec<Recording> = meetings
                .into_iter()
                .map(|meeting| meeting.with_host(user_id, email))
                .collect();
            debug!("Found {} recordings for {email}", recordings.len());
            Listing::Complete(recordings)
        }
        Err(e) if e.is_not_found() => {
            info!("User {email} has no recordings or no recording access");
            Listing::Complete(Vec::new())
        }
        Err(e) => {
            error!("Failed to list recordings for {email}: {e}");
            Listing::Degraded(e)
        }
    }
}

/// Recordings of every active user, gathered one user at a time with a
/// throttle pause between consecutive users.
///
/// A user whose listing fails contributes nothing; only a failure to list the
/// users themselves degrades the whole result.
pub async fn list_all_recordings(
    api: &dyn Api,
    throttle: &dyn Throttle,
    range: DateRange,
) -> Listing<Recording> {
    let users = match list_users(api).await {
        Listing::Complete(users) => users,
        Listing::Degraded(e) => {
            error!("Cannot gather recordings without the user list");
            return Listing::Degraded(e);
        }
    };

    info!(
        "Gathering recordings from {} to {} for {} users",
        range.from,
        range.to,
        users.len()
    );

    let mut recordings = Vec::new();
    for (index, user) in users.iter().enumerate() {
        if index > 0 {
            throttle.pause().await;
        }
        let listing = list_recordings_for_user(api, &user.id, &user.email, range).await;
        recordings.extend(listing.into_items());
    }

    info!("Found {} recordings in total", recordings.len());
    Listing::Complete(recordings)
}

/// Delete a single recording file. Returns whether Zoom accepted the delete.
pub async fn delete_recording(api: &dyn Api, meeting_id: &str, recording_id: &str) -> bool {
    info!("Deleting recording {recording_id} of meeting {meeting_id}");

    match api.delete_recording(meeting_id, recording_id).await {
        Ok(()) => {
            info!("Deleted recording {recording_id}");
            true
        }
        Err(e) => {
            error!("Failed to delete recording {recording_id}: {e}");
            false
        }
    }
}

/// Move all recordings of a meeting to the trash. Returns whether Zoom accepted it.
pub async fn delete_all_meeting_recordings(api: &dyn Api, meeting_id: &str) -> bool {
    info!("Moving all recordings of meeting {meeting_id} to trash");

    match api.trash_meeting_recordings(meeting_id).await {
        Ok(()) => {
            info!("All recordings of meeting {meeting_id} moved to trash");
            true
        }
        Err(e) => {
            error!("Failed to trash recordings of meeting {meeting_id}: {e}");
            false
        }
    }
}

/// Recording operations offered to the web layer.
#[async_trait]
pub trait Recordings: Send + Sync {
    /// Every recording of the account since `from` (or the configured default
    /// start date) up to today.
    async fn list_all_recordings(&self, from: Option<NaiveDate>) -> Result<Vec<Recording>, Error>;

    async fn delete_recording(&self, meeting_id: &str, recording_id: &str) -> bool;

    async fn delete_all_meeting_recordings(&self, meeting_id: &str) -> bool;
}

/// [`Recordings`] backed by the Zoom API.
pub struct Manager {
    api: Arc<dyn Api>,
    throttle: Arc<dyn Throttle>,
    clock: Arc<dyn Clock>,
    default_from: NaiveDate,
}

impl Manager {
    pub fn new(
        api: Arc<dyn Api>,
        throttle: Arc<dyn Throttle>,
        clock: Arc<dyn Clock>,
        default_from: NaiveDate,
    ) -> Self {
        Self {
            api,
            throttle,
            clock,
            default_from,
        }
    }

    /// Wire the Zoom token cache, API client and user throttle from configuration.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let http_client = ClientBuilder::new()
            .with_timeout(config.http_timeout())
            .with_user_agent(format!("recordings-manager/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let provider = zoom_oauth::Provider::new(
            zoom_oauth::Credentials {
                account_id: config.zoom_account_id().to_string(),
                client_id: config.zoom_client_id().to_string(),
                client_secret: SecretString::from(config.zoom_client_secret().to_string()),
            },
            config.zoom_oauth_token_url().to_string(),
            http_client.clone(),
        );
        let tokens = Arc::new(Cache::new(provider, SystemClock));
        let api = zoom::Client::new(http_client, config.zoom_api_base_url(), tokens);

        Ok(Self::new(
            Arc::new(api),
            Arc::new(FixedDelay::new(config.user_pause())),
            Arc::new(SystemClock),
            config.recordings_from_date,
        ))
    }

    fn range_since(&self, from: Option<NaiveDate>) -> DateRange {
        DateRange::new(
            from.unwrap_or(self.default_from),
            self.clock.now().date_naive(),
        )
    }
}

#[async_trait]
impl Recordings for Manager {
    async fn list_all_recordings(&self, from: Option<NaiveDate>) -> Result<Vec<Recording>, Error> {
        let range = self.range_since(from);
        let listing = list_all_recordings(self.api.as_ref(), self.throttle.as_ref(), range).await;
        Ok(listing.into_items())
    }

    async fn delete_recording(&self, meeting_id: &str, recording_id: &str) -> bool {
        delete_recording(self.api.as_ref(), meeting_id, recording_id).await
    }

    async fn delete_all_meeting_recordings(&self, meeting_id: &str) -> bool {
        delete_all_meeting_recordings(self.api.as_ref(), meeting_id).await
    }
}
