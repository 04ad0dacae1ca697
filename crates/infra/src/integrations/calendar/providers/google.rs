//! Google Calendar provider implementation

use async_trait::async_trait;
use awaydesk_core::CalendarQueryService;
use awaydesk_domain::{AwayDeskError, CalendarConfig, Event, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Method;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::http::HttpClient;
use crate::integrations::calendar::provider_impl::{convert_provider_event, is_cancelled};
use crate::integrations::calendar::types::GoogleEventsResponse;

/// Pages followed per query before the rest is dropped.
pub const MAX_PAGES: usize = 5;

/// Google Calendar provider
///
/// Read-only client for `events.list` using an already-authorized bearer
/// token.
pub struct GoogleCalendarProvider {
    http: HttpClient,
    base_url: Url,
    access_token: String,
    max_pages: usize,
}

impl GoogleCalendarProvider {
    pub fn new(http: HttpClient, config: &CalendarConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AwayDeskError::Config(format!("Invalid calendar base URL '{}': {}", config.base_url, e))
        })?;

        Ok(Self {
            http,
            base_url,
            access_token: config.access_token.clone(),
            max_pages: MAX_PAGES,
        })
    }

    /// Limit how many result pages a single query may follow.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    fn events_url(&self, calendar_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AwayDeskError::Config("calendar base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["calendars", calendar_id, "events"]);
        Ok(url)
    }

    async fn fetch_page(
        &self,
        url: &Url,
        query_params: &[(&str, String)],
    ) -> Result<GoogleEventsResponse> {
        let mut request = self.http.request(Method::GET, url.clone()).query(query_params);
        if !self.access_token.is_empty() {
            request = request.bearer_auth(&self.access_token);
        }

        self.http.send_json(request).await.map_err(|err| match err {
            AwayDeskError::Auth(msg) => AwayDeskError::Auth(msg),
            other => AwayDeskError::Calendar(format!("Google API request failed: {other}")),
        })
    }
}

#[async_trait]
impl CalendarQueryService for GoogleCalendarProvider {
    #[instrument(skip(self), fields(provider = "google"))]
    async fn list_events(
        &self,
        source_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        let url = self.events_url(source_id)?;
        let base_params = vec![
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
            ("timeMin", time_min.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("timeMax", time_max.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("timeZone", "UTC".to_string()),
            ("fields", "items(id,status,summary,start,end),nextPageToken".to_string()),
        ];

        let mut events = Vec::new();
        let mut skipped = 0usize;
        let mut page_token: Option<String> = None;

        for page in 0..self.max_pages {
            let mut params = base_params.clone();
            if let Some(token) = page_token.take() {
                params.push(("pageToken", token));
            }

            let response = self.fetch_page(&url, &params).await?;
            debug!(page, items = response.items.len(), "fetched events page");

            for raw in response.items {
                if is_cancelled(&raw) {
                    continue;
                }
                match convert_provider_event(raw, source_id) {
                    Ok(event) => events.push(event),
                    Err(err) => {
                        skipped += 1;
                        warn!(
                            event_id = %err.event_id,
                            field = err.field,
                            error = %err.reason,
                            "skipping calendar event due to parse failure"
                        );
                    }
                }
            }

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        if page_token.is_some() {
            warn!(max_pages = self.max_pages, "page cap reached, remaining events dropped");
        }
        if skipped > 0 {
            warn!(skipped, kept = events.len(), "dropped malformed calendar events");
        }

        events.sort_by_key(Event::effective_start);
        Ok(events)
    }
}
