//! Owns the one inquiry driving a listing surface.
//!
//! Every interaction goes through the same path: compute the next inquiry,
//! normalize it, push it into the address, then fetch. Responses are fenced
//! by a per-request sequence number so a slow answer for a superseded inquiry
//! can never overwrite a fresher one.

use std::sync::Arc;

use shared::{
    domain::{Course, CourseCategory, CourseId, CourseType},
    error::ApiError,
    inquiry::{SearchInquiry, SortPreset},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    address::{self, Location},
    error::CatalogError,
    pager::PagerView,
    session::SessionContext,
    transitions, CourseFetcher, CourseLiker, CourseListing, MissingCourseLiker, Navigator,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    InquiryCommitted {
        sequence: u64,
        location: Location,
    },
    CoursesLoaded {
        sequence: u64,
        total: u64,
        count: usize,
    },
    FetchFailed {
        sequence: u64,
        error: ApiError,
    },
    StaleResponseDiscarded {
        sequence: u64,
        latest: u64,
    },
    LikeRejected(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub inquiry: SearchInquiry,
    pub state: FetchState,
    pub courses: Vec<Course>,
    pub total: u64,
    /// Contents of the free-text box, which may be ahead of the committed text.
    pub text_input: String,
    pub last_error: Option<ApiError>,
}

impl ControllerSnapshot {
    pub fn pager(&self) -> Option<PagerView> {
        PagerView::derive(&self.inquiry, self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

struct ControllerState {
    inquiry: SearchInquiry,
    state: FetchState,
    courses: Vec<Course>,
    total: u64,
    text_input: String,
    last_error: Option<ApiError>,
    latest_sequence: u64,
}

impl ControllerState {
    fn begin_request(&mut self) -> u64 {
        self.latest_sequence += 1;
        self.state = FetchState::Loading;
        self.latest_sequence
    }
}

pub struct QueryStateController {
    default_inquiry: SearchInquiry,
    fetcher: Arc<dyn CourseFetcher>,
    liker: Arc<dyn CourseLiker>,
    navigator: Arc<dyn Navigator>,
    session: SessionContext,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl QueryStateController {
    pub fn new(
        default_inquiry: SearchInquiry,
        address_query: Option<&str>,
        fetcher: Arc<dyn CourseFetcher>,
        navigator: Arc<dyn Navigator>,
    ) -> Arc<Self> {
        Self::new_with_dependencies(
            default_inquiry,
            address_query,
            fetcher,
            Arc::new(MissingCourseLiker),
            navigator,
            SessionContext::anonymous(),
        )
    }

    pub fn new_with_dependencies(
        default_inquiry: SearchInquiry,
        address_query: Option<&str>,
        fetcher: Arc<dyn CourseFetcher>,
        liker: Arc<dyn CourseLiker>,
        navigator: Arc<dyn Navigator>,
        session: SessionContext,
    ) -> Arc<Self> {
        let default_inquiry = default_inquiry.normalized();
        let inquiry = address::initialize(&default_inquiry, address_query);
        let text_input = inquiry.search.text.clone().unwrap_or_default();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Arc::new(Self {
            default_inquiry,
            fetcher,
            liker,
            navigator,
            session,
            inner: Mutex::new(ControllerState {
                inquiry,
                state: FetchState::Idle,
                courses: Vec::new(),
                total: 0,
                text_input,
                last_error: None,
                latest_sequence: 0,
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub fn default_inquiry(&self) -> &SearchInquiry {
        &self.default_inquiry
    }

    pub async fn inquiry(&self) -> SearchInquiry {
        self.inner.lock().await.inquiry.clone()
    }

    pub async fn state(&self) -> FetchState {
        self.inner.lock().await.state
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let guard = self.inner.lock().await;
        ControllerSnapshot {
            inquiry: guard.inquiry.clone(),
            state: guard.state,
            courses: guard.courses.clone(),
            total: guard.total,
            text_input: guard.text_input.clone(),
            last_error: guard.last_error.clone(),
        }
    }

    pub async fn toggle_category(
        &self,
        category: CourseCategory,
        checked: bool,
    ) -> Result<(), CatalogError> {
        self.apply(|current| transitions::apply_category_toggle(current, category, checked))
            .await
    }

    pub async fn toggle_type(
        &self,
        course_type: CourseType,
        checked: bool,
    ) -> Result<(), CatalogError> {
        self.apply(|current| transitions::apply_type_toggle(current, course_type, checked))
            .await
    }

    /// Updates the free-text box without touching the committed inquiry.
    pub async fn edit_text(&self, text: impl Into<String>) {
        self.inner.lock().await.text_input = text.into();
    }

    /// Commits whatever is in the free-text box, empty string included.
    pub async fn commit_text(&self) -> Result<(), CatalogError> {
        let text = self.inner.lock().await.text_input.clone();
        self.apply(move |current| transitions::apply_text_commit(current, text))
            .await
    }

    pub async fn select_option(&self, option: &str) -> Result<(), CatalogError> {
        self.apply(|current| transitions::apply_option_select(current, option))
            .await
    }

    pub async fn select_sort(&self, preset: SortPreset) -> Result<(), CatalogError> {
        self.apply(|current| transitions::apply_sort_preset(current, preset))
            .await
    }

    pub async fn set_page(&self, page: u32) -> Result<(), CatalogError> {
        self.apply(|current| transitions::set_page(current, page))
            .await
    }

    /// Back to the page default; also empties the free-text box.
    pub async fn reset(&self) -> Result<(), CatalogError> {
        self.inner.lock().await.text_input.clear();
        let default_inquiry = self.default_inquiry.clone();
        self.apply(move |_| transitions::reset(&default_inquiry))
            .await
    }

    /// Replaces the inquiry wholesale, e.g. with one produced by a filter
    /// panel that ran several transitions locally.
    pub async fn commit(&self, inquiry: SearchInquiry) -> Result<(), CatalogError> {
        self.apply(move |_| inquiry).await
    }

    /// Re-runs the current inquiry without touching the address.
    pub async fn refresh(&self) -> Result<(), CatalogError> {
        let (inquiry, sequence) = {
            let mut guard = self.inner.lock().await;
            let sequence = guard.begin_request();
            (guard.inquiry.clone(), sequence)
        };
        self.fetch(sequence, inquiry).await
    }

    /// The address changed underneath us (back/forward, pasted link).
    pub async fn address_changed(&self, query: &str) -> Result<(), CatalogError> {
        let restored = address::initialize(&self.default_inquiry, Some(query));
        let sequence = {
            let mut guard = self.inner.lock().await;
            if guard.inquiry == restored && guard.state != FetchState::Idle {
                None
            } else {
                guard.text_input = restored.search.text.clone().unwrap_or_default();
                guard.inquiry = restored.clone();
                Some(guard.begin_request())
            }
        };

        match sequence {
            Some(sequence) => self.fetch(sequence, restored).await,
            None => {
                debug!("address matches committed inquiry; nothing to refetch");
                Ok(())
            }
        }
    }

    pub async fn like_course(&self, course_id: &CourseId) -> Result<(), CatalogError> {
        let Some(member) = self.session.current().await else {
            let err = CatalogError::NotAuthenticated;
            let _ = self
                .events
                .send(ControllerEvent::LikeRejected(err.to_api_error()));
            return Err(err);
        };

        if let Err(err) = self
            .liker
            .like_course(&member.access_token, course_id)
            .await
        {
            warn!(course_id = %course_id, error = %err, "like request failed");
            let _ = self
                .events
                .send(ControllerEvent::LikeRejected(err.to_api_error()));
            return Err(err);
        }

        info!(
            course_id = %course_id,
            member_id = %member.member_id,
            "course liked; refreshing listing"
        );
        self.refresh().await
    }

    async fn apply<F>(&self, transition: F) -> Result<(), CatalogError>
    where
        F: FnOnce(&SearchInquiry) -> SearchInquiry,
    {
        let (inquiry, location, sequence) = {
            let mut guard = self.inner.lock().await;
            let next = transition(&guard.inquiry).normalized();
            let location = Location::for_inquiry(&next)?;
            guard.inquiry = next.clone();
            let sequence = guard.begin_request();
            (next, location, sequence)
        };

        self.navigator.set_location_query(&location);
        info!(sequence, query = %location.query, "inquiry committed");
        let _ = self.events.send(ControllerEvent::InquiryCommitted {
            sequence,
            location,
        });

        self.fetch(sequence, inquiry).await
    }

    async fn fetch(&self, sequence: u64, inquiry: SearchInquiry) -> Result<(), CatalogError> {
        debug!(sequence, page = inquiry.page, "fetching courses");
        let outcome = self.fetcher.fetch_courses(&inquiry).await;

        let mut guard = self.inner.lock().await;
        if sequence != guard.latest_sequence {
            let latest = guard.latest_sequence;
            drop(guard);
            debug!(sequence, latest, "discarding response for superseded inquiry");
            let _ = self
                .events
                .send(ControllerEvent::StaleResponseDiscarded { sequence, latest });
            return Ok(());
        }

        match outcome {
            Ok(CourseListing { list, total }) => {
                let count = list.len();
                guard.courses = list;
                guard.total = total;
                guard.state = FetchState::Ready;
                guard.last_error = None;
                drop(guard);

                info!(sequence, total, count, "courses loaded");
                let _ = self.events.send(ControllerEvent::CoursesLoaded {
                    sequence,
                    total,
                    count,
                });
                Ok(())
            }
            Err(err) => {
                let error = err.to_api_error();
                guard.state = FetchState::Failed;
                guard.last_error = Some(error.clone());
                drop(guard);

                warn!(sequence, error = %err, "course query failed; keeping previous list");
                let _ = self
                    .events
                    .send(ControllerEvent::FetchFailed { sequence, error });
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
