use async_trait::async_trait;
use shared::{
    domain::{Course, CourseId},
    inquiry::SearchInquiry,
};

pub mod address;
pub mod controller;
pub mod error;
pub mod graphql;
pub mod pager;
pub mod session;
pub mod transitions;

pub use address::Location;
pub use controller::{ControllerEvent, ControllerSnapshot, FetchState, QueryStateController};
pub use error::CatalogError;
pub use graphql::GraphQlCatalogClient;
pub use pager::{page_count, PagerView};
pub use session::{AuthenticatedMember, SessionContext};

/// One page of courses plus the unpaginated match count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseListing {
    pub list: Vec<Course>,
    pub total: u64,
}

#[async_trait]
pub trait CourseFetcher: Send + Sync {
    async fn fetch_courses(&self, inquiry: &SearchInquiry) -> Result<CourseListing, CatalogError>;
}

#[async_trait]
pub trait CourseLiker: Send + Sync {
    async fn like_course(&self, access_token: &str, course_id: &CourseId)
        -> Result<(), CatalogError>;
}

/// Pushes a committed inquiry into the navigable address.
pub trait Navigator: Send + Sync {
    fn set_location_query(&self, location: &Location);
}

pub struct MissingCourseFetcher;

#[async_trait]
impl CourseFetcher for MissingCourseFetcher {
    async fn fetch_courses(&self, _inquiry: &SearchInquiry) -> Result<CourseListing, CatalogError> {
        Err(CatalogError::remote("course query backend is unavailable"))
    }
}

pub struct MissingCourseLiker;

#[async_trait]
impl CourseLiker for MissingCourseLiker {
    async fn like_course(
        &self,
        _access_token: &str,
        course_id: &CourseId,
    ) -> Result<(), CatalogError> {
        Err(CatalogError::remote(format!(
            "like backend is unavailable for course {course_id}"
        )))
    }
}

/// Navigator for surfaces without an address bar.
pub struct DetachedNavigator;

impl Navigator for DetachedNavigator {
    fn set_location_query(&self, location: &Location) {
        tracing::debug!(query = %location.query, "navigation: detached, address not shown");
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
