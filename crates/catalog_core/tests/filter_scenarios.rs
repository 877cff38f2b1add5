use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalog_core::{
    address, page_count, transitions, CatalogError, CourseFetcher, CourseListing, Location,
    Navigator, PagerView, QueryStateController,
};
use shared::{
    domain::{CourseCategory, CourseType, Direction},
    inquiry::{SearchInquiry, SortPreset},
};

struct FixedTotalFetcher {
    total: u64,
}

#[async_trait]
impl CourseFetcher for FixedTotalFetcher {
    async fn fetch_courses(&self, _inquiry: &SearchInquiry) -> Result<CourseListing, CatalogError> {
        Ok(CourseListing {
            list: Vec::new(),
            total: self.total,
        })
    }
}

#[derive(Default)]
struct AddressBar {
    history: Mutex<Vec<Location>>,
}

impl AddressBar {
    fn current(&self) -> Option<Location> {
        self.history.lock().expect("history").last().cloned()
    }
}

impl Navigator for AddressBar {
    fn set_location_query(&self, location: &Location) {
        self.history
            .lock()
            .expect("history")
            .push(location.clone());
    }
}

fn page_default() -> SearchInquiry {
    SearchInquiry::new(8).sorted_by("createdAt", Direction::Desc)
}

#[test]
fn normalization_never_leaves_empty_filter_lists() {
    let mut inquiry = page_default();
    for category in CourseCategory::ALL {
        inquiry = transitions::apply_category_toggle(&inquiry, category, true);
    }
    for course_type in CourseType::ALL {
        inquiry = transitions::apply_type_toggle(&inquiry, course_type, true);
    }
    inquiry = transitions::apply_option_select(&inquiry, "discounted");

    for category in CourseCategory::ALL {
        inquiry = transitions::apply_category_toggle(&inquiry, category, false);
    }
    for course_type in CourseType::ALL {
        inquiry = transitions::apply_type_toggle(&inquiry, course_type, false);
    }
    inquiry.search.options = Some(Vec::new());

    let normalized = transitions::normalize(&inquiry);
    assert!(normalized.is_normalized());
    assert_eq!(normalized, page_default());
}

#[test]
fn page_count_follows_total_and_limit() {
    assert_eq!(page_count(17, 8), 3);
    assert_eq!(PagerView::derive(&page_default(), 0), None);
}

#[tokio::test]
async fn programming_check_and_uncheck_round_trips_through_address() {
    let bar = Arc::new(AddressBar::default());
    let controller = QueryStateController::new(
        page_default(),
        None,
        Arc::new(FixedTotalFetcher { total: 17 }),
        bar.clone(),
    );

    controller
        .toggle_category(CourseCategory::Programming, true)
        .await
        .expect("check");
    assert_eq!(
        controller.inquiry().await.search.category_list,
        Some(vec![CourseCategory::Programming])
    );

    controller
        .toggle_category(CourseCategory::Programming, false)
        .await
        .expect("uncheck");

    let location = bar.current().expect("committed");
    assert!(!location.scroll);
    assert_eq!(
        location.input().as_deref(),
        Some(r#"{"page":1,"limit":8,"sort":"createdAt","direction":"DESC","search":{}}"#)
    );

    // A fresh page view opened from the shared link lands on the same inquiry.
    let reopened = address::initialize(&page_default(), Some(&location.query));
    assert_eq!(reopened, controller.inquiry().await);

    let pager = controller.snapshot().await.pager().expect("pager");
    assert_eq!(pager.page_count, 3);
}

#[tokio::test]
async fn reset_after_toggles_restores_default_and_text_box() {
    let controller = QueryStateController::new(
        page_default(),
        None,
        Arc::new(FixedTotalFetcher { total: 0 }),
        Arc::new(AddressBar::default()),
    );

    controller.edit_text("async").await;
    controller.commit_text().await.expect("text");
    controller
        .toggle_type(CourseType::Offline, true)
        .await
        .expect("type");
    controller
        .toggle_category(CourseCategory::Music, true)
        .await
        .expect("category");

    controller.reset().await.expect("reset");
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.inquiry, page_default());
    assert_eq!(snapshot.text_input, "");
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.pager(), None);
}

#[tokio::test]
async fn highest_sort_leaves_search_untouched() {
    let controller = QueryStateController::new(
        page_default(),
        None,
        Arc::new(FixedTotalFetcher { total: 3 }),
        Arc::new(AddressBar::default()),
    );
    controller
        .toggle_category(CourseCategory::Design, true)
        .await
        .expect("category");
    let before = controller.inquiry().await.search;

    controller
        .select_sort(SortPreset::Highest)
        .await
        .expect("sort");
    let after = controller.inquiry().await;
    assert_eq!(after.sort.as_deref(), Some("coursePrice"));
    assert_eq!(after.direction, Some(Direction::Desc));
    assert_eq!(after.search, before);
}
