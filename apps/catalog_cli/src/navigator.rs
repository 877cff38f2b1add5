use std::sync::Mutex;

use catalog_core::{Location, Navigator};

/// Stands in for the browser address bar: remembers the latest committed
/// address so it can be printed as a shareable link.
pub struct ShareableLinkNavigator {
    site_url: String,
    current: Mutex<Option<Location>>,
}

impl ShareableLinkNavigator {
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            current: Mutex::new(None),
        }
    }

    pub fn shareable_link(&self) -> Option<String> {
        let current = self.current.lock().ok()?;
        current
            .as_ref()
            .map(|location| format!("{}?{}", self.site_url, location.query))
    }
}

impl Navigator for ShareableLinkNavigator {
    fn set_location_query(&self, location: &Location) {
        tracing::debug!(query = %location.query, scroll = location.scroll, "address updated");
        if let Ok(mut current) = self.current.lock() {
            *current = Some(location.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::address;
    use shared::{domain::CourseCategory, inquiry::defaults};

    #[test]
    fn link_reflects_latest_commit() {
        let navigator = ShareableLinkNavigator::new("https://courses.example.test/courses");
        assert_eq!(navigator.shareable_link(), None);

        let location = Location::for_inquiry(&defaults::course_list()).expect("location");
        navigator.set_location_query(&location);
        let link = navigator.shareable_link().expect("link");
        assert!(link.starts_with("https://courses.example.test/courses?input="));
        assert!(link.ends_with(&location.query));
    }

    #[test]
    fn printed_link_reopens_the_same_inquiry() {
        let navigator = ShareableLinkNavigator::new("http://localhost:3000/courses");
        let mut linked = defaults::course_list();
        linked.page = 2;
        linked.search.category_list = Some(vec![CourseCategory::Design]);
        navigator.set_location_query(&Location::for_inquiry(&linked).expect("location"));

        let link = navigator.shareable_link().expect("link");
        let restored = address::initialize(&defaults::course_list(), Some(&link));
        assert_eq!(restored, linked);
    }
}
