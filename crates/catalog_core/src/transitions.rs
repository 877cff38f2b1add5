//! Pure inquiry transitions issued by the filter panel, header filter, sort
//! selector and pager. Each takes the current inquiry by reference and returns
//! a fresh one; nothing here normalizes, so callers commit through
//! [`normalize`] (the controller always does).

use shared::{
    domain::{CourseCategory, CourseType},
    inquiry::{SearchInquiry, SortPreset, ALL_OPTIONS},
};

pub fn apply_category_toggle(
    current: &SearchInquiry,
    category: CourseCategory,
    checked: bool,
) -> SearchInquiry {
    let mut next = current.clone();
    toggle(&mut next.search.category_list, category, checked);
    next
}

pub fn apply_type_toggle(
    current: &SearchInquiry,
    course_type: CourseType,
    checked: bool,
) -> SearchInquiry {
    let mut next = current.clone();
    toggle(&mut next.search.type_list, course_type, checked);
    next
}

pub fn apply_text_commit(current: &SearchInquiry, text: impl Into<String>) -> SearchInquiry {
    let mut next = current.clone();
    next.search.text = Some(text.into());
    next
}

/// `options` is single-select: a new value replaces the old one and
/// [`ALL_OPTIONS`] clears the criterion.
pub fn apply_option_select(current: &SearchInquiry, option: &str) -> SearchInquiry {
    let mut next = current.clone();
    next.search.options = if option == ALL_OPTIONS {
        None
    } else {
        Some(vec![option.to_string()])
    };
    next
}

pub fn apply_sort_preset(current: &SearchInquiry, preset: SortPreset) -> SearchInquiry {
    let mut next = current.clone();
    next.sort = Some(preset.field().to_string());
    next.direction = Some(preset.direction());
    next
}

pub fn set_page(current: &SearchInquiry, page: u32) -> SearchInquiry {
    let mut next = current.clone();
    next.page = page.max(1);
    next
}

pub fn reset(default_inquiry: &SearchInquiry) -> SearchInquiry {
    default_inquiry.clone()
}

pub fn normalize(inquiry: &SearchInquiry) -> SearchInquiry {
    inquiry.clone().normalized()
}

// Multi-select lists keep insertion order and hold each value once. Unchecking
// may leave the list empty; normalization removes it.
fn toggle<T: PartialEq>(list: &mut Option<Vec<T>>, value: T, checked: bool) {
    if checked {
        let values = list.get_or_insert_with(Vec::new);
        if !values.contains(&value) {
            values.push(value);
        }
    } else if let Some(values) = list.as_mut() {
        values.retain(|existing| *existing != value);
    }
}

#[cfg(test)]
#[path = "tests/transitions_tests.rs"]
mod tests;
