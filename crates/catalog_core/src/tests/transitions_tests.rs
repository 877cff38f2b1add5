use super::*;
use shared::{
    domain::{Direction, MemberId},
    inquiry::defaults,
};

fn base() -> SearchInquiry {
    SearchInquiry::new(8).sorted_by("createdAt", Direction::Desc)
}

#[test]
fn checking_categories_preserves_insertion_order() {
    let next = apply_category_toggle(&base(), CourseCategory::Music, true);
    let next = apply_category_toggle(&next, CourseCategory::Programming, true);
    assert_eq!(
        next.search.category_list,
        Some(vec![CourseCategory::Music, CourseCategory::Programming])
    );
}

#[test]
fn repeated_check_does_not_duplicate_category() {
    let next = apply_category_toggle(&base(), CourseCategory::Design, true);
    let next = apply_category_toggle(&next, CourseCategory::Design, true);
    assert_eq!(next.search.category_list, Some(vec![CourseCategory::Design]));
}

#[test]
fn unchecking_removes_every_occurrence() {
    let mut current = base();
    current.search.category_list = Some(vec![
        CourseCategory::Design,
        CourseCategory::Music,
        CourseCategory::Design,
    ]);
    let next = apply_category_toggle(&current, CourseCategory::Design, false);
    assert_eq!(next.search.category_list, Some(vec![CourseCategory::Music]));
}

#[test]
fn toggle_round_trip_leaves_no_category_list_after_normalization() {
    let checked = apply_category_toggle(&base(), CourseCategory::Programming, true);
    let unchecked = apply_category_toggle(&checked, CourseCategory::Programming, false);
    assert_eq!(unchecked.search.category_list, Some(Vec::new()));
    assert_eq!(normalize(&unchecked).search.category_list, None);
    assert_eq!(normalize(&unchecked), base());
}

#[test]
fn unchecking_absent_type_keeps_field_absent() {
    let next = apply_type_toggle(&base(), CourseType::Offline, false);
    assert_eq!(next.search.type_list, None);
}

#[test]
fn type_toggle_mirrors_category_toggle() {
    let next = apply_type_toggle(&base(), CourseType::Online, true);
    let next = apply_type_toggle(&next, CourseType::Hybrid, true);
    let next = apply_type_toggle(&next, CourseType::Online, false);
    assert_eq!(next.search.type_list, Some(vec![CourseType::Hybrid]));
}

#[test]
fn text_commit_keeps_empty_string_distinct_from_absent() {
    let next = apply_text_commit(&base(), "");
    assert_eq!(next.search.text, Some(String::new()));
    assert_ne!(normalize(&next), base());
}

#[test]
fn option_select_replaces_instead_of_appending() {
    let next = apply_option_select(&base(), "discounted");
    let next = apply_option_select(&next, "certified");
    assert_eq!(next.search.options, Some(vec!["certified".to_string()]));
}

#[test]
fn selecting_all_removes_options_whatever_came_before() {
    let with_option = apply_option_select(&base(), "discounted");
    assert_eq!(apply_option_select(&with_option, "all").search.options, None);
    assert_eq!(apply_option_select(&base(), "all").search.options, None);
}

#[test]
fn set_page_only_touches_page() {
    let mut current = apply_category_toggle(&base(), CourseCategory::Business, true);
    current.search.member_id = Some(MemberId::new("m-1"));
    let next = set_page(&current, 4);
    assert_eq!(next.page, 4);
    assert_eq!(next.search, current.search);
    assert_eq!(next.sort, current.sort);
    assert_eq!(next.direction, current.direction);
    assert_eq!(next.limit, current.limit);
}

#[test]
fn set_page_never_goes_below_first_page() {
    assert_eq!(set_page(&base(), 0).page, 1);
}

#[test]
fn highest_preset_sets_price_descending_and_keeps_search() {
    let current = apply_type_toggle(&base(), CourseType::Online, true);
    let next = apply_sort_preset(&current, SortPreset::Highest);
    assert_eq!(next.sort.as_deref(), Some("coursePrice"));
    assert_eq!(next.direction, Some(Direction::Desc));
    assert_eq!(next.search, current.search);
}

#[test]
fn reset_returns_equal_copy_of_default() {
    let default_inquiry = defaults::course_list();
    let dirty = apply_text_commit(
        &apply_category_toggle(&default_inquiry, CourseCategory::Health, true),
        "yoga",
    );
    assert_ne!(dirty, default_inquiry);
    assert_eq!(reset(&default_inquiry), default_inquiry);
}

#[test]
fn transitions_do_not_mutate_their_input() {
    let current = base();
    let snapshot = current.clone();
    let _ = apply_category_toggle(&current, CourseCategory::Programming, true);
    let _ = apply_option_select(&current, "discounted");
    let _ = set_page(&current, 9);
    assert_eq!(current, snapshot);
}
