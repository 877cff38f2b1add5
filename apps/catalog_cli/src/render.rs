//! Two presentation strategies over the same controller snapshot: a table for
//! wide terminals and stacked cards for narrow ones.

use std::fmt::Write as _;

use catalog_core::{ControllerSnapshot, PagerView};
use shared::domain::Course;

const EMPTY_PLACEHOLDER: &str = "No courses match these filters.";
const WIDE_MIN_COLUMNS: usize = 100;

pub trait CourseListRenderer {
    fn render(&self, snapshot: &ControllerSnapshot) -> String;
}

pub fn select_renderer(compact: bool, columns: Option<usize>) -> Box<dyn CourseListRenderer> {
    let narrow = columns.is_some_and(|columns| columns < WIDE_MIN_COLUMNS);
    if compact || narrow {
        Box::new(CompactRenderer)
    } else {
        Box::new(WideRenderer)
    }
}

pub struct WideRenderer;

impl CourseListRenderer for WideRenderer {
    fn render(&self, snapshot: &ControllerSnapshot) -> String {
        let Some(pager) = snapshot.pager() else {
            return format!("{EMPTY_PLACEHOLDER}\n");
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", pager.caption());
        let _ = writeln!(
            out,
            "{:<36} {:<12} {:<8} {:>9} {:>6} {:>7}  {}",
            "TITLE", "CATEGORY", "TYPE", "PRICE", "LIKES", "VIEWS", "INSTRUCTOR"
        );
        for course in &snapshot.courses {
            let _ = writeln!(
                out,
                "{:<36} {:<12} {:<8} {:>9} {:>6} {:>7}  {}",
                truncate(&course.course_title, 36),
                category_label(course),
                course.course_type.to_string(),
                format!("{:.2}", course.course_price),
                course.course_likes,
                course.course_views,
                instructor(course),
            );
        }
        let _ = writeln!(out, "{}", pager_line(&pager));
        out
    }
}

pub struct CompactRenderer;

impl CourseListRenderer for CompactRenderer {
    fn render(&self, snapshot: &ControllerSnapshot) -> String {
        let Some(pager) = snapshot.pager() else {
            return format!("{EMPTY_PLACEHOLDER}\n");
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", pager.caption());
        for course in &snapshot.courses {
            let _ = writeln!(
                out,
                "\n{} ({:.2})",
                truncate(&course.course_title, 48),
                course.course_price
            );
            let _ = writeln!(
                out,
                "  {} / {} / {} lessons, {} min / {} likes",
                category_label(course),
                course.course_type,
                course.lesson_count(),
                course.total_duration_minutes(),
                course.course_likes
            );
        }
        let _ = writeln!(out, "\n{}", pager_line(&pager));
        out
    }
}

fn pager_line(pager: &PagerView) -> String {
    let mut line = format!("Page {} of {}", pager.current, pager.page_count);
    if pager.has_previous() {
        line.push_str("  [--page ");
        line.push_str(&(pager.current - 1).to_string());
        line.push_str(" for previous]");
    }
    if pager.has_next() {
        line.push_str("  [--page ");
        line.push_str(&(pager.current + 1).to_string());
        line.push_str(" for next]");
    }
    line
}

fn category_label(course: &Course) -> String {
    course
        .course_category
        .map(|category| category.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn instructor(course: &Course) -> &str {
    course
        .member_data
        .as_ref()
        .map_or("-", |member| member.member_nick.as_str())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
