//! The canonical filter/sort/pagination object sent to the course list query.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{CourseCategory, CourseType, Direction, MemberId};

pub const FIRST_PAGE: u32 = 1;

/// Selecting this option clears the single-select `options` criterion.
pub const ALL_OPTIONS: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_list: Option<Vec<CourseCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_list: Option<Vec<CourseType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberId>,
}

impl CourseSearch {
    pub fn is_unconstrained(&self) -> bool {
        *self == CourseSearch::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInquiry {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub search: CourseSearch,
}

impl SearchInquiry {
    pub fn new(limit: u32) -> Self {
        Self {
            page: FIRST_PAGE,
            limit,
            sort: None,
            direction: None,
            search: CourseSearch::default(),
        }
    }

    pub fn sorted_by(mut self, sort: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some(sort.into());
        self.direction = Some(direction);
        self
    }

    pub fn owned_by(mut self, member_id: MemberId) -> Self {
        self.search.member_id = Some(member_id);
        self
    }

    /// Drops every multi-valued criterion that ended up empty. The remote query
    /// treats an absent field as "no constraint"; an empty list is not
    /// guaranteed to mean the same thing, so it must never leave the client.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn normalize(&mut self) {
        drop_if_empty(&mut self.search.category_list);
        drop_if_empty(&mut self.search.type_list);
        drop_if_empty(&mut self.search.options);
    }

    pub fn is_normalized(&self) -> bool {
        !is_empty_list(&self.search.category_list)
            && !is_empty_list(&self.search.type_list)
            && !is_empty_list(&self.search.options)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

fn drop_if_empty<T>(field: &mut Option<Vec<T>>) {
    if is_empty_list(field) {
        *field = None;
    }
}

fn is_empty_list<T>(field: &Option<Vec<T>>) -> bool {
    field.as_ref().is_some_and(Vec::is_empty)
}

/// Page-owned default inquiries for each listing surface.
pub mod defaults {
    use super::*;

    pub const CREATED_AT: &str = "createdAt";
    pub const COURSE_PRICE: &str = "coursePrice";
    pub const COURSE_VIEWS: &str = "courseViews";
    pub const COURSE_LIKES: &str = "courseLikes";
    pub const COURSE_RANK: &str = "courseRank";

    pub fn course_list() -> SearchInquiry {
        SearchInquiry::new(9).sorted_by(CREATED_AT, Direction::Desc)
    }

    pub fn popular_courses() -> SearchInquiry {
        SearchInquiry::new(7).sorted_by(COURSE_VIEWS, Direction::Desc)
    }

    pub fn trending_courses() -> SearchInquiry {
        SearchInquiry::new(8).sorted_by(COURSE_LIKES, Direction::Desc)
    }

    pub fn top_courses() -> SearchInquiry {
        SearchInquiry::new(8).sorted_by(COURSE_RANK, Direction::Desc)
    }

    pub fn member_courses(member_id: MemberId) -> SearchInquiry {
        SearchInquiry::new(8)
            .sorted_by(CREATED_AT, Direction::Desc)
            .owned_by(member_id)
    }
}

/// Named orderings offered by the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPreset {
    Newest,
    Oldest,
    Lowest,
    Highest,
    Popular,
    Liked,
    Rank,
}

impl SortPreset {
    pub const ALL: [SortPreset; 7] = [
        SortPreset::Newest,
        SortPreset::Oldest,
        SortPreset::Lowest,
        SortPreset::Highest,
        SortPreset::Popular,
        SortPreset::Liked,
        SortPreset::Rank,
    ];

    pub fn field(self) -> &'static str {
        match self {
            SortPreset::Newest | SortPreset::Oldest => defaults::CREATED_AT,
            SortPreset::Lowest | SortPreset::Highest => defaults::COURSE_PRICE,
            SortPreset::Popular => defaults::COURSE_VIEWS,
            SortPreset::Liked => defaults::COURSE_LIKES,
            SortPreset::Rank => defaults::COURSE_RANK,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            SortPreset::Oldest | SortPreset::Lowest => Direction::Asc,
            _ => Direction::Desc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortPreset::Newest => "newest",
            SortPreset::Oldest => "oldest",
            SortPreset::Lowest => "lowest",
            SortPreset::Highest => "highest",
            SortPreset::Popular => "popular",
            SortPreset::Liked => "liked",
            SortPreset::Rank => "rank",
        }
    }
}

impl fmt::Display for SortPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortPreset::ALL
            .into_iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort preset '{s}'"))
    }
}
