use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(CourseId);
id_newtype!(MemberId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseCategory {
    Programming,
    Design,
    Business,
    Marketing,
    Photography,
    Music,
    Language,
    Health,
}

impl CourseCategory {
    pub const ALL: [CourseCategory; 8] = [
        CourseCategory::Programming,
        CourseCategory::Design,
        CourseCategory::Business,
        CourseCategory::Marketing,
        CourseCategory::Photography,
        CourseCategory::Music,
        CourseCategory::Language,
        CourseCategory::Health,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    Online,
    Offline,
    Hybrid,
}

impl CourseType {
    pub const ALL: [CourseType; 3] = [CourseType::Online, CourseType::Offline, CourseType::Hybrid];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    Active,
    Pause,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberPosition {
    User,
    Instructor,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// Wire names are the variant names, which is also what the filter UI shows.
macro_rules! label_parsing {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{self:?}")
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|value| value.to_string().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| format!("unknown {} '{s}'", stringify!($ty)))
            }
        }
    };
}

label_parsing!(CourseCategory);
label_parsing!(CourseType);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub lesson_title: String,
    /// Minutes.
    #[serde(default)]
    pub lesson_duration: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub module_title: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// Denormalized owner snapshot embedded in every course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSnapshot {
    pub member_nick: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_image: Option<String>,
    pub member_type: MemberPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: CourseId,
    pub course_title: String,
    #[serde(default)]
    pub course_desc: String,
    pub course_price: f64,
    #[serde(default)]
    pub course_views: u64,
    #[serde(default)]
    pub course_likes: u64,
    #[serde(default)]
    pub course_rank: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_image: Option<String>,
    pub course_status: CourseStatus,
    pub course_type: CourseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_category: Option<CourseCategory>,
    #[serde(default)]
    pub course_modules: Vec<CourseModule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_data: Option<MemberSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn lesson_count(&self) -> usize {
        self.course_modules
            .iter()
            .map(|module| module.lessons.len())
            .sum()
    }

    pub fn total_duration_minutes(&self) -> u32 {
        self.course_modules
            .iter()
            .flat_map(|module| module.lessons.iter())
            .map(|lesson| lesson.lesson_duration)
            .sum()
    }
}
