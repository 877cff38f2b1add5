//! GraphQL-over-HTTP envelopes for the course marketplace API.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Course, CourseId},
    error::GraphQlError,
    inquiry::SearchInquiry,
};

pub const GET_COURSES_QUERY: &str = r#"query GetCourses($input: CoursesInquiry!) {
  getCourses(input: $input) {
    list {
      _id
      courseTitle
      courseDesc
      coursePrice
      courseViews
      courseLikes
      courseRank
      courseImage
      courseStatus
      courseType
      courseCategory
      courseModules {
        moduleTitle
        lessons {
          lessonTitle
          lessonDuration
        }
      }
      memberData {
        memberNick
        memberImage
        memberType
      }
      createdAt
    }
    metaCounter {
      total
    }
  }
}"#;

pub const LIKE_TARGET_COURSE_MUTATION: &str = r#"mutation LikeTargetCourse($input: String!) {
  likeTargetCourse(input: $input) {
    _id
    courseLikes
  }
}"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<V> {
    pub query: String,
    pub variables: V,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

/// Every operation here takes a single `$input` variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputVariables<T> {
    pub input: T,
}

impl GraphQlRequest<InputVariables<SearchInquiry>> {
    pub fn get_courses(inquiry: SearchInquiry) -> Self {
        Self {
            query: GET_COURSES_QUERY.to_string(),
            variables: InputVariables { input: inquiry },
            operation_name: Some("GetCourses".to_string()),
        }
    }
}

impl GraphQlRequest<InputVariables<CourseId>> {
    pub fn like_target_course(course_id: CourseId) -> Self {
        Self {
            query: LIKE_TARGET_COURSE_MUTATION.to_string(),
            variables: InputVariables { input: course_id },
            operation_name: Some("LikeTargetCourse".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaCounter {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesPage {
    #[serde(default)]
    pub list: Vec<Course>,
    #[serde(default)]
    pub meta_counter: Vec<MetaCounter>,
}

impl CoursesPage {
    /// The server reports the unpaginated total as a one-element counter list.
    pub fn total(&self) -> u64 {
        self.meta_counter.first().map_or(0, |counter| counter.total)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCoursesData {
    pub get_courses: CoursesPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedCourse {
    #[serde(rename = "_id")]
    pub id: CourseId,
    #[serde(default)]
    pub course_likes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeTargetCourseData {
    pub like_target_course: Option<LikedCourse>,
}
