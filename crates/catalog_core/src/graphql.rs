use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::CourseId,
    inquiry::SearchInquiry,
    protocol::{GetCoursesData, GraphQlRequest, GraphQlResponse, LikeTargetCourseData},
};
use tracing::debug;

use crate::{error::CatalogError, CourseFetcher, CourseLiker, CourseListing};

/// Fetch and like capabilities backed by the marketplace GraphQL endpoint.
pub struct GraphQlCatalogClient {
    http: Client,
    endpoint: String,
}

impl GraphQlCatalogClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    async fn execute<V, T>(
        &self,
        request: &GraphQlRequest<V>,
        access_token: Option<&str>,
    ) -> Result<T, CatalogError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self.http.post(&self.endpoint).json(request);
        if let Some(token) = access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(
            endpoint = %self.endpoint,
            operation = request.operation_name.as_deref().unwrap_or("anonymous"),
            %status,
            bytes = body.len(),
            "graphql response"
        );

        // Servers report resolver failures both as 200 + `errors` and as 4xx
        // with the same envelope, so look at the body before the status.
        let envelope = serde_json::from_str::<GraphQlResponse<T>>(&body);
        match envelope {
            Ok(GraphQlResponse { errors, .. }) if !errors.is_empty() => {
                Err(CatalogError::remote(errors[0].message.clone()))
            }
            Ok(GraphQlResponse { data: Some(data), .. }) if status.is_success() => Ok(data),
            Ok(_) if status.is_success() => Err(CatalogError::remote("response carried no data")),
            Err(err) if status.is_success() => Err(CatalogError::remote(format!(
                "unexpected response shape: {err}"
            ))),
            _ => Err(CatalogError::remote(format!(
                "server answered {status}"
            ))),
        }
    }
}

#[async_trait]
impl CourseFetcher for GraphQlCatalogClient {
    async fn fetch_courses(&self, inquiry: &SearchInquiry) -> Result<CourseListing, CatalogError> {
        let request = GraphQlRequest::get_courses(inquiry.clone());
        let data: GetCoursesData = self.execute(&request, None).await?;
        let total = data.get_courses.total();
        Ok(CourseListing {
            list: data.get_courses.list,
            total,
        })
    }
}

#[async_trait]
impl CourseLiker for GraphQlCatalogClient {
    async fn like_course(
        &self,
        access_token: &str,
        course_id: &CourseId,
    ) -> Result<(), CatalogError> {
        let request = GraphQlRequest::like_target_course(course_id.clone());
        let data: LikeTargetCourseData = self.execute(&request, Some(access_token)).await?;
        match data.like_target_course {
            Some(_) => Ok(()),
            None => Err(CatalogError::remote(format!(
                "course {course_id} could not be liked"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "tests/graphql_tests.rs"]
mod tests;
