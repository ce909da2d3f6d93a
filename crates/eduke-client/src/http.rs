//! `reqwest` implementation of [`SchoolApi`].

use async_trait::async_trait;
use eduke_config::ApiConfig;
use eduke_core::ClientError;
use eduke_models::{
    Assessment, BranchId, DashboardStats, EnterGradeDto, FinancialReport, GradeLevel,
    GradeLevelId, GradeRecord, Student, Subject, TimetableEntry, TimetableEntryId, UserId,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::api::SchoolApi;

/// HTTP client for the school API, authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> Result<RequestBuilder, ClientError> {
        let token = self.config.token.as_deref().ok_or(ClientError::Unauthorized)?;

        let params: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (*name, v)))
            .collect();

        Ok(self
            .http
            .request(method, self.config.url(path))
            .bearer_auth(token)
            .query(&params))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_detail(&body).unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("request failed").to_string()
        });

        warn!(status = status.as_u16(), message = %message, "API request rejected");

        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            _ => Err(ClientError::http(status.as_u16(), message)),
        }
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, Option<String>)]) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::GET, path, query)?).await?;
        decode(response).await
    }
}

/// Pull the human-readable message out of an error body.
///
/// The API answers `{"detail": "..."}` or `{"error": "..."}`; anything else
/// is used verbatim when short.
fn error_detail(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["detail", "error", "message"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
    }

    let trimmed = body.trim();
    (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_string())
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_decode() {
        ClientError::Decode(e.to_string())
    } else {
        ClientError::Network(e.to_string())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

fn id_param<I: ToString>(id: Option<I>) -> Option<String> {
    id.map(|i| i.to_string())
}

#[async_trait]
impl SchoolApi for HttpApiClient {
    #[instrument(skip(self))]
    async fn dashboard_stats(&self, branch: Option<BranchId>) -> Result<DashboardStats, ClientError> {
        self.get_json("/dashboard/stats", &[("branch_id", id_param(branch))])
            .await
    }

    #[instrument(skip(self))]
    async fn financial_report(
        &self,
        days: u32,
        branch: Option<BranchId>,
    ) -> Result<FinancialReport, ClientError> {
        self.get_json(
            "/reports/financial",
            &[("days", Some(days.to_string())), ("branch_id", id_param(branch))],
        )
        .await
    }

    async fn grade_levels(&self) -> Result<Vec<GradeLevel>, ClientError> {
        self.get_json("/school/grade-levels", &[]).await
    }

    async fn subjects(&self) -> Result<Vec<Subject>, ClientError> {
        self.get_json("/school/subjects", &[]).await
    }

    async fn assessments(&self) -> Result<Vec<Assessment>, ClientError> {
        self.get_json("/school/assessments", &[]).await
    }

    #[instrument(skip(self))]
    async fn students(&self, grade_level: GradeLevelId) -> Result<Vec<Student>, ClientError> {
        self.get_json(
            "/school/students",
            &[("grade_level_id", Some(grade_level.to_string()))],
        )
        .await
    }

    #[instrument(skip(self, grade), fields(student_id = %grade.student_id))]
    async fn enter_grade(&self, grade: &EnterGradeDto) -> Result<GradeRecord, ClientError> {
        let builder = self.request(Method::POST, "/school/grades", &[])?.json(grade);
        let response = self.send(builder).await?;
        debug!("Grade recorded");
        decode(response).await
    }

    #[instrument(skip(self))]
    async fn timetable(
        &self,
        grade_level: Option<GradeLevelId>,
        teacher: Option<UserId>,
    ) -> Result<Vec<TimetableEntry>, ClientError> {
        self.get_json(
            "/school/timetable",
            &[
                ("grade_level_id", id_param(grade_level)),
                ("teacher_id", id_param(teacher)),
            ],
        )
        .await
    }

    async fn my_timetable(&self) -> Result<Vec<TimetableEntry>, ClientError> {
        self.get_json("/school/timetable/me", &[]).await
    }

    #[instrument(skip(self))]
    async fn delete_timetable_entry(&self, id: TimetableEntryId) -> Result<(), ClientError> {
        let path = format!("/school/timetable/{id}");
        self.send(self.request(Method::DELETE, &path, &[])?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_shapes() {
        assert_eq!(
            error_detail(r#"{"detail":"Not enough permissions"}"#).as_deref(),
            Some("Not enough permissions")
        );
        assert_eq!(error_detail(r#"{"error":"boom"}"#).as_deref(), Some("boom"));
        assert_eq!(error_detail("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(error_detail("   "), None);
        assert_eq!(error_detail(&"x".repeat(500)), None);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let client = HttpApiClient::new(ApiConfig::default()).unwrap();
        let err = client.subjects().await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
    }
}
