//! CSV export of users, projects, and applications.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::instrument;

use crate::csv;
use crate::db::{ApplicationRepository, ProfileRepository, ProjectRepository};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "type")]
    pub kind: String,
}

/// `GET /api/export?type=users|projects|applications`
#[instrument(skip(_admin, state))]
pub async fn export(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let document = match query.kind.as_str() {
        "users" => export_users(&state).await?,
        "projects" => export_projects(&state).await?,
        "applications" => export_applications(&state).await?,
        other => {
            return Err(AppError::BadRequest(format!(
                "unknown export type: {other}"
            )));
        }
    };

    let filename = csv::filename(&query.kind, chrono::Utc::now().date_naive());

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| AppError::Internal(format!("invalid export filename: {e}")))?,
    );

    Ok((headers, document).into_response())
}

async fn export_users(state: &AppState) -> Result<String, AppError> {
    let users = ProfileRepository::new(state.pool()).list_all().await?;
    let rows = users
        .iter()
        .map(|u| {
            vec![
                u.name.clone(),
                u.email.as_str().to_owned(),
                u.phone.clone().unwrap_or_default(),
                u.skills.join(";"),
                u.career_years.map(|y| y.to_string()).unwrap_or_default(),
                u.account_status.to_string(),
                u.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect::<Vec<_>>();

    Ok(csv::render(
        &["이름", "이메일", "전화번호", "기술", "경력(년)", "상태", "가입일"],
        &rows,
    ))
}

async fn export_projects(state: &AppState) -> Result<String, AppError> {
    let projects = ProjectRepository::new(state.pool()).list_all().await?;
    let rows = projects
        .iter()
        .map(|p| {
            vec![
                p.title.clone(),
                p.status.to_string(),
                p.category.clone().unwrap_or_default(),
                p.budget_min.map(|b| b.to_string()).unwrap_or_default(),
                p.budget_max.map(|b| b.to_string()).unwrap_or_default(),
                p.start_date.map(|d| d.to_string()).unwrap_or_default(),
                p.end_date.map(|d| d.to_string()).unwrap_or_default(),
                p.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect::<Vec<_>>();

    Ok(csv::render(
        &["제목", "상태", "카테고리", "최소예산", "최대예산", "시작일", "종료일", "등록일"],
        &rows,
    ))
}

async fn export_applications(state: &AppState) -> Result<String, AppError> {
    let applications = ApplicationRepository::new(state.pool()).list_all().await?;
    let rows = applications
        .iter()
        .map(|a| {
            vec![
                a.project_title.clone(),
                a.applicant_name.clone(),
                a.applicant_email.clone(),
                a.application.status.to_string(),
                a.application
                    .expected_budget
                    .map(|b| b.to_string())
                    .unwrap_or_default(),
                a.application.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect::<Vec<_>>();

    Ok(csv::render(
        &["프로젝트", "지원자", "이메일", "상태", "희망예산", "지원일"],
        &rows,
    ))
}
