use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, head, post},
    Json, Router,
};

use crate::controllers::company_controller::CompanyController;
use crate::dto::company_dto::{
    ApiResponse, CompanyResponse, CompanySaveRequest, CompanySearchRequest, PaginationQuery,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::PAGINATION_MESSAGE;

pub fn create_company_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies))
        .route("/search", post(search_company))
        .route("/save", post(save_company))
        .route("/:cr_number", head(company_exists))
}

/// Un body JSON mal formado es un error de validación (400), no un 422
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::invalid_input(vec![rejection.body_text()]))
}

async fn search_company(
    State(state): State<AppState>,
    payload: Result<Json<CompanySearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let request = json_body(payload)?;
    let controller = CompanyController::new(state.companies.clone());
    let response = controller.search(request).await?;
    Ok(Json(response))
}

async fn save_company(
    State(state): State<AppState>,
    payload: Result<Json<CompanySaveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyResponse>>), AppError> {
    let request = json_body(payload)?;
    let controller = CompanyController::new(state.companies.clone());
    let (status, response) = controller.save(request).await?;
    Ok((status, Json(response)))
}

async fn list_companies(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<CompanyResponse>>>, AppError> {
    let Query(query) = query.map_err(|_| AppError::invalid(PAGINATION_MESSAGE))?;
    let controller = CompanyController::new(state.companies.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn company_exists(
    State(state): State<AppState>,
    Path(cr_number): Path<String>,
) -> Result<StatusCode, AppError> {
    let controller = CompanyController::new(state.companies.clone());
    controller.exists(&cr_number).await
}
