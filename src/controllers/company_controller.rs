use axum::http::StatusCode;

use crate::dto::company_dto::{
    ApiResponse, CompanyResponse, CompanySaveRequest, CompanySearchRequest, PaginationQuery,
};
use crate::models::company::SaveOutcome;
use crate::services::company_service::CompanyService;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::{validate_cr_number, validate_pagination};

pub struct CompanyController {
    service: CompanyService,
}

impl CompanyController {
    pub fn new(service: CompanyService) -> Self {
        Self { service }
    }

    pub async fn search(
        &self,
        request: CompanySearchRequest,
    ) -> AppResult<ApiResponse<CompanyResponse>> {
        let cr_number = request.into_cr_number()?;

        let company = self
            .service
            .find_by_cr(&cr_number)
            .await?
            .ok_or_else(|| not_found_error(&cr_number))?;

        Ok(ApiResponse::success(
            CompanyResponse::from(company),
            "Company found successfully",
        ))
    }

    /// Devuelve 201 si la company se creó y 200 si se actualizó
    pub async fn save(
        &self,
        request: CompanySaveRequest,
    ) -> AppResult<(StatusCode, ApiResponse<CompanyResponse>)> {
        let payload = request.into_payload()?;
        let saved = self.service.save(payload).await?;

        let (status, message) = match saved.outcome {
            SaveOutcome::Created => (StatusCode::CREATED, "Company created successfully"),
            SaveOutcome::Updated => (StatusCode::OK, "Company updated successfully"),
        };

        Ok((
            status,
            ApiResponse::with_status(CompanyResponse::from(saved.company), message, status.as_u16()),
        ))
    }

    pub async fn list(&self, query: PaginationQuery) -> AppResult<ApiResponse<Vec<CompanyResponse>>> {
        let (page_number, page_size) = (query.page_number(), query.page_size());
        validate_pagination(page_number, page_size)?;

        let companies = self.service.list(page_number, page_size).await?;

        Ok(ApiResponse::success(
            companies.into_iter().map(CompanyResponse::from).collect(),
            "Companies retrieved successfully",
        ))
    }

    /// 200 si existe, 404 si no
    pub async fn exists(&self, cr_number: &str) -> AppResult<StatusCode> {
        validate_cr_number(cr_number)?;

        if self.service.exists(cr_number).await? {
            Ok(StatusCode::OK)
        } else {
            Ok(StatusCode::NOT_FOUND)
        }
    }
}
