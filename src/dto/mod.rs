pub mod company_dto;
