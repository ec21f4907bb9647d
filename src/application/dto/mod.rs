//! Data transfer objects for the application layer.

mod auth_dto;
mod code_dto;

pub use auth_dto::{AuthPayload, LoginRequest, LoginResponse, ProfileUpdate, RegisterRequest};
pub use code_dto::{
    CodeExplanation, DebugCodeRequest, DebugReport, ExplainCodeRequest, GenerateCodeRequest,
    GenerateSqlRequest, GeneratedCode,
};
