//! Application layer with the API façade, interceptors and notification engine.

/// Data transfer objects.
pub mod dto;
/// Client, pipeline and notification services.
pub mod services;

pub use dto::{LoginRequest, LoginResponse, ProfileUpdate, RegisterRequest};
pub use services::{ApiPipeline, CodeAssistClient, NotificationCenter, ToastTicker};
