//! Application services.

/// API client façade.
pub mod api_client;
/// Request and response interceptors.
pub mod interceptors;
/// Notification host.
pub mod notification_center;
/// Request pipeline.
pub mod pipeline;
/// Notification timer task.
pub mod toast_ticker;

pub use api_client::CodeAssistClient;
pub use interceptors::{
    AuthHeaderInterceptor, RequestInterceptor, ResponseDisposition, ResponseInterceptor,
    SessionGuard,
};
pub use notification_center::{CompletionCallback, NotificationCenter};
pub use pipeline::ApiPipeline;
pub use toast_ticker::ToastTicker;
