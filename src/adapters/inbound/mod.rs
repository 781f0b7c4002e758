mod api_server;
mod http_error;

pub use api_server::{ApiServer, ApiState};
pub use http_error::{status_code, ErrorResponse};

// Re-export for external use (e.g., integration tests)
#[allow(unused_imports)]
pub use api_server::{HealthResponse, VerifyRequest, VerifyResponse};
