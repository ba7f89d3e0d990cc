//! Shared response envelope for API handlers.
//!
//! Every successful response is wrapped in `{ "data": ... }`. Handlers use
//! [`DataResponse`] rather than ad-hoc `serde_json::json!` maps so the
//! payload type stays visible in the handler signature.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
