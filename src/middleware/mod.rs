//! HTTP middleware for chatrelay

mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
