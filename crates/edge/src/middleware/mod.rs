//! Edge middleware layers

mod locale;
mod request_id;

pub use locale::locale_middleware;
pub use request_id::{request_id_middleware, REQUEST_ID_HEADER};
