pub mod dates;
pub mod error;
pub mod types;

pub use dates::{days_until, format_date, format_datetime, is_future, is_past, parse_date, today_utc};
pub use error::ServiceError;
pub use types::{new_id, now_rfc3339, ListParams, ListResult};
