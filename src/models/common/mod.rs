pub mod pagination;
pub mod response;
pub mod string_enum;

pub use pagination::{PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
