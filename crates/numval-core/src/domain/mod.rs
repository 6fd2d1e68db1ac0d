pub mod phone;
pub mod request;
pub mod response;

pub use phone::PhoneNumber;
pub use request::{build_requests, ValidationRequest};
pub use response::{PhoneType, ValidationResponse};
