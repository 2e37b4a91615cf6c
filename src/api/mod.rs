mod client;
mod types;

pub use client::{Credentials, DiskClient, LOGIN_EXPIRED};
pub use types::{ApiResponse, SUCCESS_CODE};
