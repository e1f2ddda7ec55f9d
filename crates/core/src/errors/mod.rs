//! 统一错误类型

pub mod gateway_error;
pub mod store_error;

pub use gateway_error::GatewayError;
pub use store_error::StoreError;
