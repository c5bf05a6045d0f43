pub mod auth_service;
pub mod otp_service;
pub mod seller_service;
pub mod token_service;
