pub mod admin;
pub mod documents;
pub mod health;
pub mod login;
pub mod me;
pub mod otp;
pub mod password;
pub mod profile;
pub mod signup;
pub mod status;
