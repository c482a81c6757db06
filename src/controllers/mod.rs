pub mod home_controller;

pub mod api_support;
pub mod security_api_controller;
pub mod purchase_api_controller;

pub mod crud_controller;
pub mod security_controller;
pub mod purchase_controller;
