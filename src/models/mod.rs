pub mod entity;
pub mod security;
pub mod purchase;

pub use entity::Entity;
pub use security::{Region, Security, SecurityType};
pub use purchase::{Currency, Purchase};
