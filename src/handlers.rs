pub mod auth;
pub mod brands;
pub mod comparison;
pub mod health;
pub mod pricing;
pub mod settings;
