pub mod admin;
pub mod annotations;
pub mod auth;
pub mod export;
pub mod health;
pub mod moderation;
pub mod tools;
pub mod verses;
