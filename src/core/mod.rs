pub mod app;
pub mod backend_service;
pub mod config;
pub mod conversations;
pub mod message;
pub mod message_store;
