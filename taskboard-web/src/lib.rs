//! # Taskboard Web Server Library
//!
//! The web-facing half of taskboard: a server-rendered to-do list where
//! each authenticated user sees and edits only their own tasks.
//!
//! ## Modules
//!
//! - `app`: Application state, session middleware, and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: Page route handlers
//! - `views`: HTML rendering

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod views;
