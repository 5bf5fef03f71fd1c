//! tick-core - Core library for Tick
//!
//! This crate contains the backend API clients, session lifecycle, route
//! gating, and todo list logic shared by every Tick interface.

pub mod auth;
pub mod config;
pub mod models;
pub mod rest;
pub mod route;
pub mod session;
pub mod todos;
pub mod util;

pub use models::{Todo, TodoStatus};
