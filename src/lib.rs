//! Core library for the streaming package comparison service.
//!
//! This crate exposes the domain model, catalog repository, request forms,
//! DTOs, routes and service layers used by the HTTP application.

pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
