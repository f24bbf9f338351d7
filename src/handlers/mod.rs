//! HTTP handlers: generic resource CRUD plus auth, contact, page-by-slug and site config.

pub mod auth;
pub mod contact;
pub mod pages;
pub mod resource;
pub mod site_config;
