//! Client for the resume builder server: template picker, form, preview,
//! AI-assisted summaries and PDF download.

pub mod api;
pub mod builder;
pub mod config;
pub mod download;
pub mod errors;
pub mod form;
pub mod models;
pub mod picker;
pub mod state;
pub mod ui;
