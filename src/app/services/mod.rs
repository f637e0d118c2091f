//! Core business logic services

pub mod csv_upload;
pub mod submission;
pub mod upload_session;
