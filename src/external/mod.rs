pub mod bigquery;
pub mod metrics_repository;
pub mod webhook;
