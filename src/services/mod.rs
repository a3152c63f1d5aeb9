pub mod metrics_service;
pub mod nlq_service;
