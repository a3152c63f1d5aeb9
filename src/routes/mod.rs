pub(crate) mod diag;
pub(crate) mod health;
pub(crate) mod metadata;
pub(crate) mod metrics;
pub(crate) mod nlq;
pub(crate) mod webhook;
