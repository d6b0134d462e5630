//! Club Site Server
//!
//! Role-based access control and site content for a sports club website:
//! permission evaluation, banner and popup scheduling, site status and the
//! password reset flow, backed by `PostgreSQL`.

pub mod auth;
pub mod config;
pub mod db;
pub mod observability;
pub mod permissions;
pub mod site;
