// Library for tests to access modules

pub mod config;
pub mod models;
pub mod render;
pub mod routes;
pub mod seed;
pub mod state_store;
pub mod sysinfo_repo;
