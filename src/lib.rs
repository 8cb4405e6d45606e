// Library for tests to access modules

pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod monitor;
pub mod platform;
pub mod probe;
pub mod query;
pub mod routes;
pub mod sampler;
pub mod version;
