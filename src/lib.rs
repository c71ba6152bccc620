pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod factory;
pub mod rng;
pub mod runner;
pub mod scorer;
pub mod session;
pub mod stats;
pub mod trial;
// cmd and reports are binary modules (see main.rs).
