pub mod config;
pub mod swarm;
