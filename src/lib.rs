// Core of the trainer: paddle timing, statistics and the practice glue.
// The terminal front end lives in the binary (main.rs) and only drives these
// modules; benchmarks and integration tests import them as `ditdah::*`.

pub mod config;
pub mod engine;
pub mod morse;
pub mod paddle;
pub mod session;
pub mod store;
