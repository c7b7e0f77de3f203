pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod render;
pub mod routes;
pub mod storage;
