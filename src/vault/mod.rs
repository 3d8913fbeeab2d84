pub mod codec;
pub mod command;
pub mod dispatcher;
pub mod errors;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod ports;
pub mod service;
pub mod state;
