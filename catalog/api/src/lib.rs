pub mod api;
pub mod config;
pub mod database;
pub mod dto;
pub mod global;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;
