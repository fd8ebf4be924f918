pub mod api;
pub mod app_state;
pub mod assets;
pub mod config;
pub mod controller;
pub mod server;
pub mod view;

#[cfg(test)]
mod test_support;
