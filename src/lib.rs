pub mod args;
pub mod config;
pub mod feedback;
pub mod images;
pub mod model;
pub mod pool;
pub mod state;
pub mod utils;
