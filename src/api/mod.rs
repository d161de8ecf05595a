// API module entry
// Query validation and echo for the /api/dados endpoint

mod handlers;
mod response;
mod types;

pub use handlers::handle_dados;
