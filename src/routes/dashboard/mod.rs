pub mod dto;
pub mod route;

pub use route::create_route;
