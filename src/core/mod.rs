pub mod cycle;
pub mod load_state;
pub mod pages;
pub mod route;
pub mod services;

pub use load_state::LoadState;
pub use route::Route;
