pub mod handlers;
pub mod render;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
