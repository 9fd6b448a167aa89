pub mod handlers;
pub mod query;
pub mod routes;
pub mod state;
pub mod types;
pub mod websocket;

pub use query::QueryError;
pub use routes::create_router;
pub use state::AppState;
