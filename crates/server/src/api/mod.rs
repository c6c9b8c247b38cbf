pub mod content;
pub mod handlers;
pub mod leaderboard;
pub mod middleware;
pub mod rounds;
pub mod routes;
pub mod ws;

pub use routes::create_router;
pub use ws::WsMessage;
