//! Terminal UI: a setup form for board size and player colors, and the game
//! view that turns keys and clicks into column drops.

mod app;
pub mod game_view;
pub mod setup_view;

pub use app::App;
