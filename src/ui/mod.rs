//! Front ends over [`GameSession`](crate::game::GameSession): a ratatui game
//! view and a plain line-based text mode.

mod app;
mod game_view;
pub mod text;

pub use app::App;
