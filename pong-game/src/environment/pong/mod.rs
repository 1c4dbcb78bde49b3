pub mod algebra_2d;
pub mod app_game_drawer;
pub mod mechanics;
pub mod pong_drawer;
