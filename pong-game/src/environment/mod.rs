pub mod pong;
pub mod pong_environment;
