pub mod control_loop;
pub mod environment;
pub mod observer;
pub mod simulation;
pub mod util;
