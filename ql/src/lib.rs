pub mod prelude;
pub mod q_table;
