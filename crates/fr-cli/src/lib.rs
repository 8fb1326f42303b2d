pub mod cmd_check;
pub mod cmd_order;
pub mod tracing_init;
