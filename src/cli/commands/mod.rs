pub mod check;
mod command_result;
pub mod helper;
pub mod init;
pub mod scan;
pub mod translate;

pub use command_result::*;
