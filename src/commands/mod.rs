//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler

pub mod generate;
pub mod init;

pub use generate::{execute_generate, generate_output, GenerateOptions};
pub use init::{execute_init, InitOptions};
