pub mod error;
pub mod flatten;
pub mod record;
pub mod filter;
pub mod sink;
pub mod logger;
pub mod dispatch;
pub mod scenarios;

pub mod endpoint;
pub mod gelf;
pub mod gelf_tcp;
pub mod memory_sink;

pub mod env;
pub mod init;
