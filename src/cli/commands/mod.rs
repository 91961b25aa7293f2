pub mod check;
pub mod fmt;
pub mod init;
pub mod list;
