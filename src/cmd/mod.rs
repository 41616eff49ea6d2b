pub mod init;
pub mod reserved;
pub mod root;
pub mod show;
