pub mod init;
pub mod prompt;
