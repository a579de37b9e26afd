pub mod grade;
pub mod init;
pub mod path;
pub mod validate;
