pub mod activity;
pub mod add;
pub mod column;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod reset;
pub mod session;
pub mod show;
