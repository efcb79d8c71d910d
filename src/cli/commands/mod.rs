pub mod average;
pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod grade;
pub mod init;
pub mod log;
pub mod schedule;
pub mod subject;
pub mod todo;
