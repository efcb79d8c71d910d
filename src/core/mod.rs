pub mod backup;
pub mod config;
pub mod grades;
pub mod grades_logic;
pub mod log;
pub mod schedule;
pub mod subjects;
pub mod timetable;
pub mod todos;
