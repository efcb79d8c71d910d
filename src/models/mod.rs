pub mod grade;
pub mod schedule_entry;
pub mod subject;
pub mod todo;

pub use grade::Grade;
pub use schedule_entry::{Recurrence, ScheduleEntry, WeekFilter, WeekParity};
pub use subject::Subject;
pub use todo::{Priority, Todo, TodoFormatting};
