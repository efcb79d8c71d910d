use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries::load_todos;
use crate::db::records::formatting_json;
use crate::db::store::{Patch, bool_value, text};
use crate::errors::{AppError, AppResult};
use crate::models::{Priority, Todo};
use crate::utils::colors::{GREY, HIGHLIGHT_PALETTE, RED, RESET, YELLOW, resolve_color};
use crate::utils::date::days_between;
use crate::utils::formatting::styled_title;
use crate::utils::table::Table;
use chrono::NaiveDate;
use std::cmp::Ordering;

pub struct TodoLogic;

/// Requested changes for `TodoLogic::edit`. Style flags toggle.
#[derive(Debug, Default)]
pub struct TodoEdit {
    pub title: Option<String>,
    pub toggle_bold: bool,
    pub toggle_italic: bool,
    pub toggle_underline: bool,
    /// `Some(Some(color))` sets, `Some(None)` clears.
    pub highlight: Option<Option<String>>,
}

/// Due-date flag of an active todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    NoDueDate,
    Overdue,
    /// Due in `n` days, `n` within the due-soon window.
    DueSoon(i64),
    Later,
    Completed,
}

/// Classify a todo against `today`. Overdue is strictly before today.
pub fn due_status(todo: &Todo, today: NaiveDate, soon_days: i64) -> DueStatus {
    if todo.completed {
        return DueStatus::Completed;
    }
    match todo.due_date {
        None => DueStatus::NoDueDate,
        Some(d) if d < today => DueStatus::Overdue,
        Some(d) => {
            let n = days_between(today, d);
            if n <= soon_days {
                DueStatus::DueSoon(n)
            } else {
                DueStatus::Later
            }
        }
    }
}

/// Active first, then completed; each by due date (undated last) and
/// newest first.
pub fn display_order(a: &Todo, b: &Todo) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

fn validate_title(title: &str) -> AppResult<String> {
    let t = title.trim();
    if t.is_empty() {
        return Err(AppError::Empty("Todo title"));
    }
    Ok(t.to_string())
}

impl TodoLogic {
    pub fn add(
        pool: &DbPool,
        title: &str,
        priority: Priority,
        due: Option<NaiveDate>,
    ) -> AppResult<Todo> {
        let title = validate_title(title)?;
        let mut todo = Todo::new(&title, priority, due);
        todo.id = pool.insert(&todo)?;

        write_log(
            &pool.conn,
            "add",
            &format!("todo#{}", todo.id),
            &format!("Added todo '{}'", todo.title),
        )?;

        Ok(todo)
    }

    /// Flip the completed flag.
    pub fn toggle(pool: &DbPool, id: i64) -> AppResult<Todo> {
        let mut todo: Todo = pool.find(id)?;
        todo.completed = !todo.completed;

        pool.update::<Todo>(id, &vec![("completed", bool_value(todo.completed))])?;

        write_log(
            &pool.conn,
            "toggle",
            &format!("todo#{id}"),
            if todo.completed {
                "Marked as done"
            } else {
                "Marked as not done"
            },
        )?;

        Ok(todo)
    }

    /// Title and formatting are saved in one update.
    pub fn edit(pool: &DbPool, id: i64, changes: &TodoEdit) -> AppResult<Todo> {
        let original: Todo = pool.find(id)?;
        let mut todo = original.clone();

        if let Some(t) = &changes.title {
            todo.title = validate_title(t)?;
        }

        let fmt = &mut todo.formatting;
        fmt.bold ^= changes.toggle_bold;
        fmt.italic ^= changes.toggle_italic;
        fmt.underline ^= changes.toggle_underline;
        match &changes.highlight {
            Some(Some(c)) => fmt.highlight = Some(resolve_color(c, HIGHLIGHT_PALETTE)?),
            Some(None) => fmt.highlight = None,
            None => {}
        }

        if todo == original {
            return Ok(todo);
        }

        let patch: Patch = vec![
            ("title", text(&todo.title)),
            ("formatting", text(&formatting_json(&todo.formatting))),
        ];
        pool.update::<Todo>(id, &patch)?;

        write_log(
            &pool.conn,
            "edit",
            &format!("todo#{id}"),
            &format!("Edited todo '{}'", todo.title),
        )?;

        Ok(todo)
    }

    pub fn del(pool: &DbPool, id: i64) -> AppResult<Todo> {
        let todo: Todo = pool.find(id)?;
        pool.delete::<Todo>(id)?;

        write_log(
            &pool.conn,
            "del",
            &format!("todo#{id}"),
            &format!("Deleted todo '{}'", todo.title),
        )?;

        Ok(todo)
    }

    pub fn list(
        pool: &DbPool,
        include_completed: bool,
        today: NaiveDate,
        soon_days: i64,
        separator: char,
    ) -> AppResult<String> {
        let mut todos = load_todos(pool)?;
        if !include_completed {
            todos.retain(|t| !t.completed);
        }
        todos.sort_by(display_order);
        Ok(render_todos(&todos, today, soon_days, separator))
    }
}

fn priority_label(p: Priority) -> String {
    match p {
        Priority::High => format!("{RED}high{RESET}"),
        Priority::Medium => format!("{YELLOW}medium{RESET}"),
        Priority::Low => format!("{GREY}low{RESET}"),
    }
}

fn status_label(status: DueStatus) -> String {
    match status {
        DueStatus::Overdue => format!("{RED}overdue{RESET}"),
        DueStatus::DueSoon(0) => format!("{YELLOW}today{RESET}"),
        DueStatus::DueSoon(1) => format!("{YELLOW}tomorrow{RESET}"),
        DueStatus::DueSoon(n) => format!("{YELLOW}in {n} days{RESET}"),
        DueStatus::Completed => format!("{GREY}done{RESET}"),
        DueStatus::NoDueDate | DueStatus::Later => String::new(),
    }
}

/// Expects `todos` already in display order.
pub fn render_todos(todos: &[Todo], today: NaiveDate, soon_days: i64, separator: char) -> String {
    if todos.is_empty() {
        return "Nothing to do.\n".to_string();
    }

    let mut table = Table::new(vec!["ID", "", "Title", "Priority", "Due", "Status"]);

    for t in todos {
        let check = if t.completed { "[x]" } else { "[ ]" };
        let title = if t.completed {
            format!("{GREY}{}{RESET}", t.title)
        } else if t.formatting.is_plain() {
            t.title.clone()
        } else {
            styled_title(&t.title, &t.formatting)
        };

        table.add_row(vec![
            t.id.to_string(),
            check.to_string(),
            title,
            priority_label(t.priority),
            t.due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            status_label(due_status(t, today, soon_days)),
        ]);
    }

    table.render(separator)
}
