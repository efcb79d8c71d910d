use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::truncate;
use crate::utils::table::{pad_right, visible_width};
use ansi_term::Colour;

/// Widest "operation (target)" column before truncation.
const OP_WIDTH: usize = 60;
/// Messages wrap after this many columns.
const MESSAGE_WIDTH: usize = 70;

/// ANSI colour for each logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "move" => Colour::Cyan,
        "toggle" => Colour::RGB(120, 200, 120),
        "seed" => Colour::RGB(69, 183, 209),
        "export" => Colour::RGB(180, 199, 163),
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn render_log(pool: &DbPool) -> AppResult<String> {
        let rows = load_log(&pool.conn)?;

        if rows.is_empty() {
            return Ok("Internal log is empty.\n".to_string());
        }

        let entries: Vec<(i64, String, String, String, String)> = rows
            .into_iter()
            .map(|r| {
                let date = chrono::DateTime::parse_from_rfc3339(&r.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(r.date);

                let op_target = if r.target.is_empty() {
                    r.operation.clone()
                } else {
                    truncate(&format!("{} ({})", r.operation, r.target), OP_WIDTH)
                };

                (r.id, date, r.operation, op_target, r.message)
            })
            .collect();

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.chars().count())
            .max()
            .unwrap_or(10);

        let mut out = String::from("📜 Internal log:\n\n");

        for (id, date, operation, op_target, message) in entries {
            let color = color_for_operation(&operation);

            // only the operation word is coloured
            let colored = match op_target.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(op_target.as_str()).to_string(),
            };

            let prefix = format!(
                "{:>id_w$}: {:<date_w$} | {} => ",
                id,
                date,
                pad_right(&colored, op_w),
                id_w = id_w,
                date_w = date_w
            );
            let indent = format!("\n{}", " ".repeat(visible_width(&prefix)));

            out.push_str(&prefix);
            out.push_str(&textwrap::wrap(&message, MESSAGE_WIDTH).join(indent.as_str()));
            out.push('\n');
        }

        Ok(out)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        print!("{}", Self::render_log(pool)?);
        Ok(())
    }
}
