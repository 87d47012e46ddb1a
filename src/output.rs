use clap::ValueEnum;
use colored::{ColoredString, Colorize};

use crate::activity::{ActivityAction, ActivityEntry};
use crate::auth::Session;
use crate::error::Result;
use crate::model::{Column, Priority, Task};
use crate::task_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

fn style_priority(priority: Priority) -> ColoredString {
    let label = priority.to_string();
    match priority {
        Priority::High => label.red().bold(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.green(),
    }
}

fn style_action(action: ActivityAction) -> ColoredString {
    let label = action.to_string();
    match action {
        ActivityAction::Created => label.green(),
        ActivityAction::Edited => label.cyan(),
        ActivityAction::Moved => label.blue(),
        ActivityAction::Deleted | ActivityAction::Reset => label.red(),
    }
}

pub fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() > max_len {
        let truncated: String = title.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        title.to_string()
    }
}

fn due_label(task: &Task) -> String {
    task.due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn minimal_row(task: &Task) -> String {
    format!(
        "{:8} {:20} {:6} {:6} {}",
        task_id::short(&task.id),
        truncate_title(&task.title, 20),
        task.column,
        task.priority,
        due_label(task)
    )
}

fn minimal_header() {
    println!(
        "{:8} {:20} {:6} {:6} DUE",
        "ID", "TITLE", "COLUMN", "PRIO"
    );
    println!("{}", "-".repeat(52));
}

pub fn print_task(task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(task)?),
        Format::Pretty => {
            println!(
                "[{}] {} ({})",
                task_id::short(&task.id).bold(),
                task.title,
                task.column
            );
            if !task.description.is_empty() {
                println!("  {}", task.description);
            }
            println!(
                "  priority: {} | due: {}",
                style_priority(task.priority),
                due_label(task)
            );
            if !task.tags.is_empty() {
                println!("  tags: {}", task.tags.join(", "));
            }
            println!(
                "  created: {}",
                task.created_at.format("%Y-%m-%d %H:%M")
            );
        }
        Format::Minimal => println!("{}", minimal_row(task)),
    }
    Ok(())
}

pub fn print_tasks(tasks: &[&Task], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(tasks)?),
        Format::Pretty => {
            for task in tasks {
                print_task(task, Format::Pretty)?;
                println!();
            }
        }
        Format::Minimal => {
            minimal_header();
            for task in tasks {
                println!("{}", minimal_row(task));
            }
        }
    }
    Ok(())
}

/// Print every column in board order.
pub fn print_board(columns: &[(Column, Vec<&Task>)], format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let mut board = serde_json::Map::new();
            for (column, tasks) in columns {
                board.insert(column.to_string(), serde_json::to_value(tasks)?);
            }
            println!("{}", serde_json::Value::Object(board));
        }
        Format::Pretty => {
            for (column, tasks) in columns {
                println!(
                    "{} {}",
                    format!("== {column}").bold(),
                    format!("({})", tasks.len()).dimmed()
                );
                if tasks.is_empty() {
                    println!("  {}", "No tasks".dimmed());
                }
                for task in tasks {
                    println!(
                        "  [{}] {} {} {}",
                        task_id::short(&task.id),
                        task.title,
                        style_priority(task.priority),
                        due_label(task).dimmed()
                    );
                }
                println!();
            }
        }
        Format::Minimal => {
            minimal_header();
            for (_, tasks) in columns {
                for task in tasks {
                    println!("{}", minimal_row(task));
                }
            }
        }
    }
    Ok(())
}

pub fn print_activity<'a, I>(entries: I, format: Format) -> Result<()>
where
    I: IntoIterator<Item = &'a ActivityEntry>,
{
    let entries: Vec<&ActivityEntry> = entries.into_iter().collect();
    match format {
        Format::Json => println!("{}", serde_json::to_string(&entries)?),
        Format::Pretty | Format::Minimal => {
            if entries.is_empty() && format == Format::Pretty {
                println!("{}", "No activity yet".dimmed());
            }
            for entry in entries {
                let details = if entry.details.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", entry.details)
                };
                println!(
                    "{}  {:8} {}{}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    style_action(entry.action),
                    entry.task_title,
                    details
                );
            }
        }
    }
    Ok(())
}

pub fn print_session(session: Option<&Session>, remembered: bool, format: Format) -> Result<()> {
    match format {
        Format::Json => println!(
            "{}",
            serde_json::json!({
                "authenticated": session.is_some(),
                "email": session.map(|s| s.email.as_str()),
                "remembered": remembered,
            })
        ),
        _ => match session {
            Some(s) if remembered => println!("logged in as {} (remembered)", s.email),
            Some(s) => println!("logged in as {}", s.email),
            None => println!("not logged in"),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_title_respects_char_boundaries() {
        assert_eq!(truncate_title("short", 20), "short");
        assert_eq!(truncate_title("ééééééééééé", 8), "ééééé...");
    }
}
