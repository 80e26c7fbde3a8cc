use colored::Colorize;
use serde_json::json;

use crate::ai::Advisor;
use crate::error::Result;
use crate::model::Task;
use crate::output::{self, Format};
use crate::priority;
use crate::store::TaskStore;

/// Tasks matching every given label, in store order or by priority.
pub fn filter_tasks(
    tasks: Vec<Task>,
    project: Option<&str>,
    tag: Option<&str>,
    by_priority: bool,
) -> Vec<Task> {
    let matching: Vec<Task> = tasks.into_iter().filter(|t| t.matches(project, tag)).collect();
    if !by_priority {
        return matching;
    }
    let mut ranked: Vec<Task> = priority::rank_pending(&matching).into_iter().cloned().collect();
    ranked.extend(matching.into_iter().filter(|t| t.done));
    ranked
}

pub fn run(
    store: &TaskStore,
    advisor: &dyn Advisor,
    project: Option<String>,
    tag: Option<String>,
    ai: bool,
    by_priority: bool,
    format: Format,
) -> Result<()> {
    let tasks = filter_tasks(store.read_all(), project.as_deref(), tag.as_deref(), by_priority);

    if !ai {
        if tasks.is_empty() && format == Format::Pretty {
            println!("No matching tasks found.");
            return Ok(());
        }
        return output::print_tasks(&tasks, format);
    }

    let pending: Vec<Task> = tasks.iter().filter(|t| t.is_pending()).cloned().collect();
    let summary = if pending.is_empty() {
        None
    } else {
        advisor.summarize(&pending).into_option()
    };

    match format {
        Format::Json => {
            println!("{}", json!({ "tasks": tasks, "summary": summary }));
        }
        _ => {
            if tasks.is_empty() {
                println!("No matching tasks found.");
                return Ok(());
            }
            output::print_tasks(&tasks, format)?;
            println!();
            if pending.is_empty() {
                println!("Every task here is done. Keep it up!");
            } else if let Some(summary) = summary {
                println!("{}\n{}", "Overview:".bold(), summary);
            }
        }
    }
    Ok(())
}
