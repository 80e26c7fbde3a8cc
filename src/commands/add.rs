use colored::Colorize;
use tracing::debug;

use crate::ai::Advisor;
use crate::error::{Result, TodoError};
use crate::model::{NewTask, Task};
use crate::output::{self, Format};
use crate::store::TaskStore;

/// Create a task, pre-filling advice and scores from the advisor when it has any.
pub fn add_task(
    store: &TaskStore,
    advisor: &dyn Advisor,
    description: String,
    project: Option<String>,
    tag: Option<String>,
) -> Result<Task> {
    let mut new = NewTask {
        description,
        project,
        tag,
        ..NewTask::default()
    };
    new.normalize();
    if new.description.is_empty() {
        return Err(TodoError::EmptyDescription);
    }

    let analysis = advisor
        .analyze(&new.description, new.project.as_deref(), new.tag.as_deref())
        .unwrap_or_default();
    debug!(
        importance = analysis.importance,
        urgency = analysis.urgency,
        "analysis applied"
    );
    new.advice = analysis.advice;
    new.importance = analysis.importance;
    new.urgency = analysis.urgency;

    store.add(new)
}

pub fn run(
    store: &TaskStore,
    advisor: &dyn Advisor,
    description: String,
    project: Option<String>,
    tag: Option<String>,
    format: Format,
) -> Result<()> {
    let task = add_task(store, advisor, description, project, tag)?;
    match format {
        Format::Pretty => {
            println!("Added task {}: '{}'", task.id, task.description.green().bold());
            if !task.advice.is_empty() {
                println!("{} {}", "Advice:".yellow().bold(), task.advice);
            }
        }
        _ => output::print_task(&task, format)?,
    }
    Ok(())
}
