use colored::Colorize;
use serde_json::json;

use crate::ai::Advisor;
use crate::error::Result;
use crate::output::Format;
use crate::priority;
use crate::store::TaskStore;

pub fn run(store: &TaskStore, advisor: &dyn Advisor, format: Format) -> Result<()> {
    let tasks = store.read_all();
    let Some(task) = priority::select_next(&tasks) else {
        match format {
            Format::Json => println!("null"),
            Format::Pretty => println!("Nothing pending. Time for a break!"),
            Format::Minimal => {}
        }
        return Ok(());
    };

    let encouragement = advisor.encourage(task).into_option();

    match format {
        Format::Json => println!("{}", json!({ "task": task, "encouragement": encouragement })),
        Format::Minimal => println!("{}\t{}", task.id, task.description),
        Format::Pretty => {
            println!("{} [{}] {}", "Next up:".bold(), task.id, task.description);
            if let Some(text) = encouragement {
                println!("\n{} {}", "Coach:".magenta().bold(), text);
            }
        }
    }
    Ok(())
}
