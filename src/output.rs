use clap::ValueEnum;
use colored::{ColoredString, Colorize};

use crate::error::Result;
use crate::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

const DESCRIPTION_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 12;

pub fn print_task(task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(task)?),
        Format::Pretty => {
            println!(
                "[{}] {} {}",
                task.id,
                task.description.bold(),
                status_mark(task.done)
            );
            if let Some(ref project) = task.project {
                println!("  project: {}", project.green());
            }
            if let Some(ref tag) = task.tag {
                println!("  tag: {}", tag.blue());
            }
            println!(
                "  importance: {} | urgency: {}",
                score_cell(task.importance, 0),
                score_cell(task.urgency, 0)
            );
        }
        Format::Minimal => println!("{}", minimal_row(task)),
    }
    Ok(())
}

pub fn print_tasks(tasks: &[Task], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(tasks)?),
        Format::Pretty => {
            println!("{}", "To-do List".magenta().bold());
            println!(
                "{:6} {:>4}  {:w$}  {:w$}  {:dw$}  {:>3}  {:>3}",
                "STATUS",
                "ID",
                "PROJECT",
                "TAG",
                "DESCRIPTION",
                "IMP",
                "URG",
                w = LABEL_WIDTH,
                dw = DESCRIPTION_WIDTH,
            );
            println!("{}", "-".repeat(6 + 4 + LABEL_WIDTH * 2 + DESCRIPTION_WIDTH + 3 * 2 + 12));
            for task in tasks {
                println!(
                    "{} {:>4}  {}  {}  {}  {}  {}",
                    status_mark(task.done),
                    task.id,
                    pad(task.project.as_deref().unwrap_or(""), LABEL_WIDTH).green(),
                    pad(task.tag.as_deref().unwrap_or(""), LABEL_WIDTH).blue(),
                    pad(&task.description, DESCRIPTION_WIDTH).cyan(),
                    score_cell(task.importance, 3),
                    score_cell(task.urgency, 3),
                );
            }
        }
        Format::Minimal => {
            for task in tasks {
                println!("{}", minimal_row(task));
            }
        }
    }
    Ok(())
}

fn minimal_row(task: &Task) -> String {
    format!(
        "{:>4} {} {:>2}/{:<2} {}",
        task.id,
        if task.done { "x" } else { "-" },
        task.urgency,
        task.importance,
        truncate(&task.description, DESCRIPTION_WIDTH)
    )
}

fn status_mark(done: bool) -> ColoredString {
    if done {
        format!("{:6}", "done").green()
    } else {
        format!("{:6}", "todo").red()
    }
}

/// Colour a score by band; unrated shows as "-".
fn score_cell(score: u8, width: usize) -> ColoredString {
    if score == 0 {
        return format!("{:>width$}", "-").normal();
    }
    let text = format!("{score:>width$}");
    match score_band(score) {
        ScoreBand::High => text.red().bold(),
        ScoreBand::Medium => text.yellow().bold(),
        ScoreBand::Low => text.green().bold(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreBand {
    High,
    Medium,
    Low,
}

fn score_band(score: u8) -> ScoreBand {
    match score {
        8.. => ScoreBand::High,
        4..=7 => ScoreBand::Medium,
        _ => ScoreBand::Low,
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{:width$}", truncate(text, width))
}

pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
