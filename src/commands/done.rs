use colored::Colorize;

use crate::error::Result;
use crate::output::{self, Format};
use crate::store::TaskStore;

pub fn run(store: &TaskStore, id: u64, format: Format) -> Result<()> {
    let task = store.mark_done(id)?;
    match format {
        Format::Pretty => {
            let message = format!("Task {id} marked as done. Nice work!");
            println!("{}", message.blue().bold());
        }
        _ => output::print_task(&task, format)?,
    }
    Ok(())
}
