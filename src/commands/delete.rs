use crate::error::Result;
use crate::output::{self, Format};
use crate::store::TaskStore;

pub fn run(store: &TaskStore, id: u64, format: Format) -> Result<()> {
    let removed = store.remove(id)?;
    match format {
        Format::Pretty => println!("Deleted task {}: '{}'", id, removed.description),
        _ => output::print_task(&removed, format)?,
    }
    Ok(())
}
