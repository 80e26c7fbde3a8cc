use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, TodoError};
use crate::model::{NewTask, Task};

/// Single-file task store. The whole collection is read and rewritten on every change.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every task in file order. A missing, unreadable or corrupt file reads as empty.
    pub fn read_all(&self) -> Vec<Task> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) => {
                debug!(
                    path = %self.path.display(),
                    error = %err,
                    "task file not readable, starting empty"
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&data) {
            Ok(tasks) => tasks,
            Err(err) => {
                debug!(
                    path = %self.path.display(),
                    error = %err,
                    "task file corrupt, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Replace the stored collection. Content goes to a staging file that is then
    /// renamed over the target, so a reader sees either the old or the new list.
    pub fn write_all(&self, tasks: &[Task]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tasks.json".to_string());
        let staging = parent.join(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

        if let Err(err) = write_pretty(&staging, tasks) {
            let _ = fs::remove_file(&staging);
            return Err(err);
        }
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        debug!(path = %self.path.display(), count = tasks.len(), "wrote tasks");
        Ok(())
    }

    /// Renumber ids to 1..=len in sequence order.
    pub fn reindex(tasks: &mut [Task]) -> &mut [Task] {
        for (i, task) in tasks.iter_mut().enumerate() {
            task.id = i as u64 + 1;
        }
        tasks
    }

    /// Next free id, one past the current maximum.
    pub fn next_id(tasks: &[Task]) -> u64 {
        tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    pub fn add(&self, mut new: NewTask) -> Result<Task> {
        new.normalize();
        if new.description.is_empty() {
            return Err(TodoError::EmptyDescription);
        }

        let mut tasks = self.read_all();
        let task = Task {
            id: Self::next_id(&tasks),
            description: new.description,
            done: false,
            advice: new.advice,
            importance: new.importance,
            urgency: new.urgency,
            project: new.project,
            tag: new.tag,
            created_at: Some(Utc::now()),
            completed_at: None,
        };
        tasks.push(task.clone());
        self.write_all(&tasks)?;
        Ok(task)
    }

    /// Mark one task done. Other tasks are left untouched.
    pub fn mark_done(&self, id: u64) -> Result<Task> {
        let mut tasks = self.read_all();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TodoError::TaskNotFound(id))?;

        if !task.done {
            task.done = true;
            task.completed_at = Some(Utc::now());
        }
        let updated = task.clone();
        self.write_all(&tasks)?;
        Ok(updated)
    }

    /// Remove a task and renumber the rest. Returns the removed task with its old id.
    pub fn remove(&self, id: u64) -> Result<Task> {
        let mut tasks = self.read_all();
        let pos = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TodoError::TaskNotFound(id))?;

        let removed = tasks.remove(pos);
        Self::reindex(&mut tasks);
        self.write_all(&tasks)?;
        Ok(removed)
    }
}

fn write_pretty(path: &Path, tasks: &[Task]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    tasks.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn new_task(description: &str) -> NewTask {
        NewTask {
            description: description.into(),
            ..NewTask::default()
        }
    }

    fn seeded(dir: &Path, descriptions: &[&str]) -> TaskStore {
        let store = TaskStore::new(dir.join("todo.json"));
        for d in descriptions {
            store.add(new_task(d)).unwrap();
        }
        store
    }

    fn ids(tasks: &[Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("absent.json"));
        assert!(store.read_all().is_empty());
    }

    #[test]
    fn corrupt_file_reads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todo.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(TaskStore::new(&path).read_all().is_empty());

        fs::write(&path, r#"{"id": 1, "description": "object, not array"}"#).unwrap();
        assert!(TaskStore::new(&path).read_all().is_empty());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A", "B", "C"]);
        store.mark_done(2).unwrap();

        let first = store.read_all();
        let before = fs::read_to_string(store.path()).unwrap();
        store.write_all(&first).unwrap();
        let after = fs::read_to_string(store.path()).unwrap();

        assert_eq!(store.read_all(), first);
        assert_eq!(before, after);
    }

    #[test]
    fn legacy_file_round_trips_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todo.json");
        let legacy = r#"[
    {
        "id": 1,
        "description": "Write report",
        "done": false,
        "advice": "Start with the outline.",
        "importance": 8,
        "urgency": 6,
        "project": "work",
        "tag": null
    }
]
"#;
        fs::write(&path, legacy).unwrap();
        let store = TaskStore::new(&path);
        store.write_all(&store.read_all()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), legacy);
    }

    #[test]
    fn loose_enrichment_fields_keep_existing_tasks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todo.json");
        let legacy = r#"[
    {"id": 1, "description": "Old A", "done": false, "advice": "Plan it.",
     "importance": 3, "urgency": 2, "project": null, "tag": null},
    {"id": 2, "description": "Old B", "done": true, "advice": null,
     "importance": 7.5, "urgency": "8", "project": "home", "tag": null}
]"#;
        fs::write(&path, legacy).unwrap();
        let store = TaskStore::new(&path);

        let tasks = store.read_all();
        assert_eq!(ids(&tasks), vec![1, 2]);
        assert_eq!(tasks[1].advice, "");
        assert_eq!(tasks[1].importance, 8);
        assert_eq!(tasks[1].urgency, 8);

        let added = store.add(new_task("New")).unwrap();
        assert_eq!(added.id, 3);
        let after = store.read_all();
        let kept: Vec<&str> = after.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(kept, vec!["Old A", "Old B", "New"]);
        assert!(after[1].done);
    }

    #[test]
    fn out_of_range_scores_clamp_on_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("todo.json");
        fs::write(
            &path,
            r#"[
    {"id": 1, "description": "Inflated", "importance": 200, "urgency": 99},
    {"id": 2, "description": "Real", "importance": 10, "urgency": 10}
]"#,
        )
        .unwrap();

        let tasks = TaskStore::new(&path).read_all();
        assert!(tasks.iter().all(|t| t.importance <= 10 && t.urgency <= 10));
        assert_eq!(tasks[0].score(), 30);
        assert_eq!(tasks[1].score(), 30);
    }

    #[test]
    fn write_uses_four_space_indent_and_leaves_no_staging_files() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A"]);

        let data = fs::read_to_string(store.path()).unwrap();
        assert!(data.starts_with("[\n    {\n        \"id\": 1,"));

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "only the task file should remain");
    }

    #[test]
    fn write_creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("nested").join("todo.json"));
        store.add(new_task("A")).unwrap();
        assert_eq!(store.read_all().len(), 1);
    }

    #[test]
    fn reindex_assigns_positions_in_place() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A", "B", "C", "D"]);
        let mut tasks = store.read_all();
        tasks.retain(|t| t.id % 2 == 0);

        let reindexed = TaskStore::reindex(&mut tasks);
        assert_eq!(ids(reindexed), vec![1, 2]);
        assert_eq!(tasks[0].description, "B");
        assert_eq!(tasks[1].description, "D");
    }

    #[test]
    fn next_id_is_one_past_maximum() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A", "B", "C"]);
        let mut tasks = store.read_all();
        assert_eq!(TaskStore::next_id(&tasks), 4);

        tasks.swap(0, 2);
        tasks.remove(1);
        assert_eq!(TaskStore::next_id(&tasks), 4);
        assert_eq!(TaskStore::next_id(&[]), 1);
    }

    #[test]
    fn add_assigns_sequential_ids_and_timestamp() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A", "B"]);
        let task = store.add(new_task("C")).unwrap();
        assert_eq!(task.id, 3);
        assert!(task.created_at.is_some());
        assert!(!task.done);
        assert_eq!(ids(&store.read_all()), vec![1, 2, 3]);
    }

    #[test]
    fn add_rejects_blank_description() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A"]);
        let before = fs::read_to_string(store.path()).unwrap();

        let err = store.add(new_task("   ")).unwrap_err();
        assert!(matches!(err, TodoError::EmptyDescription));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn add_after_external_reorder_does_not_duplicate_ids() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A", "B", "C"]);
        let mut tasks = store.read_all();
        tasks.remove(0);
        store.write_all(&tasks).unwrap();

        let task = store.add(new_task("D")).unwrap();
        assert_eq!(task.id, 4);
    }

    #[test]
    fn mark_done_flags_only_the_target() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A", "B", "C"]);
        let before = store.read_all();

        let done = store.mark_done(2).unwrap();
        assert!(done.done);
        assert!(done.completed_at.is_some());

        let after = store.read_all();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert!(after[1].done);
    }

    #[test]
    fn mark_done_twice_keeps_first_completion_time() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A"]);
        let first = store.mark_done(1).unwrap();
        let second = store.mark_done(1).unwrap();
        assert_eq!(first.completed_at, second.completed_at);
    }

    #[test]
    fn mark_done_unknown_id_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A", "B"]);
        let before = fs::read_to_string(store.path()).unwrap();

        let err = store.mark_done(9).unwrap_err();
        assert!(matches!(err, TodoError::TaskNotFound(9)));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn remove_middle_task_renumbers_the_rest() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A", "B", "C"]);

        let removed = store.remove(2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(removed.description, "B");

        let tasks = store.read_all();
        assert_eq!(ids(&tasks), vec![1, 2]);
        assert_eq!(tasks[0].description, "A");
        assert_eq!(tasks[1].description, "C");
    }

    #[test]
    fn remove_unknown_id_is_not_found() {
        let dir = tempdir().unwrap();
        let store = seeded(dir.path(), &["A"]);
        let err = store.remove(2).unwrap_err();
        assert!(matches!(err, TodoError::TaskNotFound(2)));
        assert_eq!(store.read_all().len(), 1);
    }

    #[test]
    fn ids_stay_dense_across_add_and_remove_sequences() {
        let dir = tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("todo.json"));

        // Deterministic mix of adds and removals at the front, middle and back.
        let script: &[(bool, u64)] = &[
            (true, 0),
            (true, 0),
            (true, 0),
            (true, 0),
            (false, 2),
            (true, 0),
            (false, 1),
            (false, 3),
            (true, 0),
            (true, 0),
            (false, 4),
            (false, 1),
            (true, 0),
            (false, 2),
            (false, 1),
        ];
        for (n, &(is_add, id)) in script.iter().enumerate() {
            if is_add {
                store.add(new_task(&format!("task {n}"))).unwrap();
            } else {
                store.remove(id).unwrap();
            }
            let tasks = store.read_all();
            let expected: Vec<u64> = (1..=tasks.len() as u64).collect();
            assert_eq!(ids(&tasks), expected, "after step {n}");
        }
    }
}
