use crate::error::AppError;
use crate::model::Task;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.json";
const STORE_PATH_ENV_VAR: &str = "TASK_CLI_STORE_PATH";

/// Resolve the backing file. `TASK_CLI_STORE_PATH` overrides the default
/// `tasks.json` in the invocation directory.
pub fn store_path() -> PathBuf {
    if let Ok(path) = std::env::var(STORE_PATH_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    PathBuf::from(STORE_FILE_NAME)
}

/// Load the task list. A missing, empty, or unparsable file yields an empty
/// list; corruption is treated as "no prior data" rather than surfaced.
pub fn load_tasks(path: &Path) -> Vec<Task> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    serde_json::from_str(&content).unwrap_or_default()
}

/// Persist the full task list, replacing the file contents. Writes go to a
/// sibling temp file first and are renamed into place, so a crash mid-write
/// leaves the previous file intact.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content =
        serde_json::to_string_pretty(tasks).map_err(|err| AppError::io(err.to_string()))?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, content).map_err(|err| AppError::io(err.to_string()))?;
    std::fs::rename(&tmp_path, path).map_err(|err| AppError::io(err.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_tasks, save_tasks};
    use crate::model::{Task, TaskStatus};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("task-cli-{nanos}-{file_name}"))
    }

    fn sample_task(id: u64) -> Task {
        Task {
            id,
            description: format!("task {id}"),
            status: TaskStatus::Todo,
            created_at: "2025-10-16T21:45:27".to_string(),
            updated_at: "2025-10-16T21:45:27".to_string(),
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = temp_path("tasks.json");
        let tasks = vec![sample_task(1), sample_task(2)];

        save_tasks(&path, &tasks).unwrap();
        let loaded = load_tasks(&path);
        fs::remove_file(&path).ok();

        assert_eq!(loaded, tasks);
    }

    #[test]
    fn missing_file_loads_empty() {
        let path = temp_path("missing.json");
        assert!(load_tasks(&path).is_empty());
    }

    #[test]
    fn empty_file_loads_empty() {
        let path = temp_path("empty.json");
        fs::write(&path, "").unwrap();

        let loaded = load_tasks(&path);
        fs::remove_file(&path).ok();

        assert!(loaded.is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let path = temp_path("malformed.json");
        fs::write(&path, "{ not json ]").unwrap();

        let loaded = load_tasks(&path);
        fs::remove_file(&path).ok();

        assert!(loaded.is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let path = temp_path("wrong-shape.json");
        fs::write(&path, "{\"tasks\": []}").unwrap();

        let loaded = load_tasks(&path);
        fs::remove_file(&path).ok();

        assert!(loaded.is_empty());
    }

    #[test]
    fn loads_contract_field_names() {
        let path = temp_path("contract.json");
        let content = "[\n  {\n    \"id\": 7,\n    \"description\": \"demo\",\n    \"status\": \"in-progress\",\n    \"createdAt\": \"2025-10-16T21:45:27\",\n    \"updatedAt\": \"2025-10-16T21:50:00\"\n  }\n]";
        fs::write(&path, content).unwrap();

        let loaded = load_tasks(&path);
        fs::remove_file(&path).ok();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 7);
        assert_eq!(loaded[0].status, TaskStatus::InProgress);
        assert_eq!(loaded[0].created_at, "2025-10-16T21:45:27");
        assert_eq!(loaded[0].updated_at, "2025-10-16T21:50:00");
    }

    #[test]
    fn saves_contract_field_names() {
        let path = temp_path("contract-out.json");
        save_tasks(&path, &[sample_task(1)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(content.contains("\"createdAt\""));
        assert!(content.contains("\"updatedAt\""));
        assert!(content.contains("\"todo\""));
        assert!(!content.contains("created_at"));
    }

    #[test]
    fn save_overwrites_existing_file() {
        let path = temp_path("overwrite.json");
        save_tasks(&path, &[sample_task(1), sample_task(2)]).unwrap();
        save_tasks(&path, &[sample_task(3)]).unwrap();

        let loaded = load_tasks(&path);
        fs::remove_file(&path).ok();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 3);
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let path = temp_path("no-temp.json");
        save_tasks(&path, &[sample_task(1)]).unwrap();

        let tmp_path = path.with_extension("json.tmp");
        let tmp_exists = tmp_path.exists();
        fs::remove_file(&path).ok();

        assert!(!tmp_exists);
    }
}
