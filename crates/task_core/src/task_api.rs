use crate::error::AppError;
use crate::model::{Task, TaskStatus};
use crate::storage::json_store;
use std::path::Path;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

pub fn add_task(description: &str) -> Result<Task, AppError> {
    add_task_with_path(&json_store::store_path(), description)
}

pub fn list_tasks(status_filter: Option<&str>) -> Result<Vec<Task>, AppError> {
    list_tasks_with_path(&json_store::store_path(), status_filter)
}

pub fn update_task(id: u64, new_description: &str) -> Result<Task, AppError> {
    update_task_with_path(&json_store::store_path(), id, new_description)
}

pub fn delete_task(id: u64) -> Result<Task, AppError> {
    delete_task_with_path(&json_store::store_path(), id)
}

pub fn set_status(id: u64, new_status: TaskStatus) -> Result<Task, AppError> {
    set_status_with_path(&json_store::store_path(), id, new_status)
}

fn add_task_with_path(path: &Path, description: &str) -> Result<Task, AppError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("description is required"));
    }

    let mut tasks = json_store::load_tasks(path);
    let now = now_timestamp()?;

    let task = Task {
        id: next_id(&tasks),
        description: trimmed.to_string(),
        status: TaskStatus::Todo,
        created_at: now.clone(),
        updated_at: now,
    };

    tasks.push(task.clone());
    json_store::save_tasks(path, &tasks)?;

    Ok(task)
}

fn list_tasks_with_path(path: &Path, status_filter: Option<&str>) -> Result<Vec<Task>, AppError> {
    let tasks = json_store::load_tasks(path);

    match status_filter {
        None => Ok(tasks),
        Some(raw) => {
            let status = TaskStatus::parse(raw)?;
            Ok(tasks
                .into_iter()
                .filter(|task| task.status == status)
                .collect())
        }
    }
}

fn update_task_with_path(path: &Path, id: u64, new_description: &str) -> Result<Task, AppError> {
    let trimmed = new_description.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("description is required"));
    }

    let mut tasks = json_store::load_tasks(path);
    let mut updated_task = None;

    for task in &mut tasks {
        if task.id == id {
            task.description = trimmed.to_string();
            task.updated_at = now_timestamp()?;
            updated_task = Some(task.clone());
            break;
        }
    }

    let updated = updated_task.ok_or_else(|| task_not_found(id))?;
    json_store::save_tasks(path, &tasks)?;

    Ok(updated)
}

fn delete_task_with_path(path: &Path, id: u64) -> Result<Task, AppError> {
    let mut tasks = json_store::load_tasks(path);
    let index = tasks
        .iter()
        .position(|task| task.id == id)
        .ok_or_else(|| task_not_found(id))?;

    // Remaining ids are never renumbered.
    let removed = tasks.remove(index);
    json_store::save_tasks(path, &tasks)?;

    Ok(removed)
}

fn set_status_with_path(path: &Path, id: u64, new_status: TaskStatus) -> Result<Task, AppError> {
    let mut tasks = json_store::load_tasks(path);
    let mut updated_task = None;

    for task in &mut tasks {
        if task.id == id {
            task.status = new_status;
            task.updated_at = now_timestamp()?;
            updated_task = Some(task.clone());
            break;
        }
    }

    let updated = updated_task.ok_or_else(|| task_not_found(id))?;
    json_store::save_tasks(path, &tasks)?;

    Ok(updated)
}

/// Ids grow monotonically from the current maximum; deleting a task below
/// the maximum never frees its id.
fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1
}

fn task_not_found(id: u64) -> AppError {
    AppError::not_found(format!("task {id} not found"))
}

/// Current local time as an ISO-8601 string without offset, matching the
/// on-disk timestamp format (e.g. `2025-10-16T21:45:27`).
fn now_timestamp() -> Result<String, AppError> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    OffsetDateTime::now_utc()
        .to_offset(offset)
        .format(&format)
        .map_err(|err| AppError::io(err.to_string()))
}
