use clap::Parser;
use clap::error::ErrorKind;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use task_cli::cli::{Cli, Command};
use task_core::error::AppError;
use task_core::model::{Task, TaskStatus};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "STATUS")]
    status: &'static str,
    #[tabled(rename = "UPDATED")]
    updated: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

fn print_tasks_plain(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| TaskRow {
            id: task.id,
            status: task.status.as_str(),
            updated: task.updated_at.clone(),
            description: task.description.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
}

fn print_tasks_json(tasks: &[Task]) {
    let mut payload = Vec::with_capacity(tasks.len());
    for task in tasks {
        payload.push(task_json(task));
    }
    println!("{}", serde_json::Value::Array(payload));
}

fn print_task_json(task: &Task) {
    println!("{}", task_json(task));
}

fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "id": task.id,
        "description": task.description,
        "status": task.status,
        "createdAt": task.created_at,
        "updatedAt": task.updated_at,
    })
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::validation(message)
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Add { description } => {
            let description = match description {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::validation("description is required")),
            };

            let task = task_core::task_api::add_task(&description)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Task added successfully (ID: {})", task.id);
            }
        }
        Command::List { status } => {
            let tasks = task_core::task_api::list_tasks(status.as_deref())?;
            if cli.json {
                print_tasks_json(&tasks);
            } else {
                print_tasks_plain(&tasks);
            }
        }
        Command::Update {
            id,
            new_description,
        } => {
            let task = task_core::task_api::update_task(id, &new_description)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Task {} updated successfully.", task.id);
            }
        }
        Command::Delete { id } => {
            let task = task_core::task_api::delete_task(id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Task {} deleted successfully.", task.id);
            }
        }
        Command::MarkInProgress { id } => {
            let task = task_core::task_api::set_status(id, TaskStatus::InProgress)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Task {} marked as in-progress.", task.id);
            }
        }
        Command::MarkDone { id } => {
            let task = task_core::task_api::set_status(id, TaskStatus::Done)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Task {} marked as done.", task.id);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
