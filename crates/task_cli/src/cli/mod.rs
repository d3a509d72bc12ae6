use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: task_cli add "Buy groceries"
    Add {
        description: Option<String>,
    },
    /// List tasks, optionally filtered by status
    ///
    /// Example: task_cli list
    /// Example: task_cli list done
    List {
        status: Option<String>,
    },
    /// Update a task's description
    ///
    /// Example: task_cli update 1 "Buy groceries and cook dinner"
    Update {
        id: u64,
        new_description: String,
    },
    /// Delete a task
    ///
    /// Example: task_cli delete 1
    Delete {
        id: u64,
    },
    /// Mark a task as in-progress
    ///
    /// Example: task_cli mark-in-progress 1
    MarkInProgress {
        id: u64,
    },
    /// Mark a task as done
    ///
    /// Example: task_cli mark-done 1
    MarkDone {
        id: u64,
    },
}
