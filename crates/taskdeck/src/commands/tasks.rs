//! Task command handlers.

use chrono::SecondsFormat;
use tabled::Tabled;
use taskdeck_core::search::search_default;
use taskdeck_core::{DataLayer, FilterMode, Task, TaskCounts, TaskId};
use tracing::debug;

use crate::cli::{OutputFormat, TasksArgs, TasksCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Task> for TaskRow {
    fn from(t: &Task) -> Self {
        Self {
            id: t.id.to_string(),
            done: if t.completed { "x" } else { "" },
            text: t.text.clone(),
            created: t.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn detail(t: &Task) -> String {
    [
        format!("ID:       {}", t.id),
        format!("Task:     {}", t.text),
        format!(
            "Status:   {}",
            if t.completed { "completed" } else { "active" }
        ),
        format!(
            "Created:  {}",
            t.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
    ]
    .join("\n")
}

fn counts_detail(c: &TaskCounts) -> String {
    [
        format!("Total:      {}", c.total),
        format!("Active:     {}", c.active),
        format!("Completed:  {}", c.completed),
    ]
    .join("\n")
}

fn not_found(id: u64) -> CliError {
    CliError::NotFound {
        resource_type: "task".into(),
        identifier: id.to_string(),
        list_command: "tasks list".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(layer: &mut DataLayer, args: TasksArgs, settings: &Settings) -> Result<(), CliError> {
    let fmt = settings.output;
    match args.command {
        TasksCommand::Add { text } => {
            let text = text.join(" ");
            let Some(task) = layer.add(&text)? else {
                debug!("blank task text, nothing added");
                return Ok(());
            };
            output::print_note(
                &output::status_line("Task added", settings.color),
                settings.quiet,
            );
            let out = output::render_single(fmt, &task, detail, |t| t.id.to_string())?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        TasksCommand::Toggle { id } => {
            let task = layer.toggle(TaskId(id))?.ok_or_else(|| not_found(id))?;
            let note = if task.completed {
                "Task completed"
            } else {
                "Task reopened"
            };
            output::print_note(&output::status_line(note, settings.color), settings.quiet);
            let out = output::render_single(fmt, &task, detail, |t| t.id.to_string())?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        TasksCommand::Remove { id } => {
            let task = layer.remove(TaskId(id))?.ok_or_else(|| not_found(id))?;
            output::print_note(
                &output::status_line(&format!("Removed '{}'", task.text), settings.color),
                settings.quiet,
            );
            Ok(())
        }

        TasksCommand::List { filter, search } => {
            let mode = FilterMode::from(filter);
            layer.set_filter(mode);
            let visible = layer.visible_tasks();
            let matched: Vec<Task> = match search.as_deref() {
                Some(term) => search_default(&visible, term).into_iter().cloned().collect(),
                None => visible,
            };

            let out = output::render_list(
                fmt,
                &matched,
                |t| TaskRow::from(t),
                |t| t.id.to_string(),
            )?;
            output::print_output(&out, settings.quiet);

            if fmt == OutputFormat::Table {
                let counts = layer.counts();
                let note = format!(
                    "{} of {} {mode} task(s) shown; {} active, {} completed",
                    matched.len(),
                    mode.count_in(counts),
                    counts.active,
                    counts.completed
                );
                output::print_note(&output::hint_line(&note, settings.color), settings.quiet);
            }
            Ok(())
        }

        TasksCommand::Stats => {
            let counts = layer.counts();
            let out = output::render_single(fmt, &counts, counts_detail, |c| c.total.to_string())?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }
    }
}
