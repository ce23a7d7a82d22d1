//! kb task command implementations.

use std::path::PathBuf;
use std::str::FromStr;

use crate::board::Board;
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::filter::{self, Criteria};
use crate::identity::{self, User};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::{Partition, Store};
use crate::task::{Status, Task, TaskDraft};

/// Options for `kb task add`
pub struct AddOptions {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub tags: Vec<String>,
    pub assignees: Vec<String>,
    pub due: Option<String>,
    pub priority: Option<String>,
    pub issue_type: Option<String>,
    pub comments: Option<u32>,
    pub attachments: Option<u32>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb task list`
pub struct ListOptions {
    pub status: Option<String>,
    pub tags: Vec<String>,
    pub assignees: Vec<String>,
    pub hide_done: bool,
    pub search: Option<String>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb task edit`
pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub tags: Vec<String>,
    pub clear_tags: bool,
    pub assignees: Vec<String>,
    pub clear_assignees: bool,
    pub due: Option<String>,
    pub clear_due: bool,
    pub priority: Option<String>,
    pub issue_type: Option<String>,
    pub comments: Option<u32>,
    pub attachments: Option<u32>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb task move`
pub struct MoveOptions {
    pub id: String,
    pub status: String,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb task rm`
pub struct RmOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb task clear`
pub struct ClearOptions {
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `kb task tags` and `kb task assignees`
pub struct LabelOptions {
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct TaskListOutput {
    total: usize,
    matched: usize,
    tasks: Vec<Task>,
}

#[derive(serde::Serialize)]
struct TaskRemoveReport {
    removed: uuid::Uuid,
    title: String,
}

#[derive(serde::Serialize)]
struct BoardClearReport {
    removed: usize,
}

#[derive(serde::Serialize)]
struct TagsReport {
    total: usize,
    tags: Vec<String>,
}

#[derive(serde::Serialize)]
struct AssigneesReport {
    total: usize,
    assignees: Vec<String>,
}

pub(crate) struct BoardContext {
    pub(crate) board: Board,
    pub(crate) user: Option<User>,
    pub(crate) config: Config,
}

/// Open the store, resolve the active session, and load the board for
/// the matching partition.
pub(crate) fn load_context(dir: Option<PathBuf>) -> Result<BoardContext> {
    let config = Config::load_default();
    let store = Store::open(config::resolve_store_dir(dir, &config))?;
    let user = identity::current_user(&store);
    let partition = Partition::for_user(user.as_ref().map(|user| user.id));
    let board = Board::open(store, partition);
    Ok(BoardContext {
        board,
        user,
        config,
    })
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;

    let status = match options.status.as_deref() {
        Some(raw) => raw.parse()?,
        None => ctx.config.board.initial_status(),
    };
    let draft = TaskDraft {
        title: options.title,
        description: options.description.unwrap_or_default(),
        status,
        due_date: options.due,
        tags: some_when_present(options.tags),
        assignees: some_when_present(options.assignees),
        comments: options.comments,
        attachments: options.attachments,
        priority: parse_optional(options.priority.as_deref())?,
        issue_type: parse_optional(options.issue_type.as_deref())?,
    };
    let task = ctx.board.create(draft)?;

    let mut human = HumanOutput::new(format!("Created task: {}", task.title));
    human.push_summary("Id", task.id.to_string());
    human.push_summary("Column", task.status.label());
    if !task.tag_list().is_empty() {
        human.push_summary("Tags", task.tag_list().join(", "));
    }
    if !task.assignee_list().is_empty() {
        human.push_summary("Assignees", task.assignee_list().join(", "));
    }
    if let Some(due) = task.due_date.as_deref() {
        human.push_summary("Due", due);
    }
    human.push_next_step("kb task list");

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task add",
        &task,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;

    let criteria = Criteria {
        tags: options.tags,
        assignees: options.assignees,
        show_completed: !options.hide_done,
    };
    let query = options.search.unwrap_or_default();
    let mut view = filter::apply(ctx.board.tasks(), &criteria, &query);
    if let Some(raw) = options.status.as_deref() {
        let status: Status = raw.parse()?;
        view = filter::column(&view, status);
    }

    let output = TaskListOutput {
        total: ctx.board.tasks().len(),
        matched: view.len(),
        tasks: view.into_iter().cloned().collect(),
    };

    let mut human = HumanOutput::new("Tasks");
    match ctx.user.as_ref() {
        Some(user) => human.push_summary("Account", user.name.clone()),
        None => human.push_summary("Account", "anonymous"),
    }
    human.push_summary("Total", output.total.to_string());
    if criteria.is_active() || !query.is_empty() || options.status.is_some() {
        human.push_summary("Matched", output.matched.to_string());
    }
    for task in &output.tasks {
        human.push_detail(format_row(task));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task list",
        &output,
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;
    let id = ctx.board.resolve_id(&options.id)?;
    let mut task = ctx
        .board
        .get(id)
        .cloned()
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    if let Some(title) = options.title {
        task.title = title;
    }
    if let Some(description) = options.description {
        task.description = description;
    }
    if let Some(raw) = options.status.as_deref() {
        task.status = raw.parse()?;
    }
    if options.clear_tags {
        task.tags = None;
    } else if !options.tags.is_empty() {
        task.tags = Some(options.tags);
    }
    if options.clear_assignees {
        task.assignees = None;
    } else if !options.assignees.is_empty() {
        task.assignees = Some(options.assignees);
    }
    if options.clear_due {
        task.due_date = None;
    } else if let Some(due) = options.due {
        task.due_date = Some(due);
    }
    if let Some(raw) = options.priority.as_deref() {
        task.priority = Some(raw.parse()?);
    }
    if let Some(raw) = options.issue_type.as_deref() {
        task.issue_type = Some(raw.parse()?);
    }
    if let Some(comments) = options.comments {
        task.comments = Some(comments);
    }
    if let Some(attachments) = options.attachments {
        task.attachments = Some(attachments);
    }

    let task = ctx.board.update(task)?;

    let mut human = HumanOutput::new(format!("Updated task: {}", task.title));
    human.push_summary("Id", task.id.to_string());
    human.push_summary("Column", task.status.label());
    human.push_next_step(format!("kb task list --search \"{}\"", task.title));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task edit",
        &task,
        Some(&human),
    )
}

pub fn run_move(options: MoveOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;
    let id = ctx.board.resolve_id(&options.id)?;
    let status: Status = options.status.parse()?;
    let task = ctx.board.move_to(id, status)?;

    let mut human = HumanOutput::new(format!("Moved task to {}", status.label()));
    human.push_summary("Id", task.id.to_string());
    human.push_summary("Task", task.title.clone());
    human.push_summary("Column", status.label());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task move",
        &task,
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;
    let id = ctx.board.resolve_id(&options.id)?;
    let removed = ctx.board.delete(id)?;

    let report = TaskRemoveReport {
        removed: removed.id,
        title: removed.title.clone(),
    };

    let mut human = HumanOutput::new(format!("Removed task: {}", removed.title));
    human.push_summary("Id", removed.id.to_string());
    human.push_summary("Remaining", ctx.board.tasks().len().to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task rm",
        &report,
        Some(&human),
    )
}

pub fn run_clear(options: ClearOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;
    let removed = ctx.board.clear_all()?;

    let report = BoardClearReport { removed };

    let mut human = HumanOutput::new("Board cleared");
    human.push_summary("Removed", removed.to_string());
    human.push_next_step("kb task add <title>");

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task clear",
        &report,
        Some(&human),
    )
}

pub fn run_tags(options: LabelOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let tags: Vec<String> = ctx.board.available_tags().into_iter().collect();

    let report = TagsReport {
        total: tags.len(),
        tags: tags.clone(),
    };

    let mut human = HumanOutput::new("Tags");
    human.push_summary("Total", tags.len().to_string());
    for tag in &tags {
        human.push_detail(tag.clone());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task tags",
        &report,
        Some(&human),
    )
}

pub fn run_assignees(options: LabelOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let assignees: Vec<String> = ctx.board.available_assignees().into_iter().collect();

    let report = AssigneesReport {
        total: assignees.len(),
        assignees: assignees.clone(),
    };

    let mut human = HumanOutput::new("Assignees");
    human.push_summary("Total", assignees.len().to_string());
    for assignee in &assignees {
        human.push_detail(assignee.clone());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "task assignees",
        &report,
        Some(&human),
    )
}

fn format_row(task: &Task) -> String {
    let mut line = match task.priority {
        Some(priority) => format!(
            "[{}][{}] {} {}",
            task.status,
            priority,
            task.short_id(),
            task.title
        ),
        None => format!("[{}] {} {}", task.status, task.short_id(), task.title),
    };
    if !task.tag_list().is_empty() {
        line.push_str(&format!(" (tags: {})", task.tag_list().join(", ")));
    }
    if !task.assignee_list().is_empty() {
        line.push_str(&format!(" (assignees: {})", task.assignee_list().join(", ")));
    }
    if let Some(due) = task.due_date.as_deref() {
        line.push_str(&format!(" (due: {due})"));
    }
    line
}

fn some_when_present(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = Error>,
{
    value.map(str::parse).transpose()
}
