//! Authoritative task list for one partition.
//!
//! The board owns the in-memory collection, applies every mutation
//! there first, then saves the whole collection through the store.
//! Persistence failures never surface here; the adapter logs and the
//! in-memory state stays the source of truth for the session.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::seed;
use crate::store::{Partition, Store};
use crate::task::{normalize_labels, Status, Task, TaskDraft};

pub struct Board {
    store: Store,
    partition: Partition,
    tasks: Vec<Task>,
}

impl Board {
    /// Load a partition's board, seeding the demo set on its very first
    /// load. The seed is persisted immediately so it can never apply
    /// twice, even after the user deletes every task.
    pub fn open(store: Store, partition: Partition) -> Self {
        let tasks = match store.load_tasks(&partition) {
            Some(tasks) => tasks,
            None => {
                let seeded = seed::demo_tasks();
                store.save_tasks(&partition, &seeded);
                debug!(partition = %partition.key(), "seeded demo board on first load");
                seeded
            }
        };
        Self {
            store,
            partition,
            tasks,
        }
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Current tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Resolve user input to a task id. Accepts a full id or a unique
    /// prefix of its hyphenless lowercase form.
    pub fn resolve_id(&self, input: &str) -> Result<Uuid> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
        }

        if let Ok(id) = Uuid::parse_str(trimmed) {
            if self.get(id).is_some() {
                return Ok(id);
            }
            return Err(Error::TaskNotFound(trimmed.to_string()));
        }

        let needle = normalize_id(trimmed);
        if needle.is_empty() || !needle.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(Error::InvalidArgument(format!(
                "invalid task id '{trimmed}'"
            )));
        }

        let mut matches: Vec<Uuid> = self
            .tasks
            .iter()
            .filter(|task| normalize_id(&task.id.to_string()).starts_with(&needle))
            .map(|task| task.id)
            .collect();
        match matches.len() {
            0 => Err(Error::TaskNotFound(trimmed.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::InvalidArgument(format!(
                "ambiguous task id '{}': {}",
                trimmed,
                matches
                    .iter()
                    .map(Uuid::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Create a task from a draft and persist the collection.
    ///
    /// Titles that trim to empty are rejected. Tag and assignee lists
    /// collapse to absent when empty; an absent assignee list defaults
    /// to the owning account on a user partition.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        let mut assignees = normalize_labels(draft.assignees);
        if assignees.is_none() {
            if let Partition::User(id) = self.partition {
                assignees = Some(vec![id.to_string()]);
            }
        }

        let task = Task {
            id: Uuid::new_v4(),
            title,
            description: draft.description.trim().to_string(),
            status: draft.status,
            created_at: Utc::now(),
            due_date: normalize_text(draft.due_date),
            tags: normalize_labels(draft.tags),
            assignees,
            comments: draft.comments,
            attachments: draft.attachments,
            priority: draft.priority,
            issue_type: draft.issue_type,
        };
        debug!(task = %task.id, status = %task.status, "created task");

        let record = task.clone();
        self.tasks.push(task);
        self.persist();
        Ok(record)
    }

    /// Replace the stored record matching `task.id`. Returns the record
    /// as persisted, after normalization.
    pub fn update(&mut self, mut task: Task) -> Result<Task> {
        let title = task.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }
        task.title = title;
        task.description = task.description.trim().to_string();
        task.due_date = normalize_text(task.due_date);
        task.tags = normalize_labels(task.tags);
        task.assignees = normalize_labels(task.assignees);

        let slot = self
            .tasks
            .iter_mut()
            .find(|existing| existing.id == task.id)
            .ok_or_else(|| Error::TaskNotFound(task.id.to_string()))?;
        debug!(task = %task.id, "updated task");
        *slot = task.clone();
        self.persist();
        Ok(task)
    }

    /// Delete a task, returning the removed record.
    pub fn delete(&mut self, id: Uuid) -> Result<Task> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let removed = self.tasks.remove(position);
        debug!(task = %id, "deleted task");
        self.persist();
        Ok(removed)
    }

    /// Move a task to another column. Every other field stays as-is.
    pub fn move_to(&mut self, id: Uuid, status: Status) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        debug!(task = %id, from = %task.status, to = %status, "moved task");
        task.status = status;
        let record = task.clone();
        self.persist();
        Ok(record)
    }

    /// Remove every task, returning how many were dropped. Refused on
    /// the anonymous partition; the empty collection is persisted so the
    /// demo seed does not come back.
    pub fn clear_all(&mut self) -> Result<usize> {
        if self.partition.is_anonymous() {
            return Err(Error::IdentityRequired("clearing the board"));
        }
        let removed = self.tasks.len();
        self.tasks.clear();
        debug!(partition = %self.partition.key(), removed, "cleared board");
        self.persist();
        Ok(removed)
    }

    /// Distinct tags across the current tasks.
    pub fn available_tags(&self) -> BTreeSet<String> {
        self.tasks
            .iter()
            .flat_map(|task| task.tag_list().iter().cloned())
            .collect()
    }

    /// Distinct assignees across the current tasks.
    pub fn available_assignees(&self) -> BTreeSet<String> {
        self.tasks
            .iter()
            .flat_map(|task| task.assignee_list().iter().cloned())
            .collect()
    }

    fn persist(&self) {
        self.store.save_tasks(&self.partition, &self.tasks);
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_id(input: &str) -> String {
    input
        .chars()
        .filter(|ch| *ch != '-')
        .collect::<String>()
        .to_ascii_lowercase()
}
