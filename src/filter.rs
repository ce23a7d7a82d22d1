//! Filter and search pipeline over a task collection.
//!
//! The pipeline is pure: callers re-run it whenever tasks, criteria, or
//! the query change. Active clauses combine as a conjunction and the
//! output preserves the input's insertion order; nothing here sorts.

use crate::task::{Status, Task};

/// Active filter selections.
///
/// Empty tag/assignee lists mean "no constraint", and `show_completed`
/// defaults to on, so `Criteria::default()` passes every task through.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    pub tags: Vec<String>,
    pub assignees: Vec<String>,
    pub show_completed: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            assignees: Vec::new(),
            show_completed: true,
        }
    }
}

impl Criteria {
    /// True when any clause constrains the view.
    pub fn is_active(&self) -> bool {
        !self.tags.is_empty() || !self.assignees.is_empty() || !self.show_completed
    }
}

/// Filter `tasks` down to those matching every active clause.
///
/// - tags: the task carries at least one selected tag;
/// - assignees: at least one selected assignee;
/// - `show_completed == false`: no `done` tasks;
/// - non-empty query: case-insensitive substring of title or description.
pub fn apply<'a>(tasks: &'a [Task], criteria: &Criteria, query: &str) -> Vec<&'a Task> {
    let query = query.to_lowercase();
    tasks
        .iter()
        .filter(|task| matches(task, criteria, &query))
        .collect()
}

/// Narrow a pipeline result to one column.
pub fn column<'a>(view: &[&'a Task], status: Status) -> Vec<&'a Task> {
    view.iter()
        .copied()
        .filter(|task| task.status == status)
        .collect()
}

fn matches(task: &Task, criteria: &Criteria, query: &str) -> bool {
    if !criteria.tags.is_empty() {
        let hit = task
            .tag_list()
            .iter()
            .any(|tag| criteria.tags.iter().any(|wanted| wanted == tag));
        if !hit {
            return false;
        }
    }

    if !criteria.assignees.is_empty() {
        let hit = task
            .assignee_list()
            .iter()
            .any(|assignee| criteria.assignees.iter().any(|wanted| wanted == assignee));
        if !hit {
            return false;
        }
    }

    if !criteria.show_completed && task.status == Status::Done {
        return false;
    }

    if !query.is_empty() {
        let hit = task.title.to_lowercase().contains(query)
            || task.description.to_lowercase().contains(query);
        if !hit {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn task(title: &str, status: Status, tags: &[&str], assignees: &[&str]) -> Task {
        let labels = |names: &[&str]| {
            if names.is_empty() {
                None
            } else {
                Some(names.iter().map(|name| name.to_string()).collect())
            }
        };
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("{title} description"),
            status,
            created_at: Utc::now(),
            due_date: None,
            tags: labels(tags),
            assignees: labels(assignees),
            comments: None,
            attachments: None,
            priority: None,
            issue_type: None,
        }
    }

    fn titles(view: &[&Task]) -> Vec<String> {
        view.iter().map(|task| task.title.clone()).collect()
    }

    #[test]
    fn default_criteria_pass_everything_through_in_order() {
        let tasks = vec![
            task("first", Status::Done, &[], &[]),
            task("second", Status::Todo, &["Design"], &[]),
            task("third", Status::Doing, &[], &["user1"]),
        ];
        let view = apply(&tasks, &Criteria::default(), "");
        assert_eq!(titles(&view), vec!["first", "second", "third"]);
    }

    #[test]
    fn tag_clause_keeps_tasks_with_any_selected_tag() {
        let tasks = vec![
            task("design work", Status::Todo, &["Design"], &[]),
            task("dev work", Status::Todo, &["Dev"], &[]),
            task("untagged", Status::Todo, &[], &[]),
        ];
        let criteria = Criteria {
            tags: vec!["Design".to_string(), "Dev".to_string()],
            ..Criteria::default()
        };
        let view = apply(&tasks, &criteria, "");
        assert_eq!(titles(&view), vec!["design work", "dev work"]);
    }

    #[test]
    fn untagged_tasks_never_match_a_tag_clause() {
        let tasks = vec![task("untagged", Status::Todo, &[], &[])];
        let criteria = Criteria {
            tags: vec!["Design".to_string()],
            ..Criteria::default()
        };
        assert!(apply(&tasks, &criteria, "").is_empty());
    }

    #[test]
    fn assignee_clause_intersects() {
        let tasks = vec![
            task("pair", Status::Todo, &[], &["user1", "user2"]),
            task("solo", Status::Todo, &[], &["user3"]),
            task("unassigned", Status::Todo, &[], &[]),
        ];
        let criteria = Criteria {
            assignees: vec!["user2".to_string()],
            ..Criteria::default()
        };
        let view = apply(&tasks, &criteria, "");
        assert_eq!(titles(&view), vec!["pair"]);
    }

    #[test]
    fn hiding_completed_drops_only_done_tasks() {
        let tasks = vec![
            task("open", Status::Todo, &[], &[]),
            task("active", Status::Doing, &[], &[]),
            task("finished", Status::Done, &[], &[]),
        ];
        let criteria = Criteria {
            show_completed: false,
            ..Criteria::default()
        };
        let view = apply(&tasks, &criteria, "");
        assert_eq!(titles(&view), vec!["open", "active"]);
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let mut with_description = task("quiet title", Status::Todo, &[], &[]);
        with_description.description = "contains NEEDLE here".to_string();
        let tasks = vec![
            task("Needle in title", Status::Todo, &[], &[]),
            with_description,
            task("unrelated", Status::Todo, &[], &[]),
        ];
        let view = apply(&tasks, &Criteria::default(), "needle");
        assert_eq!(titles(&view), vec!["Needle in title", "quiet title"]);
    }

    #[test]
    fn clauses_combine_as_a_conjunction() {
        let tasks = vec![
            task("design review", Status::Todo, &["Design"], &[]),
            task("design cleanup", Status::Done, &["Design"], &[]),
            task("dev review", Status::Todo, &["Dev"], &[]),
        ];
        let criteria = Criteria {
            tags: vec!["Design".to_string()],
            show_completed: false,
            ..Criteria::default()
        };
        let view = apply(&tasks, &criteria, "review");
        assert_eq!(titles(&view), vec!["design review"]);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let tasks = vec![
            task("design work", Status::Todo, &["Design"], &["user1"]),
            task("dev work", Status::Done, &["Dev"], &[]),
            task("untagged", Status::Doing, &[], &[]),
        ];
        let criteria = Criteria {
            tags: vec!["Design".to_string(), "Dev".to_string()],
            show_completed: false,
            ..Criteria::default()
        };

        let once: Vec<Task> = apply(&tasks, &criteria, "work")
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Task> = apply(&once, &criteria, "work")
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn column_view_narrows_pipeline_output() {
        let tasks = vec![
            task("a", Status::Todo, &[], &[]),
            task("b", Status::Doing, &[], &[]),
            task("c", Status::Todo, &[], &[]),
        ];
        let view = apply(&tasks, &Criteria::default(), "");
        let todo = column(&view, Status::Todo);
        assert_eq!(titles(&todo), vec!["a", "c"]);
        assert!(column(&view, Status::Done).is_empty());
    }
}
