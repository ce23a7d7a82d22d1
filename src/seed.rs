//! Starter content for a brand-new board.
//!
//! Seeded exactly once per partition, the first time its task document
//! is loaded and found never to have been written. Clearing the board
//! afterwards leaves an empty document behind, so the demo set does not
//! come back.

use chrono::Utc;
use uuid::Uuid;

use crate::task::{Status, Task};

fn card(title: &str, description: &str, status: Status) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        created_at: Utc::now(),
        due_date: None,
        tags: None,
        assignees: None,
        comments: None,
        attachments: None,
        priority: None,
        issue_type: None,
    }
}

fn labels(names: &[&str]) -> Option<Vec<String>> {
    Some(names.iter().map(|name| name.to_string()).collect())
}

/// The demo board: three cards per column, fresh ids and timestamps.
pub fn demo_tasks() -> Vec<Task> {
    vec![
        Task {
            tags: labels(&["Design"]),
            assignees: labels(&["user1", "user2", "user3"]),
            comments: Some(5),
            attachments: Some(2),
            ..card(
                "Finish Requirements",
                "Complete project requirements document",
                Status::Todo,
            )
        },
        Task {
            tags: labels(&["UI/UX"]),
            assignees: labels(&["user1"]),
            comments: Some(3),
            ..card(
                "UI Design",
                "Create UI design based on requirements",
                Status::Todo,
            )
        },
        Task {
            assignees: labels(&["user1"]),
            ..card("API Integration", "Integrate with backend APIs", Status::Todo)
        },
        Task {
            due_date: Some("12/20".to_string()),
            tags: labels(&["UI/UX"]),
            assignees: labels(&["user1", "user2"]),
            comments: Some(7),
            ..card(
                "Landing Page Design",
                "Create design for landing page",
                Status::Doing,
            )
        },
        Task {
            tags: labels(&["Testing"]),
            assignees: labels(&["user2"]),
            comments: Some(4),
            attachments: Some(3),
            ..card(
                "Usability Testing",
                "Conduct usability testing sessions",
                Status::Doing,
            )
        },
        Task {
            assignees: labels(&["user1"]),
            ..card(
                "Feature Development",
                "Implement new feature based on design",
                Status::Doing,
            )
        },
        Task {
            tags: labels(&["Dev"]),
            assignees: labels(&["user3"]),
            comments: Some(1),
            ..card(
                "Setup Development",
                "Set up development environment",
                Status::Done,
            )
        },
        Task {
            tags: labels(&["UI/UX"]),
            assignees: labels(&["user1", "user2"]),
            comments: Some(3),
            ..card("User Flow Diagrams", "Create user flow diagrams", Status::Done)
        },
        Task {
            assignees: labels(&["user3"]),
            ..card("Data Model Design", "Design database schema", Status::Done)
        },
    ]
}
