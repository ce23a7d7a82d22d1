use kb::output::{format_human, HumanOutput};

#[test]
fn format_human_includes_sections() {
    let mut human = HumanOutput::new("Created task: Write release notes");
    human.push_summary("Id", "7c9e6679-7425-40de-944b-e07fc1f90ae7");
    human.push_detail("[todo] 7c9e6679 Write release notes");
    human.push_warning("due date has already passed");
    human.push_next_step("kb task list");

    let rendered = format_human(&human);
    assert!(rendered.contains("Created task: Write release notes"));
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("- Id: 7c9e6679-7425-40de-944b-e07fc1f90ae7"));
    assert!(rendered.contains("Details:"));
    assert!(rendered.contains("- [todo] 7c9e6679 Write release notes"));
    assert!(rendered.contains("Warnings:"));
    assert!(rendered.contains("- due date has already passed"));
    assert!(rendered.contains("Next steps:"));
    assert!(rendered.contains("- kb task list"));
}

#[test]
fn format_human_omits_empty_sections() {
    let human = HumanOutput::new("Signed out: Amy");
    let rendered = format_human(&human);
    assert_eq!(rendered, "Signed out: Amy");
}
