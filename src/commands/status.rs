//! `teampulse status` command.

use crate::intent::Dashboard;
use crate::store::TeamStore;

/// Execute the `status` command.
///
/// # Errors
///
/// Never fails once the dashboard is loaded; the signature matches the other
/// handlers.
pub fn run(dashboard: &Dashboard) -> Result<(), String> {
    println!("{}", render(dashboard.store()));
    Ok(())
}

/// Renders status counts and team totals.
#[must_use]
pub fn render(store: &TeamStore) -> String {
    let counts = store.status_counts();
    let summary = store.team_summary();

    let mut lines = vec![
        format!("{:<8}  {}", "STATUS", "MEMBERS"),
        format!("{:-<8}  {:-<7}", "", ""),
    ];
    for (status, count) in &counts {
        lines.push(format!("{:<8}  {count}", status.as_str()));
    }
    lines.push(String::new());
    lines.push(format!("Active members: {} of {}", summary.active_members, summary.members));
    lines.push(format!(
        "Tasks: {} total, {} completed, {} active ({}% complete), {} overdue",
        summary.total_tasks,
        summary.completed_tasks,
        summary.active_tasks,
        summary.completion_rate,
        summary.overdue_tasks,
    ));
    lines.join("\n")
}
