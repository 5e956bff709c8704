//! `teampulse tasks` command.

use chrono::NaiveDate;

use super::members::{column_widths, format_row};
use crate::intent::{Dashboard, Intent, SetCurrentUser, SwitchRole};
use crate::model::{Category, Filter, Filters, Priority};
use crate::role::Role;

/// Options for the role-scoped task listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Role to act in.
    pub role: Role,
    /// User to act as, overriding the role default.
    pub user: Option<String>,
    /// Priority filter (lead view only).
    pub priority: Filter<Priority>,
    /// Category filter (lead view only).
    pub category: Filter<Category>,
}

/// Execute the `tasks` command.
///
/// # Errors
///
/// Returns an error string if switching role or applying filters fails.
pub fn run(dashboard: &mut Dashboard, query: &TaskQuery) -> Result<(), String> {
    prepare(dashboard, query)?;
    let today = dashboard.store().context().clock.today();
    println!("{}", render(dashboard, today));
    Ok(())
}

/// Puts the dashboard into the role, user and filters the query asks for.
///
/// # Errors
///
/// Returns an error string if an intent is rejected.
pub fn prepare(dashboard: &mut Dashboard, query: &TaskQuery) -> Result<(), String> {
    dashboard
        .apply(Intent::SwitchRole(SwitchRole { role: Some(query.role) }))
        .map_err(|e| e.to_string())?;
    if let Some(name) = &query.user {
        dashboard
            .apply(Intent::SetCurrentUser(SetCurrentUser { name: name.clone() }))
            .map_err(|e| e.to_string())?;
    }
    let filters = Filters {
        priority: query.priority,
        category: query.category,
        ..dashboard.store().filters()
    };
    dashboard.apply(Intent::SetFilters(filters)).map_err(|e| e.to_string())?;
    Ok(())
}

/// Renders the tasks visible to the current role and user.
#[must_use]
pub fn render(dashboard: &Dashboard, today: NaiveDate) -> String {
    let roles = dashboard.roles();
    let heading = match roles.role() {
        Role::Lead => format!("Team tasks (lead: {})", roles.current_user()),
        Role::Member => format!("Tasks for {}", roles.current_user()),
    };

    let visible = dashboard.visible_tasks();
    if visible.is_empty() {
        return format!("{heading}\n\nNo tasks assigned yet.");
    }

    let store = dashboard.store();
    let rows: Vec<Vec<String>> = visible
        .iter()
        .map(|(member_id, task)| {
            let owner = store.member(*member_id).map_or_else(String::new, |m| m.name.clone());
            let mut due = task.due_date.to_string();
            if task.is_overdue(today) {
                due.push_str(" (overdue)");
            }
            vec![
                task.id.to_string(),
                owner,
                task.title.clone(),
                task.priority.to_string(),
                task.category.to_string(),
                format!("{}%", task.progress),
                due,
            ]
        })
        .collect();

    let headers: Vec<String> = ["ID", "MEMBER", "TITLE", "PRIORITY", "CATEGORY", "PROGRESS", "DUE"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let widths = column_widths(&headers, &rows);

    let mut lines = vec![heading, String::new(), format_row(&headers, &widths)];
    lines.push(format_row(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>(), &widths));
    for row in &rows {
        lines.push(format_row(row, &widths));
    }
    let done = visible.iter().filter(|(_, t)| t.completed).count();
    lines.push(String::new());
    lines.push(format!("{} task(s), {done} completed.", rows.len()));
    lines.join("\n")
}
