//! `teampulse members` command.

use crate::intent::{Dashboard, Intent};
use crate::model::{Filter, Filters, Status};
use crate::store::{sorted_by_workload, TeamStore, Workload};

/// Execute the `members` command.
///
/// Applies the status filter, then lists matching members busiest first.
///
/// # Errors
///
/// Returns an error string if the filter cannot be applied.
pub fn run(dashboard: &mut Dashboard, status: Filter<Status>) -> Result<(), String> {
    let filters = Filters { status, ..dashboard.store().filters() };
    dashboard.apply(Intent::SetFilters(filters)).map_err(|e| e.to_string())?;
    println!("{}", render(dashboard.store()));
    Ok(())
}

/// Renders the filtered members sorted by open task count.
#[must_use]
pub fn render(store: &TeamStore) -> String {
    let members = sorted_by_workload(store.filtered_members());
    if members.is_empty() {
        return "No members match the selected filter.".to_string();
    }

    let rows: Vec<[String; 6]> = members
        .iter()
        .map(|m| {
            let load = Workload::of(m);
            [
                m.id.to_string(),
                m.name.clone(),
                m.status.to_string(),
                load.active_tasks.to_string(),
                m.completed_tasks().count().to_string(),
                format!("{:.1}", load.total_hours),
            ]
        })
        .collect();

    let headers = ["ID", "NAME", "STATUS", "ACTIVE", "DONE", "HOURS"].map(String::from);
    let widths = column_widths(&headers, &rows);

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(format_row(&headers, &widths));
    lines.push(format_row(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>(), &widths));
    for row in &rows {
        lines.push(format_row(row, &widths));
    }
    lines.push(String::new());
    lines.push(format!("{} member(s) shown.", rows.len()));
    lines.join("\n")
}

/// Width of each column in characters: the widest of its header and cells.
pub(crate) fn column_widths<R: AsRef<[String]>>(headers: &[String], rows: &[R]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row.as_ref()[i].chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect()
}

/// Left-aligns each cell to its column width, two spaces apart.
pub(crate) fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::context::ServiceContext;

    fn store() -> TeamStore {
        let now = Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap();
        TeamStore::seeded(ServiceContext::fixed(now)).unwrap()
    }

    #[test]
    fn busiest_member_listed_first() {
        let report = render(&store());
        let body: Vec<&str> = report.lines().skip(2).take(5).collect();
        assert!(body[0].starts_with("3   Mike Johnson"));
        assert!(body[1].starts_with("1   John Doe"));
        assert!(report.ends_with("5 member(s) shown."));
    }

    #[test]
    fn empty_filter_result_says_so() {
        let mut store = store();
        store.set_status_filter(Filter::Only(Status::Break));
        store.set_status(3, Status::Working).unwrap();
        assert_eq!(render(&store), "No members match the selected filter.");
    }

    #[test]
    fn widths_count_characters_not_bytes() {
        let headers = ["NAME".to_string(), "STATUS".to_string()];
        let rows = vec![vec!["Zoë Ångström".to_string(), "Break".to_string()]];
        assert_eq!(column_widths(&headers, &rows), vec![12, 6]);
    }

    #[test]
    fn non_ascii_names_keep_columns_aligned() {
        let mut members = crate::seed::built_in().unwrap();
        members[1].name = "Zoë Ångström".to_string();
        let now = Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap();
        let store = TeamStore::try_new(ServiceContext::fixed(now), members).unwrap();

        let report = render(&store);
        let status_column = |line: &str, label: &str| {
            line.find(label).map(|at| line[..at].chars().count())
        };
        let header = report.lines().next().unwrap();
        let zoe = report.lines().find(|l| l.contains("Zoë")).unwrap();
        let john = report.lines().find(|l| l.contains("John Doe")).unwrap();
        // ID (2) + gap + NAME (12, the longest names) + gap.
        assert_eq!(status_column(header, "STATUS"), Some(18));
        assert_eq!(status_column(zoe, "Meeting"), Some(18));
        assert_eq!(status_column(john, "Working"), Some(18));
    }

    #[test]
    fn run_applies_filter_to_dashboard() {
        let mut dashboard = Dashboard::new(store());
        run(&mut dashboard, Filter::Only(Status::Meeting)).unwrap();
        assert_eq!(dashboard.store().filters().status, Filter::Only(Status::Meeting));
        assert_eq!(dashboard.store().filtered_members().len(), 1);
    }
}
