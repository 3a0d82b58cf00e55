//! Pretty output formatting.

use chrono::NaiveDate;
use lifelines_core::sync::SyncOutcome;
use lifelines_core::timeline::{
    end_label, format_date, people_by_id, since_label, Event, Person,
};

use crate::sync::StatusReport;

/// Format a person for display.
pub fn format_person(person: &Person) -> String {
    let mut output = format!(
        "{}\n  ID: {}\n  Born: {}\n  Color: {}",
        person.name,
        person.id,
        format_date(person.birth_date),
        person.color
    );
    if let Some(avatar) = &person.avatar {
        output.push_str(&format!("\n  Avatar: {}", avatar));
    }
    output
}

/// Format people for display.
pub fn format_people(people: &[Person]) -> String {
    if people.is_empty() {
        return "No people found.".to_string();
    }
    let mut output = format!("PEOPLE ({})\n", people.len());
    output.push_str(&"-".repeat(40));
    for person in people {
        output.push_str(&format!("\n{}", format_person(person)));
        output.push('\n');
    }
    output
}

/// Format an event for display.
pub fn format_event(event: &Event) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Person: {}\n  Begin: {}\n  End: {}",
        event.title,
        event.category,
        event.id,
        event.person_id,
        format_date(event.start_date),
        end_label(event)
    );
    if let Some(notes) = &event.notes {
        output.push_str(&format!("\n  Notes: {}", notes));
    }
    output
}

/// Format the timeline table: one row per event, already filtered and
/// sorted by the caller.
pub fn format_timeline(people: &[Person], events: &[&Event], today: NaiveDate) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }
    let by_id = people_by_id(people);
    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|event| {
            let person = by_id
                .get(event.person_id.as_str())
                .map(|p| p.name.clone())
                .unwrap_or_else(|| format!("#{}", event.person_id));
            vec![
                person,
                event.title.clone(),
                event.category.to_string(),
                format_date(event.start_date),
                end_label(event),
                since_label(event, today),
                event.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut output = format!("TIMELINE ({})\n", events.len());
    output.push_str(&render_table(
        &["PERSON", "EVENT", "TYPE", "BEGIN", "END", "SINCE", "NOTES"],
        &rows,
    ));
    output
}

/// Format the status report.
pub fn format_status(report: &StatusReport) -> String {
    let last_sync = report
        .last_sync
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Never".to_string());
    let mut output = format!(
        "Status: {}\n  People: {}\n  Events: {}\n  Last sync: {}",
        report.status.label(),
        report.people,
        report.events,
        last_sync
    );
    if let Some(error) = &report.error {
        output.push_str(&format!("\n  Error: {}", error));
    }
    output
}

/// Format the result of a full sync.
pub fn format_outcome(outcome: &SyncOutcome, report: &StatusReport) -> String {
    format!("Sync: {}\n{}", outcome, format_status(report))
}

/// Left-aligned table with a header rule. The last column is not padded.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |cells: Vec<&str>| {
        let last = cells.len().saturating_sub(1);
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == last {
                    cell.to_string()
                } else {
                    format!("{:<width$}", cell, width = widths[i])
                }
            })
            .collect();
        line.join("  ").trim_end().to_string()
    };

    let mut lines = vec![render_row(headers.to_vec())];
    let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    lines.push("-".repeat(rule_width));
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}
