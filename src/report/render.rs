//! Text table rendering of a peer list.
//!
//! Renders exactly what it is given; filtering and ordering happen upstream.

use crate::peers::{Mode, PeerView, NOT_AVAILABLE};

/// Printed instead of an empty table.
pub const NO_RESULTS: &str = "No nodes found matching the criteria.";

const HEADERS: [&str; 6] = ["Name", "ID", "Role", "SNR", "Hops", "Last Heard"];
const PADDING: usize = 2;
const SEPARATOR: &str = " | ";

/// Heading line plus table (or [`NO_RESULTS`]), newline terminated.
pub fn render_report(mode: Mode, views: &[PeerView]) -> String {
    format!("\n{} (Filtered & Sorted):\n{}", mode.label(), render_table(views))
}

/// Aligned table with header and separator rows. Column widths are the widest
/// cell (header included) plus fixed padding.
pub fn render_table(views: &[PeerView]) -> String {
    if views.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    let rows: Vec<[String; 6]> = views.iter().map(cells).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    for width in widths.iter_mut() {
        *width += PADDING;
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let dashes = widths.map(|w| "-".repeat(w));
    out.push_str(&dashes.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn cells(view: &PeerView) -> [String; 6] {
    [
        view.name().to_string(),
        view.id().to_string(),
        view.role().to_string(),
        view.snr()
            .map(|snr| snr.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        view.hops_away()
            .map(|hops| hops.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        view.last_heard_display().to_string(),
    ]
}

fn push_row(out: &mut String, row: &[String; 6], widths: &[usize; 6]) {
    let last = row.len() - 1;
    let line = row
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == last {
                cell.clone()
            } else {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            }
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    out.push_str(&line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peers::TimestampZone;
    use serde_json::{json, Value};

    fn view(id: &str, value: Value) -> PeerView {
        let Value::Object(map) = value else {
            panic!("test record must be an object")
        };
        PeerView::normalize(id, &map, TimestampZone::Utc)
    }

    #[test]
    fn empty_input_says_no_results() {
        assert_eq!(render_table(&[]), format!("{}\n", NO_RESULTS));
        let report = render_report(Mode::Routers, &[]);
        assert!(report.contains("Router and Repeater Nodes (Filtered & Sorted):"));
        assert!(report.contains(NO_RESULTS));
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let views = vec![
            view("!a", json!({"user": {"longName": "A much longer name"}, "snr": 5.5, "hopsAway": 0, "lastHeard": 0})),
            view("!bbbbbbbb", json!({"role": "ROUTER"})),
        ];
        let table = render_table(&views);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[0].ends_with("Last Heard"));
        assert!(lines[1].starts_with("----"));

        // Every row puts its separators at the same offsets.
        let offsets = |line: &str| -> Vec<usize> {
            line.match_indices(" | ").map(|(i, _)| line[..i].chars().count()).collect()
        };
        assert_eq!(offsets(lines[0]), offsets(lines[2]));
        assert_eq!(offsets(lines[0]), offsets(lines[3]));

        let name_width = "A much longer name".len() + PADDING;
        assert_eq!(offsets(lines[0])[0], name_width);

        assert!(lines[2].contains("5.5"));
        assert!(lines[2].ends_with("1970-01-01 00:00:00"));
        assert!(!lines[3].contains("UNKNOWN"));
        assert!(lines[3].contains("ROUTER"));
        assert!(lines[3].ends_with(NOT_AVAILABLE));
    }

    #[test]
    fn absent_values_render_as_na() {
        let table = render_table(&[view("!x", json!({}))]);
        let row = table.lines().nth(2).unwrap();
        let cells: Vec<&str> = row.split(" | ").map(str::trim).collect();
        assert_eq!(cells, vec!["!x", "!x", "UNKNOWN", "N/A", "N/A", "N/A"]);
    }

    #[test]
    fn renders_in_given_order() {
        let views = vec![view("!first", json!({"lastHeard": 1})), view("!second", json!({"lastHeard": 9}))];
        let table = render_table(&views);
        let first = table.find("!first").unwrap();
        let second = table.find("!second").unwrap();
        assert!(first < second);
    }
}
