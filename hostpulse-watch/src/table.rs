//! Tabular rendering of a summary for the terminal.
//!
//! Output mirrors the two-table layout of the upstream stats viewer: a CPU
//! table and a NET table with one row per interface direction, prefixed by
//! the routing key the message arrived under.

use crate::history::StatsHistory;

/// Render the summary for one routing key.
pub fn render(routing_key: &str, history: &StatsHistory) -> String {
    let mut out = format!("{} :\n", routing_key);

    let cpu_rows = vec![
        header(&["Type", "Current", "High", "Low"]),
        vec![
            "CPU".to_string(),
            fmt_cell(history.cpu.current),
            fmt_cell(history.cpu.max),
            fmt_cell(history.cpu.min),
        ],
    ];
    out.push_str(&layout(&cpu_rows));
    out.push('\n');

    let mut net_rows = vec![header(&[
        "Type", "Interface", "Tx/Rx", "Current", "High", "Low",
    ])];
    for (iface, entry) in &history.net {
        for (mode, stat) in [("rx", &entry.rx), ("tx", &entry.tx)] {
            net_rows.push(vec![
                "NET".to_string(),
                iface.clone(),
                mode.to_string(),
                fmt_cell(stat.current),
                fmt_cell(stat.max),
                fmt_cell(stat.min),
            ]);
        }
    }
    out.push_str(&layout(&net_rows));
    out.push('\n');

    out
}

fn header(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Format a stat cell: whole numbers without decimals, the +infinity
/// sentinel as "inf".
fn fmt_cell(value: f64) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Column-align rows between two horizontal rules.
fn layout(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ");

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');

    out
}
