//! Presentation of a `GridView`: the colored HTML table shown to students and
//! stored with each snapshot, and a plain-text grid for terminals and logs.

use std::fmt::Write;

use crate::timetable::slot::{Slot, Weekday, PERIODS};
use crate::timetable::{GridCell, GridView};

/// Pastel backgrounds; an offering always gets the same one.
const PALETTE: &[&str] = &[
    "#FFE4E1", "#E0FFFF", "#F0FFF0", "#FFF8DC", "#E6E6FA", "#FFEFD5", "#F5F5DC", "#E0F7FA",
];

const DAY_LABELS: [&str; 5] = ["월 Mon", "화 Tue", "수 Wed", "목 Thu", "금 Fri"];

fn color_for(offering_id: &str) -> &'static str {
    // FNV-1a; stable across runs unlike the std hasher.
    let hash = offering_id
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
            (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        });
    PALETTE[(hash % PALETTE.len() as u64) as usize]
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn html_cell(cell: &GridCell) -> String {
    format!(
        r#"<td style="background-color:{};"><b>{}</b><br><small>{}</small></td>"#,
        color_for(&cell.offering_id),
        escape_html(&cell.name),
        escape_html(&cell.instructor)
    )
}

/// Full `<table>` for the weekly grid plus the online/unscheduled row.
pub fn render_html(view: &GridView) -> String {
    let mut html = String::from(
        r#"<table class="timetable" style="border-collapse:collapse;text-align:center;width:100%">"#,
    );
    html.push_str("<thead><tr><th></th>");
    for label in DAY_LABELS {
        let _ = write!(html, "<th>{label}</th>");
    }
    html.push_str("</tr></thead><tbody>");

    for (row, days) in view.cells.iter().enumerate() {
        let _ = write!(html, "<tr><th>{}교시</th>", row + 1);
        for cell in days {
            match cell {
                Some(cell) => html.push_str(&html_cell(cell)),
                None => html.push_str("<td></td>"),
            }
        }
        html.push_str("</tr>");
    }

    html.push_str(r#"<tr><th>온라인/미정</th><td colspan="5">"#);
    let overflow: Vec<String> = view
        .overflow
        .iter()
        .map(|c| {
            format!(
                r#"<span style="background-color:{};padding:2px 6px;">{} ({})</span>"#,
                color_for(&c.offering_id),
                escape_html(&c.name),
                escape_html(&c.instructor)
            )
        })
        .collect();
    html.push_str(&overflow.join(" "));
    html.push_str("</td></tr></tbody></table>");
    html
}

/// Fixed-width text grid. Names are truncated to the column width.
pub fn render_text(view: &GridView) -> String {
    const WIDTH: usize = 12;
    let fit = |s: &str| -> String {
        let cut: String = s.chars().take(WIDTH).collect();
        format!("{cut:<WIDTH$}")
    };

    if view.is_empty() {
        return "(empty timetable)\n".to_string();
    }

    let mut out = String::new();
    let _ = write!(out, "{:<4}", "");
    for day in Weekday::ALL {
        let _ = write!(out, "|{}", fit(day.short_name()));
    }
    out.push('\n');

    for period in 1..=PERIODS as u8 {
        let _ = write!(out, "{period:<4}");
        for day in Weekday::ALL {
            let name = Slot::new(day, period)
                .and_then(|slot| view.cell(slot))
                .map(|c| c.name.as_str())
                .unwrap_or("");
            let _ = write!(out, "|{}", fit(name));
        }
        out.push('\n');
    }

    if !view.overflow.is_empty() {
        let names: Vec<&str> = view.overflow.iter().map(|c| c.name.as_str()).collect();
        let _ = writeln!(out, "online: {}", names.join(", "));
    }
    out
}
