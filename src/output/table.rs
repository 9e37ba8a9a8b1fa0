use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::display::{ChartRow, MetricPanel, ToggleRow};

pub fn render_metrics_table(panels: &[MetricPanel]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Indicator", "Value", "Delta"]);

    for panel in panels {
        let delta_cell = match panel.delta_pts {
            Some(delta) if delta > 0 => Cell::new(format!("+{delta} pts")).fg(Color::Red),
            Some(delta) if delta < 0 => Cell::new(format!("{delta} pts")).fg(Color::Red),
            Some(_) => Cell::new("0 pts"),
            None => Cell::new("-"),
        };
        table.add_row(Row::from(vec![
            Cell::new(&panel.label),
            Cell::new(format!("{} %", panel.value_pct)),
            delta_cell,
        ]));
    }
    table.to_string()
}

pub fn render_rules_table(toggles: &[ToggleRow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rule", "Impact (pts)", "Description", "Active"]);

    for toggle in toggles {
        let active = if toggle.active { "ON" } else { "OFF" };
        let active_cell = if toggle.active {
            Cell::new(active).fg(Color::Green)
        } else {
            Cell::new(active).fg(Color::DarkGrey)
        };
        table.add_row(Row::from(vec![
            Cell::new(&toggle.name),
            Cell::new(format!("-{}", toggle.impact)),
            Cell::new(&toggle.description),
            active_cell,
        ]));
    }
    table.to_string()
}

pub fn render_comparison_chart(rows: &[ChartRow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Indicator", "Current", "After adjustment"]);

    for row in rows {
        table.add_row(Row::from(vec![
            Cell::new(&row.indicator),
            Cell::new(bar(row.current_pct)),
            Cell::new(bar(row.adjusted_pct)).fg(Color::Cyan),
        ]));
    }
    table.to_string()
}

// One block per two percentage points keeps the widest bar at 50 columns.
fn bar(value_pct: i32) -> String {
    let width = (value_pct.clamp(0, 100) as usize) / 2;
    format!("{} {} %", "█".repeat(width), value_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_length_is_proportional_to_the_value() {
        assert!(bar(100).starts_with(&"█".repeat(50)));
        assert_eq!(bar(0), " 0 %");
        assert_eq!(bar(20).matches('█').count(), 10);
    }

    #[test]
    fn rules_table_lists_every_toggle() {
        let toggles = vec![
            ToggleRow {
                name: "RISK_SCORE_HIGH".to_string(),
                description: "Strict threshold on the client risk score".to_string(),
                impact: 4,
                active: true,
            },
            ToggleRow {
                name: "DEBT_RATIO".to_string(),
                description: "Cap on the debt-to-income ratio".to_string(),
                impact: 3,
                active: false,
            },
        ];
        let rendered = render_rules_table(&toggles);
        assert!(rendered.contains("RISK_SCORE_HIGH"));
        assert!(rendered.contains("DEBT_RATIO"));
        assert!(rendered.contains("-4"));
    }
}
