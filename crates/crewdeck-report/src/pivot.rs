//! Pivoting and stat-block formatting.
//!
//! The metrics source returns a long-form table (one row per agent and
//! measure); reporting wants one block per agent. The pivot keeps the
//! first value seen for a duplicated (agent, measure) pair.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::MetricsRow;

/// Measures per agent, both levels in sorted order.
pub type PivotTable = BTreeMap<String, BTreeMap<String, f64>>;

/// Pivot rows for the selected agents into agent → measure → value.
///
/// Rows for unselected agents are dropped; the first value wins when a
/// measure repeats for an agent.
#[must_use]
pub fn pivot_rows(rows: &[MetricsRow], selected: &BTreeSet<String>) -> PivotTable {
    let mut table = PivotTable::new();
    for row in rows {
        if !selected.contains(&row.agent) {
            continue;
        }
        table
            .entry(row.agent.clone())
            .or_default()
            .entry(row.measure.clone())
            .or_insert(row.value);
    }
    table
}

/// Format one agent's measures as a stat block.
///
/// One `- name: value` line per measure; rate and utilization measures get
/// a `%` suffix. Values print with two decimals.
#[must_use]
pub fn format_stat_block(measures: &BTreeMap<String, f64>) -> String {
    measures
        .iter()
        .map(|(name, value)| {
            let suffix = if name.contains("Rate") || name.contains("Utilization") {
                "%"
            } else {
                ""
            };
            format!("- {name}: {value:.2}{suffix}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(agent: &str, measure: &str, value: f64) -> MetricsRow {
        MetricsRow {
            agent: agent.to_string(),
            measure: measure.to_string(),
            value,
        }
    }

    #[test]
    fn pivot_filters_and_groups() {
        let rows = vec![
            row("Alice", "Tickets Closed", 42.0),
            row("Alice", "Resolution Rate", 93.5),
            row("Bob", "Tickets Closed", 17.0),
            row("Eve", "Tickets Closed", 99.0),
        ];
        let selected: BTreeSet<_> = ["Alice".to_string(), "Bob".to_string()].into();

        let table = pivot_rows(&rows, &selected);
        assert_eq!(table.len(), 2);
        assert_eq!(table["Alice"]["Resolution Rate"], 93.5);
        assert_eq!(table["Bob"]["Tickets Closed"], 17.0);
        assert!(!table.contains_key("Eve"));
    }

    #[test]
    fn first_value_wins_on_duplicates() {
        let rows = vec![
            row("Alice", "Tickets Closed", 42.0),
            row("Alice", "Tickets Closed", 7.0),
        ];
        let selected: BTreeSet<_> = ["Alice".to_string()].into();
        let table = pivot_rows(&rows, &selected);
        assert_eq!(table["Alice"]["Tickets Closed"], 42.0);
    }

    #[test]
    fn stat_block_formatting() {
        let mut measures = BTreeMap::new();
        measures.insert("Tickets Closed".to_string(), 42.0);
        measures.insert("Resolution Rate".to_string(), 93.456);
        measures.insert("Utilization".to_string(), 80.5);

        let block = format_stat_block(&measures);
        assert_eq!(
            block,
            "- Resolution Rate: 93.46%\n- Tickets Closed: 42.00\n- Utilization: 80.50%"
        );
    }

    #[test]
    fn empty_measures_give_empty_block() {
        assert_eq!(format_stat_block(&BTreeMap::new()), "");
    }
}
