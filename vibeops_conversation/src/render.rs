//! Plain-text rendering of query answers.

use vibeops_core::{Field, PatientRecord, QueryResult};

/// Cells longer than this are cut and marked with `...`.
const MAX_CELL_WIDTH: usize = 32;

fn clip(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        value.to_string()
    } else {
        let head: String = value.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{head}...")
    }
}

/// Render rows as a fixed-width table over `fields`.
#[must_use]
pub fn table(rows: &[PatientRecord], fields: &[Field]) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| fields.iter().map(|f| clip(&row.value(*f))).collect())
        .collect();

    let widths: Vec<usize> = fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(f.column().len()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{v:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(fields.iter().map(Field::column).collect()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        out.push(line(row.iter().map(String::as_str).collect()));
    }

    out.join("\n")
}

/// Render a full answer: query block, explanation and optional table.
#[must_use]
pub fn answer(result: &QueryResult, fields: &[Field]) -> String {
    let mut out = format!(
        "```sql\n{}\n```\nSystem: {}",
        result.synthetic_query, result.explanation
    );

    if let Some(rows) = &result.rows {
        out.push_str("\n\n");
        out.push_str(&table(rows, fields));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibeops_core::Intent;

    #[test]
    fn test_table_layout() {
        let rows = vec![
            PatientRecord::new("P-001").with_diagnosis("Flu"),
            PatientRecord::new("P-002").with_diagnosis("Chronic Sinusitis"),
        ];
        let rendered = table(&rows, &[Field::PatientId, Field::Diagnosis]);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "patient_id | diagnosis");
        assert_eq!(lines[1], "-----------+------------------");
        assert_eq!(lines[3], "P-002      | Chronic Sinusitis");
    }

    #[test]
    fn test_long_cells_are_clipped() {
        let rows = vec![PatientRecord::new("P-001").with_notes("x".repeat(80))];
        let rendered = table(&rows, &[Field::ClinicalNotes]);
        assert!(rendered.lines().all(|l| l.chars().count() <= MAX_CELL_WIDTH));
        assert!(rendered.contains("..."));
    }

    #[test]
    fn test_narrative_answer_has_no_table() {
        let result = QueryResult::narrative(Intent::Count, "SELECT COUNT(*) FROM patients;", "2");
        let rendered = answer(&result, &Field::ALL);

        assert!(rendered.starts_with("```sql\nSELECT COUNT(*) FROM patients;\n```"));
        assert!(rendered.ends_with("System: 2"));
    }

    #[test]
    fn test_empty_lookup_renders_placeholder() {
        let result = QueryResult::tabular(Intent::IdLookup, "SELECT 1;", Vec::new(), "none");
        assert!(answer(&result, &Field::ALL).ends_with("(no rows)"));
    }
}
