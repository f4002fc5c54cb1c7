//! Display-only query text.
//!
//! These strings imitate what a SQL backend would have run. Nothing here is
//! ever parsed or executed; callers only print them.

/// Table name used in every synthetic query.
pub const TABLE: &str = "patients";

/// Double single quotes so the displayed literal stays well-formed.
fn quote(text: &str) -> String {
    text.replace('\'', "''")
}

#[must_use]
pub fn count() -> String {
    format!("SELECT COUNT(*) FROM {TABLE};")
}

#[must_use]
pub fn average(column: &str) -> String {
    format!("SELECT AVG({column}) FROM {TABLE};")
}

#[must_use]
pub fn text_search(term: &str) -> String {
    let term = quote(term);
    format!(
        "SELECT * FROM {TABLE} WHERE diagnosis ILIKE '%{term}%' OR clinical_notes ILIKE '%{term}%';"
    )
}

#[must_use]
pub fn id_lookup(patient_id: &str) -> String {
    format!(
        "SELECT * FROM {TABLE} WHERE patient_id = '{}';",
        quote(patient_id)
    )
}

#[must_use]
pub fn id_pattern() -> String {
    format!("SELECT * FROM {TABLE} WHERE patient_id LIKE 'P-%' LIMIT 0;")
}

/// The last `limit` rows in insertion order.
#[must_use]
pub fn recent(limit: usize) -> String {
    format!("SELECT * FROM {TABLE} OFFSET GREATEST((SELECT COUNT(*) FROM {TABLE}) - {limit}, 0);")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregates() {
        assert_eq!(count(), "SELECT COUNT(*) FROM patients;");
        assert_eq!(average("bill_amount"), "SELECT AVG(bill_amount) FROM patients;");
    }

    #[test]
    fn test_text_search_quotes_input() {
        assert_eq!(
            text_search("o'brien"),
            "SELECT * FROM patients WHERE diagnosis ILIKE '%o''brien%' OR clinical_notes ILIKE '%o''brien%';"
        );
    }

    #[test]
    fn test_id_lookup() {
        assert_eq!(
            id_lookup("P-001"),
            "SELECT * FROM patients WHERE patient_id = 'P-001';"
        );
    }

    #[test]
    fn test_recent_keeps_insertion_order() {
        let query = recent(5);
        assert_eq!(
            query,
            "SELECT * FROM patients OFFSET GREATEST((SELECT COUNT(*) FROM patients) - 5, 0);"
        );
        assert!(!query.contains("ORDER BY"));
    }
}
