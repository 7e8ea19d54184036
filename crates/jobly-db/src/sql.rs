//! Builder for the `SET` clause of a partial `UPDATE`.
//!
//! [`sql_for_partial_update`] turns an ordered list of `(field, value)` pairs
//! into a parameterized assignment list and the matching bind values:
//!
//! ```text
//! [("firstName", "Aliya"), ("age", 32)]  with  {"firstName": "first_name"}
//!     => set_cols: "\"first_name\"=$1, \"age\"=$2"
//!        values:   ["Aliya", 32]
//! ```
//!
//! Placeholder `$i` always refers to `values[i - 1]`. Values are never
//! interpolated into the SQL text. Column names are, so both the field names
//! and the field-name map must come from code, never from request input.

use std::collections::HashMap;

use anyhow::anyhow;
use jobly_core::AppError;

/// A `SET` clause and its bind values, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate<V> {
    pub set_cols: String,
    pub values: Vec<V>,
}

impl<V> PartialUpdate<V> {
    /// Placeholder for the first parameter after the `SET` values, typically
    /// the key in the `WHERE` clause.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}

/// Builds the `SET` clause for an `UPDATE` from the fields to change.
///
/// Each field name is looked up in `js_to_sql`; a missing or empty entry
/// means the field name is used as the column name.
///
/// # Errors
///
/// Returns a bad request error (`"No data"`) if `data_to_update` is empty.
pub fn sql_for_partial_update<K, V, I>(
    data_to_update: I,
    js_to_sql: &HashMap<&str, &str>,
) -> Result<PartialUpdate<V>, AppError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
{
    let mut cols = Vec::new();
    let mut values = Vec::new();

    for (idx, (field, value)) in data_to_update.into_iter().enumerate() {
        let field = field.as_ref();
        let column = js_to_sql
            .get(field)
            .copied()
            .filter(|column| !column.is_empty())
            .unwrap_or(field);

        cols.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value);
    }

    if cols.is_empty() {
        return Err(AppError::bad_request(anyhow!("No data")));
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_mapped_field() {
        let map = HashMap::from([("f1", "f1"), ("fF2", "f2")]);
        let result = sql_for_partial_update(vec![("f1", "v1")], &map).unwrap();

        assert_eq!(result.set_cols, r#""f1"=$1"#);
        assert_eq!(result.values, vec!["v1"]);
    }

    #[test]
    fn test_unmapped_field_falls_back_to_its_name() {
        let map = HashMap::from([("jsF2", "f2")]);
        let result = sql_for_partial_update(vec![("f1", "v1"), ("jsF2", "v2")], &map).unwrap();

        assert_eq!(result.set_cols, r#""f1"=$1, "f2"=$2"#);
        assert_eq!(result.values, vec!["v1", "v2"]);
    }

    #[test]
    fn test_empty_mapping_entry_falls_back() {
        let map = HashMap::from([("title", "")]);
        let result = sql_for_partial_update(vec![("title", 1)], &map).unwrap();
        assert_eq!(result.set_cols, r#""title"=$1"#);
    }

    #[test]
    fn test_empty_input_is_bad_request() {
        let err = sql_for_partial_update(Vec::<(&str, i32)>::new(), &HashMap::new()).unwrap_err();

        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.error.to_string(), "No data");
    }

    #[test]
    fn test_next_placeholder() {
        let result = sql_for_partial_update(
            vec![("firstName", "Aliya".to_string()), ("age", "32".to_string())],
            &HashMap::from([("firstName", "first_name")]),
        )
        .unwrap();

        assert_eq!(result.set_cols, r#""first_name"=$1, "age"=$2"#);
        assert_eq!(result.next_placeholder(), "$3");
    }

    #[test]
    fn test_owned_keys() {
        let data = vec![("salary".to_string(), 700), ("equity".to_string(), 0)];
        let result = sql_for_partial_update(data, &HashMap::new()).unwrap();
        assert_eq!(result.set_cols, r#""salary"=$1, "equity"=$2"#);
        assert_eq!(result.into_values(), vec![700, 0]);
    }

    proptest! {
        #[test]
        fn prop_placeholders_line_up_with_values(
            entries in prop::collection::vec(("[a-z][a-zA-Z0-9_]{0,10}", any::<i64>()), 1..12)
        ) {
            let result = sql_for_partial_update(entries.clone(), &HashMap::new()).unwrap();

            prop_assert_eq!(result.values.len(), entries.len());

            let assignments: Vec<&str> = result.set_cols.split(", ").collect();
            prop_assert_eq!(assignments.len(), entries.len());

            for (i, assignment) in assignments.iter().enumerate() {
                let expected = format!("\"{}\"=${}", entries[i].0, i + 1);
                prop_assert_eq!(*assignment, expected.as_str());
                prop_assert_eq!(result.values[i], entries[i].1);
            }
        }

        #[test]
        fn prop_mapped_columns_are_used(
            fields in prop::collection::vec("[a-z]{1,8}", 1..8)
        ) {
            let columns: Vec<String> = fields.iter().map(|f| format!("{}_col", f)).collect();
            let map: HashMap<&str, &str> = fields
                .iter()
                .zip(columns.iter())
                .map(|(f, c)| (f.as_str(), c.as_str()))
                .collect();

            let data: Vec<(&str, usize)> = fields.iter().map(|f| f.as_str()).zip(0..).collect();
            let result = sql_for_partial_update(data, &map).unwrap();

            for (i, assignment) in result.set_cols.split(", ").enumerate() {
                let expected = format!("\"{}_col\"=${}", fields[i], i + 1);
                prop_assert_eq!(assignment, expected.as_str());
                prop_assert_eq!(result.values[i], i);
            }
        }
    }
}
