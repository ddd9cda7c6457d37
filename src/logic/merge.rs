use crate::model::FormData;

/// Merge the fetched base form data with an optional dashboard override.
///
/// Shallow field-level merge: every field present in the override replaces
/// the base's value of the same name, fields present only in the override are
/// added, all other fields come from the base. With no override (or an empty
/// one) the result is a copy of the base — callers never share storage with
/// their inputs. Pure and deterministic.
pub fn merge_form_data(base: &FormData, overlay: Option<&FormData>) -> FormData {
    let mut merged = base.clone();
    if let Some(overlay) = overlay {
        for (field, value) in overlay.iter() {
            merged.insert(field.clone(), value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> FormData {
        FormData::from_value(json!({
            "viz_type": "table",
            "show_cell_bars": true,
            "datasource": "1__table",
        }))
    }

    #[test]
    fn test_no_override_returns_base_copy() {
        let base = base();
        let merged = merge_form_data(&base, None);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_empty_override_returns_base_copy() {
        let base = base();
        let merged = merge_form_data(&base, Some(&FormData::new()));
        assert_eq!(merged, base);
    }

    #[test]
    fn test_override_wins_on_collision() {
        let overlay = FormData::from_value(json!({"show_cell_bars": false}));
        let merged = merge_form_data(&base(), Some(&overlay));
        assert_eq!(merged.get("show_cell_bars"), Some(&json!(false)));
        // Non-overlapping fields retain the base's values.
        assert_eq!(merged.get("viz_type"), Some(&json!("table")));
        assert_eq!(merged.get("datasource"), Some(&json!("1__table")));
    }

    #[test]
    fn test_override_only_fields_are_added() {
        let overlay = FormData::from_value(json!({"color_scheme": "d3Category10"}));
        let merged = merge_form_data(&base(), Some(&overlay));
        assert_eq!(merged.get("color_scheme"), Some(&json!("d3Category10")));
        assert_eq!(merged.len(), base().len() + 1);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let overlay = FormData::from_value(json!({
            "color_scheme": "d3Category10",
            "show_cell_bars": false,
        }));
        let first = merge_form_data(&base(), Some(&overlay));
        let second = merge_form_data(&base(), Some(&overlay));
        assert_eq!(first, second);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let base = base();
        let overlay = FormData::from_value(json!({"viz_type": "big_number"}));
        let _ = merge_form_data(&base, Some(&overlay));
        assert_eq!(base.get("viz_type"), Some(&json!("table")));
        assert_eq!(overlay.get("viz_type"), Some(&json!("big_number")));
    }
}
