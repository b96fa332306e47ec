use super::ExportError;

/// Pretty-printed JSON for any serializable result
pub fn to_json<T>(data: &T) -> Result<String, ExportError>
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_string_pretty(data).map_err(|e| ExportError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distances::distance_by_label;
    use crate::models::Unit;
    use crate::splits::splits_for_distance;
    use rust_decimal_macros::dec;

    #[test]
    fn test_schedule_json() {
        let five_k = distance_by_label("5K").unwrap();
        let schedule = splits_for_distance(1500, five_k, Unit::Km, dec!(0));
        let json = to_json(&schedule).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["goal_time_seconds"], 1500);
        assert_eq!(value["segments"].as_array().unwrap().len(), 5);
        assert_eq!(value["segments"][0]["index"], 1);
    }

    #[test]
    fn test_unit_serializes_lowercase() {
        assert_eq!(to_json(&Unit::Km).unwrap(), "\"km\"");
    }
}
