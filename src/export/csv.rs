use serde::Serialize;

use super::ExportError;

/// Serialize rows to CSV with a header taken from the field names
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, ExportError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::SerializationError(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| ExportError::SerializationError(e.to_string()))
}
