//! Ticket log domain logic: payload validation and appending to the manifest.

use serde::Serialize;
use serde_json::{Number, Value};
use tracing::{info, warn};

use crate::error::SaveTicketError;
use crate::storage::ManifestStore;

/// A validated record as stored in the manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    pub timestamp: String,
    /// A JSON number, or the submitted text when it has no exact numeric form
    pub quantity: Value,
}

impl ManifestEntry {
    /// Validate one raw payload element.
    ///
    /// Requires an object with a non-empty string `name`, a non-empty string `timestamp` and a
    /// numeric `quantity`. A quantity sent as numeric text is stored as a number when that
    /// conversion is exact, and as the original text otherwise.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let name = object.get("name")?.as_str().filter(|s| !s.is_empty())?;
        let timestamp = object.get("timestamp")?.as_str().filter(|s| !s.is_empty())?;
        let quantity = parse_quantity(object.get("quantity")?)?;

        Some(Self {
            name: name.to_string(),
            timestamp: timestamp.to_string(),
            quantity,
        })
    }
}

fn parse_quantity(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(whole) = trimmed.parse::<i64>() {
                return Some(Value::from(whole));
            }
            if let Ok(whole) = trimmed.parse::<u64>() {
                return Some(Value::from(whole));
            }

            let parsed = trimmed.parse::<f64>().ok().filter(|f| f.is_finite())?;
            match Number::from_f64(parsed) {
                Some(number) if number.to_string() == trimmed => Some(Value::Number(number)),
                // Valid but lossy as a float, e.g. an integer beyond u64
                _ => Some(Value::String(trimmed.to_string())),
            }
        }
        _ => None,
    }
}

/// Split a payload into valid manifest entries, dropping (and logging) the rest.
///
/// The payload must be a non-empty array with at least one valid element.
pub fn filter_entries(payload: &Value) -> Result<Vec<ManifestEntry>, SaveTicketError> {
    let items = match payload {
        Value::Array(items) if !items.is_empty() => items,
        _ => {
            return Err(SaveTicketError::InvalidPayload(
                "Invalid or empty ticket data array received".to_string(),
            ))
        }
    };

    let mut valid = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();
    for item in items {
        match ManifestEntry::from_value(item) {
            Some(entry) => valid.push(entry),
            None => rejected.push(item),
        }
    }

    if !rejected.is_empty() {
        warn!("Filtered out invalid items: {:?}", rejected);
    }
    if valid.is_empty() {
        return Err(SaveTicketError::NoValidEntries);
    }

    Ok(valid)
}

#[derive(Clone)]
pub struct TicketLogService {
    store: ManifestStore,
}

impl TicketLogService {
    pub fn new(store: ManifestStore) -> Self {
        Self { store }
    }

    /// Validate a submitted ticket and append its valid entries to the manifest.
    ///
    /// Returns the number of entries appended.
    pub async fn save_ticket(&self, payload: &Value) -> Result<usize, SaveTicketError> {
        let entries = filter_entries(payload)?;
        let count = entries.len();

        let values = entries
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(crate::error::StorageError::from)?;

        let total = self.store.append(values).await?;
        info!("Saved {} ticket entries, manifest now holds {}", count, total);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup_service() -> (TicketLogService, ManifestStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = ManifestStore::new(temp_dir.path().join("manifest.json"));
        (TicketLogService::new(store.clone()), store, temp_dir)
    }

    #[test]
    fn test_valid_entry() {
        let entry = ManifestEntry::from_value(&json!({
            "name": "Cookie",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "quantity": 2
        }))
        .expect("entry should be valid");

        assert_eq!(entry.name, "Cookie");
        assert_eq!(entry.quantity, json!(2));
    }

    #[test]
    fn test_string_quantity_is_accepted() {
        let entry = ManifestEntry::from_value(&json!({
            "name": "Cookie",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "quantity": "3"
        }))
        .unwrap();
        assert_eq!(entry.quantity, json!(3));

        let entry = ManifestEntry::from_value(&json!({
            "name": "Fudge",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "quantity": "0.5"
        }))
        .unwrap();
        assert_eq!(entry.quantity, json!(0.5));
    }

    #[test]
    fn test_large_string_quantity_is_not_rounded() {
        let entry = ManifestEntry::from_value(&json!({
            "name": "Cookie",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "quantity": "99999999999999999999"
        }))
        .unwrap();
        assert_eq!(entry.quantity, json!("99999999999999999999"));

        let entry = ManifestEntry::from_value(&json!({
            "name": "Cookie",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "quantity": "18446744073709551615"
        }))
        .unwrap();
        assert_eq!(entry.quantity, json!(18446744073709551615u64));

        // Trailing zeros have no exact float spelling, so the text is kept
        let entry = ManifestEntry::from_value(&json!({
            "name": "Cookie",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "quantity": "2.50"
        }))
        .unwrap();
        assert_eq!(entry.quantity, json!("2.50"));
    }

    #[test]
    fn test_invalid_entries() {
        let invalid = [
            json!("Cookie"),
            json!(null),
            json!({ "timestamp": "t", "quantity": 1 }),
            json!({ "name": "", "timestamp": "t", "quantity": 1 }),
            json!({ "name": 7, "timestamp": "t", "quantity": 1 }),
            json!({ "name": "Cookie", "quantity": 1 }),
            json!({ "name": "Cookie", "timestamp": "", "quantity": 1 }),
            json!({ "name": "Cookie", "timestamp": "t" }),
            json!({ "name": "Cookie", "timestamp": "t", "quantity": null }),
            json!({ "name": "Cookie", "timestamp": "t", "quantity": "lots" }),
            json!({ "name": "Cookie", "timestamp": "t", "quantity": true }),
        ];
        for value in invalid.iter() {
            assert!(ManifestEntry::from_value(value).is_none(), "{} should be rejected", value);
        }
    }

    #[test]
    fn test_filter_rejects_non_array_and_empty() {
        assert!(matches!(
            filter_entries(&json!({ "name": "Cookie" })),
            Err(SaveTicketError::InvalidPayload(_))
        ));
        assert!(matches!(
            filter_entries(&json!([])),
            Err(SaveTicketError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_filter_drops_invalid_entries() {
        let payload = json!([
            { "timestamp": "2024-01-01T00:00:00.000Z", "quantity": 1 },
            { "name": "Cookie", "timestamp": "2024-01-01T00:00:00.000Z", "quantity": 2 }
        ]);
        let entries = filter_entries(&payload).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Cookie");
    }

    #[test]
    fn test_filter_all_invalid() {
        let payload = json!([{ "quantity": 1 }, { "name": "Cookie" }]);
        assert!(matches!(
            filter_entries(&payload),
            Err(SaveTicketError::NoValidEntries)
        ));
    }

    #[tokio::test]
    async fn test_save_ticket_against_absent_manifest() {
        let (service, store, _temp_dir) = setup_service();
        let payload = json!([
            { "name": "Cookie", "timestamp": "2024-01-01T00:00:00.000Z", "quantity": 2 }
        ]);

        let saved = service.save_ticket(&payload).await.unwrap();

        assert_eq!(saved, 1);
        assert_eq!(store.load().await.unwrap(), payload.as_array().unwrap().clone());
    }

    #[tokio::test]
    async fn test_save_ticket_normalizes_entries() {
        let (service, store, _temp_dir) = setup_service();
        let payload = json!([
            { "name": "Cookie", "timestamp": "2024-01-01T00:00:00.000Z", "quantity": "2", "price": 2.5 }
        ]);

        service.save_ticket(&payload).await.unwrap();

        assert_eq!(
            store.load().await.unwrap(),
            vec![json!({ "name": "Cookie", "timestamp": "2024-01-01T00:00:00.000Z", "quantity": 2 })]
        );
    }

    #[tokio::test]
    async fn test_all_invalid_leaves_manifest_unchanged() {
        let (service, store, _temp_dir) = setup_service();
        std::fs::write(store.path(), "[]").unwrap();

        let result = service
            .save_ticket(&json!([{ "quantity": 1 }, { "timestamp": "t" }]))
            .await;

        assert!(matches!(result, Err(SaveTicketError::NoValidEntries)));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }
}
