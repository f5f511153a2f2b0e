//! Record — a named, schema-less JSON payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{JsonStoreError, ValidationError};
use crate::id::RecordId;

/// A stored record as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub data: Value,
}

/// A record that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub name: String,
    pub data: Value,
}

impl NewRecord {
    /// Create a builder for constructing a [`NewRecord`].
    #[must_use]
    pub fn builder() -> NewRecordBuilder {
        NewRecordBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`JsonStoreError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), JsonStoreError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`NewRecord`].
///
/// `data` is tracked as present or absent so an explicit JSON `null`
/// remains a valid payload.
#[derive(Debug, Default)]
pub struct NewRecordBuilder {
    name: Option<String>,
    data: Option<Value>,
}

impl NewRecordBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Consume the builder, validate, and return a [`NewRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`JsonStoreError::Validation`] if `name` is missing or empty,
    /// or if `data` was never set.
    pub fn build(self) -> Result<NewRecord, JsonStoreError> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or(ValidationError::MissingName)?;
        let data = self.data.ok_or(ValidationError::MissingData)?;

        let record = NewRecord { name, data };
        record.validate()?;
        Ok(record)
    }
}

/// A sparse update: only the fields that are `Some` get written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub data: Option<Value>,
}

impl RecordPatch {
    /// Build a patch from optionally supplied fields.
    ///
    /// An empty `name` counts as not supplied, the same way the create
    /// builder treats it.
    #[must_use]
    pub fn new(name: Option<String>, data: Option<Value>) -> Self {
        Self {
            name: name.filter(|name| !name.is_empty()),
            data,
        }
    }

    /// Whether the patch would touch no column at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.data.is_none()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`JsonStoreError::Validation`] when no field is supplied.
    pub fn validate(&self) -> Result<(), JsonStoreError> {
        if self.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_build_valid_record_when_name_and_data_provided() {
        let record = NewRecord::builder()
            .name("a")
            .data(json!({"x": 1}))
            .build()
            .unwrap();
        assert_eq!(record.name, "a");
        assert_eq!(record.data, json!({"x": 1}));
    }

    #[test]
    fn should_accept_null_data() {
        let record = NewRecord::builder()
            .name("empty")
            .data(Value::Null)
            .build()
            .unwrap();
        assert_eq!(record.data, Value::Null);
    }

    #[test]
    fn should_return_validation_error_when_name_missing() {
        let result = NewRecord::builder().data(json!(1)).build();
        assert!(matches!(
            result,
            Err(JsonStoreError::Validation(ValidationError::MissingName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_name_empty() {
        let result = NewRecord::builder().name("").data(json!(1)).build();
        assert!(matches!(
            result,
            Err(JsonStoreError::Validation(ValidationError::MissingName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_data_missing() {
        let result = NewRecord::builder().name("a").build();
        assert!(matches!(
            result,
            Err(JsonStoreError::Validation(ValidationError::MissingData))
        ));
    }

    #[test]
    fn should_check_name_before_data() {
        let result = NewRecord::builder().build();
        assert!(matches!(
            result,
            Err(JsonStoreError::Validation(ValidationError::MissingName))
        ));
    }

    #[test]
    fn should_reject_empty_patch() {
        let result = RecordPatch::default().validate();
        assert!(matches!(
            result,
            Err(JsonStoreError::Validation(ValidationError::NothingToUpdate))
        ));
    }

    #[test]
    fn should_reject_patch_when_only_name_is_empty() {
        let patch = RecordPatch::new(Some(String::new()), None);
        assert!(patch.is_empty());
        assert!(matches!(
            patch.validate(),
            Err(JsonStoreError::Validation(ValidationError::NothingToUpdate))
        ));
    }

    #[test]
    fn should_drop_empty_name_when_data_supplied() {
        let patch = RecordPatch::new(Some(String::new()), Some(json!(2)));
        assert!(patch.validate().is_ok());
        assert_eq!(patch.name, None);
        assert_eq!(patch.data, Some(json!(2)));
    }

    #[test]
    fn should_accept_patch_setting_data_to_null() {
        let patch = RecordPatch {
            name: None,
            data: Some(Value::Null),
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn should_serialize_as_flat_json_object() {
        let record = Record {
            id: RecordId::new(1),
            name: "a".to_string(),
            data: json!({"x": 1}),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "a", "data": {"x": 1}}));
    }
}
