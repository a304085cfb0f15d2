use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::json;

/// Compiled JSON schemas for request bodies
pub struct SchemaRegistry {
    pub register_v1: JSONSchema,
    pub login_v1: JSONSchema,
    pub vehicle_v1: JSONSchema,
    pub payment_v1: JSONSchema,
}

impl SchemaRegistry {
    fn new() -> Self {
        Self {
            register_v1: JSONSchema::compile(&register_schema_v1())
                .expect("Failed to compile register schema"),
            login_v1: JSONSchema::compile(&login_schema_v1())
                .expect("Failed to compile login schema"),
            vehicle_v1: JSONSchema::compile(&vehicle_schema_v1())
                .expect("Failed to compile vehicle schema"),
            payment_v1: JSONSchema::compile(&payment_schema_v1())
                .expect("Failed to compile payment schema"),
        }
    }
}

/// Global schema registry with cached compiled schemas
pub static SCHEMAS: Lazy<SchemaRegistry> = Lazy::new(SchemaRegistry::new);

fn register_schema_v1() -> serde_json::Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["username", "password", "confirm_password"],
        "additionalProperties": false,
        "properties": {
            "username": { "type": "string", "minLength": 1, "maxLength": 64 },
            "password": { "type": "string", "maxLength": 128 },
            "confirm_password": { "type": "string", "maxLength": 128 }
        }
    })
}

fn login_schema_v1() -> serde_json::Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["username", "password"],
        "properties": {
            "username": { "type": "string", "minLength": 1, "maxLength": 64 },
            "password": { "type": "string", "maxLength": 128 }
        }
    })
}

fn vehicle_schema_v1() -> serde_json::Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["license_plate", "vehicle_type", "vehicle_size", "owner_name"],
        "additionalProperties": false,
        "properties": {
            "license_plate": {
                "type": "string",
                "pattern": "^[A-Za-z0-9 -]{1,20}$",
                "description": "Registration plate"
            },
            "vehicle_type": { "type": "string", "minLength": 1, "maxLength": 50 },
            "vehicle_size": {
                "type": "string",
                "pattern": "^(?i)(small|medium|big)$",
                "description": "Size class, case-insensitive"
            },
            "owner_name": { "type": "string", "minLength": 1, "maxLength": 100 },
            "owner_phone": {
                "type": "string",
                "pattern": "^[0-9+ ()-]{0,20}$"
            }
        }
    })
}

fn payment_schema_v1() -> serde_json::Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["vehicle_id", "package_id"],
        "additionalProperties": false,
        "properties": {
            "vehicle_id": { "type": "integer", "minimum": 1 },
            "package_id": { "type": "integer", "minimum": 1 }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_schema_accepts_mixed_case_size() {
        let payload = json!({
            "license_plate": "RAB 123C",
            "vehicle_type": "Sedan",
            "vehicle_size": "Medium",
            "owner_name": "Alice",
            "owner_phone": "+250 788 000 000"
        });
        assert!(SCHEMAS.vehicle_v1.is_valid(&payload));
    }

    #[test]
    fn test_vehicle_schema_rejects_unknown_size() {
        let payload = json!({
            "license_plate": "RAB123C",
            "vehicle_type": "Sedan",
            "vehicle_size": "huge",
            "owner_name": "Alice"
        });
        assert!(!SCHEMAS.vehicle_v1.is_valid(&payload));
    }

    #[test]
    fn test_payment_schema_requires_positive_ids() {
        assert!(SCHEMAS.payment_v1.is_valid(&json!({"vehicle_id": 1, "package_id": 2})));
        assert!(!SCHEMAS.payment_v1.is_valid(&json!({"vehicle_id": 0, "package_id": 2})));
        assert!(!SCHEMAS.payment_v1.is_valid(&json!({"vehicle_id": "1", "package_id": 2})));
        assert!(!SCHEMAS.payment_v1.is_valid(&json!({"vehicle_id": 1})));
    }

    #[test]
    fn test_register_schema_rejects_extra_fields() {
        let payload = json!({
            "username": "cashier",
            "password": "secret1",
            "confirm_password": "secret1",
            "role": "admin"
        });
        assert!(!SCHEMAS.register_v1.is_valid(&payload));
    }
}
