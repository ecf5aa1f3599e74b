use serde_json::json;

fn concern_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "condition": { "type": "string" },
            "level": {
                "type": "string",
                "enum": ["LOW", "MEDIUM", "HIGH"]
            }
        },
        "required": ["condition", "level"]
    })
}

/// Returns the JSON schema for single-ingredient analysis responses
pub fn get_ingredient_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "type": "string" },
            "tags": {
                "type": "array",
                "items": { "type": "string" }
            },
            "potential_concerns": {
                "type": "array",
                "items": concern_schema()
            }
        },
        "required": ["type", "tags", "potential_concerns"]
    })
}

/// Returns the JSON schema for itemized product analysis responses
pub fn get_product_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "ingredient_name": { "type": "string" },
                        "type": { "type": "string" },
                        "tags": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "potential_concerns": {
                            "type": "array",
                            "items": concern_schema()
                        }
                    },
                    "required": ["ingredient_name", "type", "tags", "potential_concerns"]
                }
            },
            "summary": { "type": "string" }
        },
        "required": ["items"]
    })
}

pub fn get_ingredient_extraction_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients_text": { "type": "string" }
        },
        "required": ["ingredients_text"]
    })
}
