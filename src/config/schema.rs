use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "llm": {
                "type": "object",
                "properties": {
                    "provider": { "type": "string", "enum": ["openai", "anthropic", "local"] },
                    "model": { "type": "string" },
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string", "format": "uri" }
                }
            },
            "project": {
                "type": "object",
                "properties": {
                    "contract": { "type": "string", "minLength": 1 },
                    "base_template": { "type": "string", "minLength": 1 },
                    "artifact": { "type": "string", "minLength": 1 },
                    "suite_contract": { "$ref": "#/$defs/identifier" },
                    "template_contract": { "$ref": "#/$defs/identifier" }
                }
            },
            "runner": {
                "type": "object",
                "properties": {
                    "binary": { "type": "string", "minLength": 1 },
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "failure_marker": { "type": "string", "minLength": 1 },
                    "project_marker": { "type": "string", "minLength": 1 }
                }
            },
            "repair": {
                "type": "object",
                "properties": {
                    "max_repairs": { "type": "integer", "minimum": 0, "maximum": 10 }
                }
            },
            "oracle": {
                "type": "object",
                "properties": {
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "max_retries": { "type": "integer", "minimum": 0, "maximum": 5 }
                }
            },
            "audit": {
                "type": "object",
                "properties": {
                    "enabled": { "type": "boolean" },
                    "directory": { "type": "string" }
                }
            },
            "prompts_dir": { "type": "string" }
        },
        "$defs": {
            "identifier": { "type": "string", "pattern": "^[A-Za-z_][A-Za-z0-9_]*$" }
        }
    })
});
