use schemars::{Schema, schema_for};
use teleops_core::entities::{DesignItem, DesignVersion, EquipmentEntry, PermissionText, ResourceType};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

const TYPE_NAMES: &[&str] = &[
    "design-version",
    "design-item",
    "resource-type",
    "equipment-entry",
    "permission-text",
];

/// Handle `teleops schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_for_name(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_for_name(type_name: &str) -> anyhow::Result<Schema> {
    let schema = match type_name {
        "design-version" => schema_for!(DesignVersion),
        "design-item" => schema_for!(DesignItem),
        "resource-type" => schema_for!(ResourceType),
        "equipment-entry" => schema_for!(EquipmentEntry),
        "permission-text" => schema_for!(PermissionText),
        other => anyhow::bail!(
            "unknown schema type '{other}' (expected one of: {})",
            TYPE_NAMES.join(", ")
        ),
    };
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_type_resolves() {
        for name in TYPE_NAMES {
            let schema = schema_for_name(name).unwrap();
            let value = serde_json::to_value(&schema).unwrap();
            assert!(value.get("properties").is_some(), "{name} has no properties");
        }
    }

    #[test]
    fn design_item_schema_names_sort_order() {
        let value = serde_json::to_value(schema_for_name("design-item").unwrap()).unwrap();
        assert!(value["properties"].get("sort_order").is_some());
    }

    #[test]
    fn unknown_type_lists_choices() {
        let err = schema_for_name("tenant").unwrap_err();
        assert!(err.to_string().contains("design-version"));
    }
}
