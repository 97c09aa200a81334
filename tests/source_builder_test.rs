// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Integration tests for assembling PostgreSQL source properties.

mod test_support;

use assert_matches::assert_matches;
use pg_cdc_source::{
    BuildError, DecodingPlugin, JsonDeserializer, PostgresSourceBuilder, PreparedRuntime,
    SourceBuildError,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use test_case::test_case;
use test_support::{complete_builder, FailingRuntime, RecordingRuntime, SlotInUse};

#[test]
fn test_complete_configuration_properties() {
    let props = complete_builder().build_properties().unwrap();

    let entries: Vec<(&str, &str)> = props.iter().collect();
    assert_eq!(
        entries,
        vec![
            (
                "connector.class",
                "io.debezium.connector.postgresql.PostgresConnector"
            ),
            ("plugin.name", "decoderbufs"),
            ("database.server.name", "postgres-binlog-source"),
            ("database.hostname", "localhost"),
            ("database.dbname", "inventory"),
            ("database.user", "postgres"),
            ("database.password", "postgres"),
            ("database.port", "5432"),
        ]
    );
}

fn without(field: &str) -> PostgresSourceBuilder<Value> {
    let builder = PostgresSourceBuilder::new().deserializer(JsonDeserializer);
    let builder = if field == "hostname" { builder } else { builder.hostname("localhost") };
    let builder = if field == "database" { builder } else { builder.database("inventory") };
    let builder = if field == "username" { builder } else { builder.username("postgres") };
    if field == "password" {
        builder
    } else {
        builder.password("postgres")
    }
}

#[test_case("hostname" ; "hostname")]
#[test_case("database" ; "database")]
#[test_case("username" ; "username")]
#[test_case("password" ; "password")]
fn test_missing_required_field(field: &str) {
    let runtime = RecordingRuntime::default();

    let err = without(field).build(&runtime).unwrap_err();

    assert_matches!(
        err,
        SourceBuildError::Config(BuildError::MissingRequiredField { field: f }) if f == field
    );
    assert_eq!(runtime.call_count(), 0);
}

#[test]
fn test_missing_field_message_names_field() {
    let err = without("database").build_properties().unwrap_err();
    assert_eq!(err.to_string(), "Missing required field 'database'");
}

#[test]
fn test_empty_required_value_is_missing() {
    let err = complete_builder().password("").build_properties().unwrap_err();
    assert_eq!(err.field(), "password");
}

#[test]
fn test_default_and_explicit_port() {
    let props = complete_builder().build_properties().unwrap();
    assert_eq!(props.get("database.port"), Some("5432"));

    let props = complete_builder().port(15432).build_properties().unwrap();
    assert_eq!(props.get("database.port"), Some("15432"));

    let props = complete_builder().port(80).build_properties().unwrap();
    assert_eq!(props.get("database.port"), Some("80"));
}

#[test]
fn test_schema_list_joined_in_order_without_dedup() {
    let props = complete_builder()
        .schema_list(["public", "sales", "public"])
        .build_properties()
        .unwrap();
    assert_eq!(props.get("schema.whitelist"), Some("public,sales,public"));
}

#[test]
fn test_schema_and_table_filters() {
    let props = complete_builder()
        .schema_list(["public", "sales"])
        .table_list(vec![
            "public.orders".to_string(),
            "sales.invoices".to_string(),
        ])
        .build_properties()
        .unwrap();

    assert_eq!(props.get("schema.whitelist"), Some("public,sales"));
    assert_eq!(
        props.get("table.whitelist"),
        Some("public.orders,sales.invoices")
    );
}

#[test]
fn test_filters_absent_by_default() {
    let props = complete_builder().build_properties().unwrap();
    assert!(!props.contains_key("schema.whitelist"));
    assert!(!props.contains_key("table.whitelist"));
}

#[test]
fn test_passthrough_overrides_computed_port() {
    let props = complete_builder()
        .port(5432)
        .properties([("database.port", "9999")])
        .build_properties()
        .unwrap();
    assert_eq!(props.get("database.port"), Some("9999"));
}

#[test]
fn test_passthrough_overrides_fixed_keys_and_adds_new_ones() {
    let props = complete_builder()
        .server_name("orders-cdc")
        .properties([
            ("database.server.name", "patched"),
            ("connector.class", "com.example.Connector"),
            ("slot.name", "orders_slot"),
        ])
        .build_properties()
        .unwrap();

    assert_eq!(props.get("database.server.name"), Some("patched"));
    assert_eq!(props.get("connector.class"), Some("com.example.Connector"));
    assert_eq!(props.get("slot.name"), Some("orders_slot"));
}

#[test]
fn test_server_name_is_configurable() {
    let props = complete_builder()
        .server_name("inventory-primary")
        .build_properties()
        .unwrap();
    assert_eq!(props.get("database.server.name"), Some("inventory-primary"));
}

#[test]
fn test_decoding_plugin_default_and_override() {
    let props = complete_builder().build_properties().unwrap();
    assert_eq!(props.get("plugin.name"), Some("decoderbufs"));

    let props = complete_builder()
        .decoding_plugin_name(DecodingPlugin::Pgoutput)
        .build_properties()
        .unwrap();
    assert_eq!(props.get("plugin.name"), Some("pgoutput"));

    let props = complete_builder()
        .decoding_plugin_name("custom_decoder")
        .build_properties()
        .unwrap();
    assert_eq!(props.get("plugin.name"), Some("custom_decoder"));
}

#[test]
fn test_last_setter_call_wins() {
    let props = complete_builder()
        .hostname("a")
        .hostname("b")
        .schema_list(["first"])
        .schema_list(["second"])
        .build_properties()
        .unwrap();

    assert_eq!(props.get("database.hostname"), Some("b"));
    assert_eq!(props.get("schema.whitelist"), Some("second"));
}

#[test]
fn test_build_hands_properties_to_runtime() {
    let runtime = RecordingRuntime::default();

    let props = complete_builder()
        .table_list(["public.orders"])
        .build(&runtime)
        .unwrap();

    assert_eq!(runtime.call_count(), 1);
    assert_eq!(runtime.calls.borrow()[0], props);
    assert_eq!(props.get("table.whitelist"), Some("public.orders"));
}

#[test]
fn test_runtime_error_is_propagated_unchanged() {
    let err = complete_builder()
        .properties([("slot.name", "orders_slot")])
        .build(&FailingRuntime)
        .unwrap_err();

    assert!(!err.is_config());
    assert_eq!(err.into_runtime(), Some(SlotInUse("orders_slot".to_string())));
}

#[test]
fn test_prepared_source_uses_supplied_deserializer() {
    let source = PostgresSourceBuilder::new()
        .hostname("localhost")
        .database("inventory")
        .username("postgres")
        .password("postgres")
        .deserializer(|record: &pg_cdc_source::ChangeRecord| -> anyhow::Result<String> {
            Ok(record.topic.clone())
        })
        .build(&PreparedRuntime)
        .unwrap();

    let record = pg_cdc_source::ChangeRecord::new(
        "postgres-binlog-source.public.orders",
        serde_json::json!({"op": "u"}),
    );
    assert_eq!(
        source.deserialize(&record).unwrap(),
        "postgres-binlog-source.public.orders"
    );
}
