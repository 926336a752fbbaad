//! End-to-end tests: registry mutations through to render-time resolution.

use fieldalias_registry::{AddOutcome, AliasRegistry, AllowAll};
use fieldalias_resolver::AliasTable;
use fieldalias_store::{
    FieldStore, MemoryFieldStore, MemorySettingsStore, RecordId, YamlFieldStore,
    YamlSettingsStore,
};

async fn pricing_registry() -> AliasRegistry<MemoryFieldStore, MemorySettingsStore, AllowAll> {
    let fields = MemoryFieldStore::new();
    fields.insert_record(RecordId(42), "Pricing").await;
    let registry = AliasRegistry::new(fields, MemorySettingsStore::new(), AllowAll);
    registry.select_record(RecordId(42)).await.unwrap();
    registry
}

#[tokio::test]
async fn price_scenario_with_prefix() {
    let registry = pricing_registry().await;

    let outcome = registry
        .add_field(RecordId(42), "price", "19.99", "p")
        .await
        .unwrap();
    assert_eq!(outcome, AddOutcome::Added);

    let config = registry.config().await.unwrap();
    assert_eq!(config.aliases.get("price"), Some(&"ds_p".to_string()));

    let table = AliasTable::from_config(&config).unwrap();
    assert_eq!(
        table.resolve(registry.field_store(), "ds_p").await.unwrap(),
        Some("19.99".to_string())
    );

    // a second add under the same field name is rejected and changes nothing
    let outcome = registry
        .add_field(RecordId(42), "price", "25.00", "q")
        .await
        .unwrap();
    assert_eq!(outcome, AddOutcome::Duplicate);
    assert_eq!(
        table.resolve(registry.field_store(), "ds_p").await.unwrap(),
        Some("19.99".to_string())
    );
    assert!(!registry.config().await.unwrap().alias_in_use("ds_q"));
}

#[tokio::test]
async fn prefix_off_yields_bare_alias() {
    let registry = pricing_registry().await;

    registry
        .add_field(RecordId(42), "price", "19.99", "p")
        .await
        .unwrap();
    registry.set_prefix_enabled(false).await.unwrap();
    registry
        .add_field(RecordId(42), "weight", "2kg", "w")
        .await
        .unwrap();

    let table = AliasTable::from_config(&registry.config().await.unwrap()).unwrap();
    assert!(table.contains("ds_p"));
    assert!(table.contains("w"));
    assert!(!table.contains("ds_w"));
    assert_eq!(
        table.resolve(registry.field_store(), "w").await.unwrap(),
        Some("2kg".to_string())
    );
}

#[tokio::test]
async fn resolution_is_live_without_rebinding() {
    let registry = pricing_registry().await;
    registry
        .add_field(RecordId(42), "price", "19.99", "p")
        .await
        .unwrap();

    let table = AliasTable::from_config(&registry.config().await.unwrap()).unwrap();
    assert_eq!(
        table.resolve(registry.field_store(), "ds_p").await.unwrap(),
        Some("19.99".to_string())
    );

    registry
        .upsert_field_value(RecordId(42), "price", "25.00")
        .await
        .unwrap();

    // same table, fresh read
    assert_eq!(
        table.resolve(registry.field_store(), "ds_p").await.unwrap(),
        Some("25.00".to_string())
    );
}

#[tokio::test]
async fn deleted_field_is_unbound_after_next_bind() {
    let registry = pricing_registry().await;
    registry
        .add_field(RecordId(42), "price", "19.99", "p")
        .await
        .unwrap();

    registry.delete_field(RecordId(42), "price").await.unwrap();

    let table = AliasTable::from_config(&registry.config().await.unwrap()).unwrap();
    assert!(!table.contains("ds_p"));
    assert_eq!(
        table.resolve(registry.field_store(), "ds_p").await.unwrap(),
        None
    );
}

#[tokio::test]
async fn reselecting_record_keeps_existing_bindings_working() {
    let registry = pricing_registry().await;
    registry
        .add_field(RecordId(42), "price", "19.99", "p")
        .await
        .unwrap();

    // bound before the selection changed
    let table = AliasTable::from_config(&registry.config().await.unwrap()).unwrap();

    registry.select_record(RecordId(7)).await.unwrap();

    // resolution is by (field, fixed record) looked up freshly each call, so
    // the old table keeps reading the record it was bound against
    assert_eq!(
        table.resolve(registry.field_store(), "ds_p").await.unwrap(),
        Some("19.99".to_string())
    );
}

#[tokio::test]
async fn file_backed_round_trip() {
    let tmp = tempfile::TempDir::new().unwrap();
    let records_dir = tmp.path().join("records");
    let settings_path = tmp.path().join("settings.yaml");

    {
        let fields = YamlFieldStore::new(records_dir.clone());
        fields.insert_record(RecordId(42), "Pricing").await.unwrap();
        let registry = AliasRegistry::new(
            fields,
            YamlSettingsStore::new(settings_path.clone()),
            AllowAll,
        );
        registry.select_record(RecordId(42)).await.unwrap();
        registry
            .add_field(RecordId(42), "price", "19.99", "p")
            .await
            .unwrap();
    }

    // a fresh process binds from the persisted configuration
    let fields = YamlFieldStore::new(records_dir);
    let registry = AliasRegistry::new(fields, YamlSettingsStore::new(settings_path), AllowAll);
    let table = AliasTable::from_config(&registry.config().await.unwrap()).unwrap();

    assert_eq!(
        table.resolve(registry.field_store(), "ds_p").await.unwrap(),
        Some("19.99".to_string())
    );
}

#[tokio::test]
async fn dyn_store_resolution() {
    // the host hands the resolver its field store behind a trait object
    let store = MemoryFieldStore::new();
    store.set_field(RecordId(42), "price", "19.99").await.unwrap();
    let store: &dyn FieldStore = &store;

    let table = AliasTable::bind(
        RecordId(42),
        &[("price".to_string(), "ds_p".to_string())].into_iter().collect(),
    );
    assert_eq!(
        table.resolve(store, "ds_p").await.unwrap(),
        Some("19.99".to_string())
    );
}
