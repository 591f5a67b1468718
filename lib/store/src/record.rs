use serde::{de::DeserializeOwned, Serialize};

/// Trait implemented by models to declare how they are stored.
///
/// Each record lives under `{kind}{key}` in the KV layer, JSON-encoded.
/// Hooks have default no-op impls.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// KV key prefix: "{module}:{collection}:".
    fn kind() -> &'static str;

    /// Human-readable collection name, used in error messages.
    fn label() -> &'static str;

    /// Extract the key value from this instance.
    fn key(&self) -> String;

    /// Called before inserting a new record. Use for auto-fill (id, timestamps).
    fn before_create(&mut self) {}

    /// Called before updating an existing record.
    fn before_update(&mut self) {}
}
