//! Encoding of domain records into the text blobs providers store.

use guilds_model::{Arena, GuildChallenge};
use serde::{de::DeserializeOwned, Serialize};

use crate::persistence::PersistenceError;

/// Trait for records that can be handed to a provider.
pub trait Storable: Serialize + DeserializeOwned {
    /// The key the record is stored under.
    fn record_id(&self) -> String;
}

impl Storable for Arena {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Storable for GuildChallenge {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

/// Encode/decode capability injected into the adapters.
pub trait RecordCodec: Send + Sync {
    fn encode<T: Storable>(&self, record: &T) -> Result<String, PersistenceError>;
    fn decode<T: Storable>(&self, data: &str) -> Result<T, PersistenceError>;
}

/// serde_json codec. Compact by default; pretty output is easier to hand-edit
/// in the JSON backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl RecordCodec for JsonCodec {
    fn encode<T: Storable>(&self, record: &T) -> Result<String, PersistenceError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        };
        Ok(json)
    }

    fn decode<T: Storable>(&self, data: &str) -> Result<T, PersistenceError> {
        Ok(serde_json::from_str(data)?)
    }
}
