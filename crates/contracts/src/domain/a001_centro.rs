use serde::{Deserialize, Serialize};

/// A BeWorking location ("centro"). Catalog entity, read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Centro {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
}
