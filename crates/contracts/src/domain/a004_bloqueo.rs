use serde::{Deserialize, Serialize};

/// Availability record for one product on one day ("bloqueo").
/// Supplied by the backend, read-only on the client. `fecha_ini` /
/// `fecha_fin` are local-time ISO datetimes without timezone suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Bloqueo {
    #[serde(rename = "fechaIni")]
    pub fecha_ini: String,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: String,
    /// Free-text status label; the client maps it to a closed enum by
    /// substring heuristics.
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub cliente: Option<String>,
    #[serde(default)]
    pub producto: Option<String>,
    #[serde(default)]
    pub centro: Option<String>,
}
