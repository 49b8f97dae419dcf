use serde::{Deserialize, Serialize};

/// Kind of bookable product. Desks aggregate occupancy per slot,
/// rooms track individual bloqueos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductoTipo {
    #[default]
    Sala,
    Mesa,
}

/// A bookable product (meeting room or desk) inside a centro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: String,
    pub nombre: String,
    #[serde(rename = "centroId")]
    pub centro_id: String,
    #[serde(default)]
    pub tipo: ProductoTipo,
    /// Hourly list price in EUR. Absent when the product is not directly
    /// bookable; pricing treats absence as zero-effect.
    #[serde(rename = "priceFrom", default)]
    pub price_from: Option<f64>,
    #[serde(default)]
    pub capacity: Option<u32>,
}
