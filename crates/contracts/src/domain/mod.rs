pub mod a001_centro;
pub mod a002_producto;
pub mod a003_contacto;
pub mod a004_bloqueo;
pub mod a005_booking;
pub mod a006_invoice;
