pub mod a001_centro;
pub mod a002_producto;
pub mod a003_contacto;
