// Domain layer: curriculum records and the read-only lookup port.

pub mod model;
pub mod ports;
