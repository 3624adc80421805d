// Domain layer: the draft model and capability ports. No I/O here.

pub mod model;
pub mod ports;
