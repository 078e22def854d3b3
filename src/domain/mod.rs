// Domain layer: value types and the ports the facade depends on. No SDK types leak in here.

pub mod model;
pub mod ports;
