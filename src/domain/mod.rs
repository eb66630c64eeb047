// Domain layer: entities, typed ids and ports (interfaces).

pub mod ids;
pub mod model;
pub mod period;
pub mod ports;
