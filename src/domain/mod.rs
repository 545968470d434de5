// Domain layer: record types, closed enumerations and ports (interfaces).

pub mod entities;
pub mod enums;
pub mod model;
pub mod ports;
pub mod violation;
