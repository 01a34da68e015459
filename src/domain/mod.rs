// Domain layer: the catalog, its entities and the ports the pipeline talks through.

pub mod catalog;
pub mod manufacturer;
pub mod model;
pub mod ports;
pub mod report;
