// Domain layer: models and ports (interfaces). Concrete HTTP and filesystem code lives elsewhere.

pub mod model;
pub mod ports;
