// Domain layer: models, money handling and ports (interfaces to the payment
// gateway and notification providers).

pub mod model;
pub mod money;
pub mod ports;
