pub mod payment;
pub mod pricing;
pub mod vehicle;

pub use payment::{Payment, PaymentRequest};
pub use pricing::{PricingError, PricingTable};
pub use vehicle::{PaymentStatus, VehicleDetails, VehicleSize};
