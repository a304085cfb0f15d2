pub mod process_payment;

pub use process_payment::{PaymentInput, ProcessPayment};
