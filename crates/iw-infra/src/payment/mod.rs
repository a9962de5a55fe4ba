mod simulated_payments;

pub use simulated_payments::{SimulatedPaymentProcessor, DECLINE_CARD};
