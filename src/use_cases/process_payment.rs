//! Process payment use case.
//! Validates the request and hands it to the transactional payment writer.

use crate::domain::{Payment, PaymentRequest, PricingTable};
use crate::ports::{PaymentRepository, RepositoryError};
use std::sync::Arc;

/// Input for the ProcessPayment use case.
#[derive(Debug, Clone, Copy)]
pub struct PaymentInput {
    pub vehicle_id: i64,
    pub package_id: i64,
    pub operator_id: i64,
}

/// Use case for settling a vehicle's stay.
pub struct ProcessPayment {
    payment_repository: Arc<dyn PaymentRepository>,
    pricing: Arc<PricingTable>,
}

impl ProcessPayment {
    pub fn new(payment_repository: Arc<dyn PaymentRepository>, pricing: Arc<PricingTable>) -> Self {
        Self {
            payment_repository,
            pricing,
        }
    }

    pub async fn execute(&self, input: PaymentInput) -> Result<Payment, RepositoryError> {
        if input.vehicle_id <= 0 {
            return Err(RepositoryError::NotFound(format!(
                "Vehicle {} not found",
                input.vehicle_id
            )));
        }
        if input.package_id <= 0 {
            return Err(RepositoryError::NotFound(format!(
                "Package {} not found",
                input.package_id
            )));
        }

        let request = PaymentRequest {
            vehicle_id: input.vehicle_id,
            package_id: input.package_id,
            operator_id: input.operator_id,
        };

        match self.payment_repository.record_payment(request, &self.pricing).await {
            Ok(payment) => Ok(payment),
            Err(e) => {
                match &e {
                    RepositoryError::Database(db_err) => tracing::error!(
                        vehicle_id = input.vehicle_id,
                        error = %db_err,
                        "Payment transaction rolled back"
                    ),
                    other => tracing::warn!(
                        vehicle_id = input.vehicle_id,
                        package_id = input.package_id,
                        reason = %other,
                        "Payment rejected"
                    ),
                }
                Err(e)
            }
        }
    }
}
