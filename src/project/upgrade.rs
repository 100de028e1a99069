//! @ai:module:intent Fold legacy payments into the invoice model
//! @ai:module:layer domain
//! @ai:module:public_api Project::upgrade_legacy_payments
//! @ai:module:stateless true

use crate::project::edit::next_id;
use crate::project::model::{Invoice, InvoiceStatus, Project};
use std::collections::HashSet;

impl Project {
    /// @ai:intent Convert every legacy payment into a Paid invoice
    /// @ai:post self.payments is empty
    /// @ai:post sum of paid invoice amounts grows by the sum of former payments
    /// @ai:idempotent true
    /// @ai:effects state:write
    /// Returns how many payments were converted.
    pub fn upgrade_legacy_payments(&mut self) -> usize {
        if self.payments.is_empty() {
            return 0;
        }

        let mut taken: HashSet<u64> = self.invoices.iter().map(|i| i.id).collect();
        let payments = std::mem::take(&mut self.payments);
        let converted = payments.len();

        for payment in payments {
            let id = if payment.id == 0 || taken.contains(&payment.id) {
                next_id(taken.iter().copied())
            } else {
                payment.id
            };
            taken.insert(id);

            self.invoices.push(Invoice {
                id,
                amount: payment.amount,
                date: payment.date,
                description: payment.description,
                status: InvoiceStatus::Paid,
            });
        }

        converted
    }
}

#[cfg(test)]
mod tests {
    use crate::project::model::{Invoice, InvoiceStatus, Payment, Project};

    fn payment(id: u64, amount: f64) -> Payment {
        Payment {
            id,
            amount,
            description: format!("Payment {}", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_payments_become_paid_invoices() {
        let mut project = Project::new(1, "Porch", 8000.0);
        project.payments = vec![payment(1, 2000.0), payment(2, 500.0)];

        assert_eq!(project.upgrade_legacy_payments(), 2);

        assert!(project.payments.is_empty());
        assert_eq!(project.invoices.len(), 2);
        assert!(project.invoices.iter().all(|i| i.status == InvoiceStatus::Paid));
        assert_eq!(project.invoices[0].description, "Payment 1");
    }

    #[test]
    fn test_colliding_ids_are_reassigned() {
        let mut project = Project::new(1, "Porch", 8000.0);
        project.invoices.push(Invoice {
            id: 5,
            amount: 100.0,
            ..Default::default()
        });
        project.payments = vec![payment(5, 300.0)];

        project.upgrade_legacy_payments();

        assert_eq!(project.invoices.len(), 2);
        assert_ne!(project.invoices[0].id, project.invoices[1].id);
        assert_eq!(project.invoices[1].amount, 300.0);
    }

    #[test]
    fn test_upgrade_is_idempotent() {
        let mut project = Project::new(1, "Porch", 8000.0);
        project.payments = vec![payment(1, 2000.0)];

        project.upgrade_legacy_payments();
        let once = project.clone();
        assert_eq!(project.upgrade_legacy_payments(), 0);
        assert_eq!(project, once);
    }
}
