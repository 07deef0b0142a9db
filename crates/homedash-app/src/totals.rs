// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{Booking, Customer, CustomerStatus, Invoice, InvoiceStatus};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerTotals {
    pub total: usize,
    pub active: usize,
    pub total_spent: f64,
}

impl CustomerTotals {
    pub fn from_customers(customers: &[Customer]) -> Self {
        Self {
            total: customers.len(),
            active: customers
                .iter()
                .filter(|customer| customer.status == CustomerStatus::Active)
                .count(),
            total_spent: customers.iter().map(|customer| customer.total_spent).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub total_revenue: f64,
    pub pending_amount: f64,
}

impl InvoiceTotals {
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        let sum_where = |status: InvoiceStatus| -> f64 {
            invoices
                .iter()
                .filter(|invoice| invoice.status == status)
                .map(|invoice| invoice.amount)
                .sum()
        };
        Self {
            total_revenue: sum_where(InvoiceStatus::Paid),
            pending_amount: sum_where(InvoiceStatus::Unpaid),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRevenue {
    pub service: String,
    pub revenue: f64,
    /// Whole-number share of total revenue.
    pub percentage: u32,
}

/// Booking amounts grouped by service name, highest revenue first. Ties keep
/// first-seen order.
pub fn revenue_by_service(bookings: &[Booking]) -> Vec<ServiceRevenue> {
    let mut rows: Vec<ServiceRevenue> = Vec::new();
    for booking in bookings {
        let amount = booking.amount.unwrap_or(0.0);
        match rows.iter_mut().find(|row| row.service == booking.service_name) {
            Some(row) => row.revenue += amount,
            None => rows.push(ServiceRevenue {
                service: booking.service_name.clone(),
                revenue: amount,
                percentage: 0,
            }),
        }
    }

    let total: f64 = rows.iter().map(|row| row.revenue).sum();
    if total > 0.0 {
        for row in &mut rows {
            row.percentage = ((row.revenue / total) * 100.0).round() as u32;
        }
    }
    rows.sort_by(|left, right| right.revenue.total_cmp(&left.revenue));
    rows
}

#[cfg(test)]
mod tests {
    use super::{CustomerTotals, InvoiceTotals, revenue_by_service};
    use crate::ids::RecordId;
    use crate::model::{Booking, Customer, CustomerStatus, Invoice, InvoiceStatus};
    use time::macros::date;

    fn booking(service: &str, amount: Option<f64>) -> Booking {
        Booking {
            id: RecordId::from(service),
            customer_name: None,
            customer_number: None,
            city: String::new(),
            service_name: service.to_owned(),
            booking_date: None,
            booking_time: String::new(),
            status: "completed".to_owned(),
            amount,
        }
    }

    #[test]
    fn customer_totals_count_active_and_sum_spend() {
        let base = Customer {
            id: RecordId::from("C1"),
            name: "Asha Rao".to_owned(),
            email: String::new(),
            phone: String::new(),
            joined_date: date!(2024 - 01 - 01),
            total_bookings: 2,
            total_spent: 1000.0,
            status: CustomerStatus::Active,
        };
        let blocked = Customer {
            id: RecordId::from("C2"),
            total_spent: 250.5,
            status: CustomerStatus::Blocked,
            ..base.clone()
        };
        let totals = CustomerTotals::from_customers(&[base, blocked]);
        assert_eq!(totals.total, 2);
        assert_eq!(totals.active, 1);
        assert_eq!(totals.total_spent, 1250.5);
    }

    #[test]
    fn invoice_totals_split_paid_and_unpaid() {
        let make = |id: &str, amount: f64, status| Invoice {
            id: RecordId::from(id),
            customer_name: "Asha Rao".to_owned(),
            date: date!(2024 - 01 - 01),
            due_date: date!(2024 - 01 - 15),
            amount,
            status,
        };
        let totals = InvoiceTotals::from_invoices(&[
            make("INV-1", 1000.0, InvoiceStatus::Paid),
            make("INV-2", 500.0, InvoiceStatus::Unpaid),
            make("INV-3", 300.0, InvoiceStatus::Failed),
            make("INV-4", 200.0, InvoiceStatus::Paid),
        ]);
        assert_eq!(totals.total_revenue, 1200.0);
        assert_eq!(totals.pending_amount, 500.0);
    }

    #[test]
    fn revenue_groups_by_service_and_sorts_descending() {
        let rows = revenue_by_service(&[
            booking("Pest Control", Some(300.0)),
            booking("Deep Cleaning", Some(500.0)),
            booking("Pest Control", Some(300.0)),
            booking("Movers", None),
        ]);
        let names: Vec<_> = rows.iter().map(|row| row.service.as_str()).collect();
        assert_eq!(names, vec!["Pest Control", "Deep Cleaning", "Movers"]);
        assert_eq!(rows[0].revenue, 600.0);
        assert_eq!(rows[0].percentage, 55);
        assert_eq!(rows[1].percentage, 45);
        assert_eq!(rows[2].percentage, 0);
    }

    #[test]
    fn revenue_of_no_bookings_is_empty() {
        assert!(revenue_by_service(&[]).is_empty());
    }
}
