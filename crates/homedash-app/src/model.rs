// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Booking,
    Customer,
    Invoice,
    Service,
}

impl RecordKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Customer => "customer",
            Self::Invoice => "invoice",
            Self::Service => "service",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Booking => "Booking",
            Self::Customer => "Customer",
            Self::Invoice => "Invoice",
            Self::Service => "Service",
        }
    }

    pub const fn plural(self) -> &'static str {
        match self {
            Self::Booking => "bookings",
            Self::Customer => "customers",
            Self::Invoice => "invoices",
            Self::Service => "services",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerStatus {
    Active,
    Blocked,
}

impl CustomerStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Blocked,
            Self::Blocked => Self::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    Failed,
}

impl InvoiceStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(Self::Paid),
            "unpaid" => Some(Self::Unpaid),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageKind {
    Bookings,
    Customers,
    Invoices,
    Services,
    Financial,
    Settings,
}

impl PageKind {
    pub const ALL: [Self; 6] = [
        Self::Bookings,
        Self::Customers,
        Self::Invoices,
        Self::Services,
        Self::Financial,
        Self::Settings,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bookings => "bookings",
            Self::Customers => "customers",
            Self::Invoices => "invoices",
            Self::Services => "services",
            Self::Financial => "financial",
            Self::Settings => "settings",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Bookings => "Bookings Management",
            Self::Customers => "Customers Management",
            Self::Invoices => "Invoices Management",
            Self::Services => "Services Management",
            Self::Financial => "Financial Management",
            Self::Settings => "Settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.label() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: RecordId,
    pub customer_name: Option<String>,
    pub customer_number: Option<String>,
    pub city: String,
    pub service_name: String,
    pub booking_date: Option<String>,
    pub booking_time: String,
    pub status: String,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub joined_date: Date,
    pub total_bookings: u32,
    pub total_spent: f64,
    pub status: CustomerStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: RecordId,
    pub customer_name: String,
    pub date: Date,
    pub due_date: Date,
    pub amount: f64,
    pub status: InvoiceStatus,
}

pub const SERVICE_DEFAULT_CATEGORY: &str = "General";
pub const SERVICE_DEFAULT_DURATION_MINUTES: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub details: String,
    pub image: String,
    pub price: f64,
    pub rating: f64,
    pub booking_count: u64,
    pub duration_minutes: u32,
    pub category: String,
    pub tags: Vec<String>,
    pub available: bool,
}

impl Service {
    pub const fn availability(&self) -> &'static str {
        if self.available {
            "available"
        } else {
            "unavailable"
        }
    }
}

/// Column layout used by table renderers.
pub trait Tabular {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl Tabular for Booking {
    const COLUMNS: &'static [&'static str] = &[
        "Id",
        "Customer Name",
        "Phone Number",
        "City",
        "Service Name",
        "Booking Date",
        "Booking Time",
        "Booking Status",
        "Amount",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_name.clone().unwrap_or_default(),
            self.customer_number.clone().unwrap_or_default(),
            self.city.clone(),
            self.service_name.clone(),
            self.booking_date
                .as_deref()
                .map(display_date)
                .unwrap_or_else(|| "N/A".to_owned()),
            self.booking_time.clone(),
            self.status.clone(),
            format_rupees(self.amount.unwrap_or(0.0)),
        ]
    }
}

impl Tabular for Customer {
    const COLUMNS: &'static [&'static str] = &[
        "Id",
        "Customer",
        "Email",
        "Phone",
        "Joined",
        "Bookings",
        "Total Spent",
        "Status",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.joined_date.to_string(),
            self.total_bookings.to_string(),
            format_rupees(self.total_spent),
            self.status.as_str().to_owned(),
        ]
    }
}

impl Tabular for Invoice {
    const COLUMNS: &'static [&'static str] = &[
        "Invoice ID",
        "Customer",
        "Date",
        "Due Date",
        "Amount",
        "Status",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_name.clone(),
            self.date.to_string(),
            self.due_date.to_string(),
            format_rupees(self.amount),
            self.status.as_str().to_owned(),
        ]
    }
}

impl Tabular for Service {
    const COLUMNS: &'static [&'static str] = &[
        "Id", "Title", "Category", "Price", "Rating", "Bookings", "Status",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.category.clone(),
            format_rupees(self.price),
            format!("{}", self.rating),
            self.booking_count.to_string(),
            if self.available {
                "Available".to_owned()
            } else {
                "Unavailable".to_owned()
            },
        ]
    }
}

/// Formats an amount with a rupee sign and comma thousands grouping. Whole
/// amounts drop the fractional part.
pub fn format_rupees(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}\u{20b9}{grouped}")
    } else {
        format!("{sign}\u{20b9}{grouped}.{fraction:02}")
    }
}

/// Shows the calendar part of an ISO date or timestamp; anything unparseable
/// is passed through as-is.
pub fn display_date(raw: &str) -> String {
    let candidate = raw.get(..10).unwrap_or(raw);
    match Date::parse(
        candidate,
        &time::macros::format_description!("[year]-[month]-[day]"),
    ) {
        Ok(date) => date.to_string(),
        Err(_) => raw.to_owned(),
    }
}
