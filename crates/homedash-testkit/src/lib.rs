// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use homedash_app::{
    AggregateSummary, Booking, Customer, CustomerStatus, Invoice, InvoiceStatus, Record, RecordId,
    RecordSource, SERVICE_DEFAULT_CATEGORY, SERVICE_DEFAULT_DURATION_MINUTES, Service,
    ServiceFormInput, SummaryKind, SummarySource,
};
use serde_json::{Map, Value, json};
use time::{Date, Duration, Month};

const FIRST_NAMES: [&str; 16] = [
    "Asha", "Ben", "Chitra", "Dev", "Esha", "Farhan", "Gauri", "Harsh", "Ira", "Jai", "Kavya",
    "Lakshmi", "Mohan", "Nisha", "Omkar", "Priya",
];
const LAST_NAMES: [&str; 14] = [
    "Rao", "Ito", "Iyer", "Sharma", "Patel", "Khan", "Menon", "Das", "Nair", "Kulkarni", "Reddy",
    "Bose", "Gupta", "Joshi",
];
const CITIES: [&str; 8] = [
    "Pune",
    "Mumbai",
    "Bengaluru",
    "Hyderabad",
    "Chennai",
    "Delhi",
    "Kolkata",
    "Ahmedabad",
];
const EMAIL_DOMAINS: [&str; 4] = ["example.in", "mail.test", "homeowners.local", "inbox.dev"];

const SERVICE_CATALOG: [(&str, &str, f64); 10] = [
    ("Residential Cleaning", "Cleaning", 1499.0),
    ("Sofa Cleaning", "Cleaning", 799.0),
    ("Commercial Cleaning", "Cleaning", 4999.0),
    ("Termite Control", "Pest Control", 2199.0),
    ("Cockroach Control", "Pest Control", 999.0),
    ("Packers & Movers", "Moving", 8999.0),
    ("AC Servicing", "Appliance", 699.0),
    ("Washing Machine Repair", "Appliance", 549.0),
    ("Bathroom Plumbing", "Plumbing", 449.0),
    ("Wall Painting", "Painting", 12999.0),
];
const BOOKING_STATUSES: [&str; 4] = ["pending", "confirmed", "completed", "cancelled"];
const BOOKING_TIMES: [&str; 6] = [
    "09:00 AM", "10:30 AM", "12:00 PM", "02:00 PM", "04:30 PM", "06:00 PM",
];

const REFERENCE_YEAR: i32 = 2025;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for dashboard records. The same seed yields the same
/// sequence.
#[derive(Debug, Clone)]
pub struct DashFaker {
    rng: DeterministicRng,
    sequence: u64,
}

impl DashFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            sequence: 0,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn customer(&mut self) -> Customer {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&EMAIL_DOMAINS);
        let total_bookings = self.int_range(0, 25) as u32;
        let total_spent = f64::from(total_bookings) * self.int_range(400, 3000) as f64;
        let status = if self.int_n(5) == 0 {
            CustomerStatus::Blocked
        } else {
            CustomerStatus::Active
        };
        Customer {
            id: self.next_id("CUST"),
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}@{domain}",
                first.to_ascii_lowercase(),
                last.to_ascii_lowercase()
            ),
            phone: self.phone(),
            joined_date: self.date_in_year(REFERENCE_YEAR - 1),
            total_bookings,
            total_spent,
            status,
        }
    }

    pub fn invoice(&mut self) -> Invoice {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let date = self.date_in_year(REFERENCE_YEAR);
        let status = match self.int_n(4) {
            0 => InvoiceStatus::Unpaid,
            1 => InvoiceStatus::Failed,
            _ => InvoiceStatus::Paid,
        };
        Invoice {
            id: self.next_id("INV"),
            customer_name: format!("{first} {last}"),
            date,
            due_date: date + Duration::days(15),
            amount: self.int_range(500, 15_000) as f64,
            status,
        }
    }

    pub fn service(&mut self) -> Service {
        let (title, category, price) = SERVICE_CATALOG[self.int_n(SERVICE_CATALOG.len())];
        Service {
            id: self.next_id("SRV"),
            title: title.to_owned(),
            description: format!("Professional {} at your doorstep", title.to_lowercase()),
            details: String::new(),
            image: format!(
                "https://images.example/services/{}.jpg",
                title.to_ascii_lowercase().replace([' ', '&'], "-")
            ),
            price,
            rating: f64::from(self.int_range(30, 50) as u32) / 10.0,
            booking_count: self.int_range(0, 400) as u64,
            duration_minutes: SERVICE_DEFAULT_DURATION_MINUTES,
            category: category.to_owned(),
            tags: Vec::new(),
            available: self.int_n(6) != 0,
        }
    }

    pub fn booking(&mut self) -> Booking {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let (service, _, price) = SERVICE_CATALOG[self.int_n(SERVICE_CATALOG.len())];
        let has_number = self.int_n(10) != 0;
        Booking {
            id: self.next_id("BK"),
            customer_name: Some(format!("{first} {last}")),
            customer_number: has_number.then(|| self.phone()),
            city: self.pick(&CITIES).to_owned(),
            service_name: service.to_owned(),
            booking_date: Some(self.date_in_year(REFERENCE_YEAR).to_string()),
            booking_time: self.pick(&BOOKING_TIMES).to_owned(),
            status: self.pick(&BOOKING_STATUSES).to_owned(),
            amount: Some(price),
        }
    }

    pub fn customers(&mut self, count: usize) -> Vec<Customer> {
        (0..count).map(|_| self.customer()).collect()
    }

    pub fn invoices(&mut self, count: usize) -> Vec<Invoice> {
        (0..count).map(|_| self.invoice()).collect()
    }

    pub fn services(&mut self, count: usize) -> Vec<Service> {
        (0..count).map(|_| self.service()).collect()
    }

    pub fn bookings(&mut self, count: usize) -> Vec<Booking> {
        (0..count).map(|_| self.booking()).collect()
    }

    pub fn date_in_year(&mut self, year: i32) -> Date {
        let start = Date::from_calendar_date(year, Month::January, 1).unwrap_or(Date::MIN);
        start + Duration::days(self.int_n(365) as i64)
    }

    fn phone(&mut self) -> String {
        format!(
            "+91 {:05} {:05}",
            self.int_range(70_000, 99_999),
            self.int_range(0, 99_999)
        )
    }

    fn next_id(&mut self, prefix: &str) -> RecordId {
        self.sequence += 1;
        RecordId::new(format!("{prefix}-{:03}", self.sequence))
    }

    fn pick<'a>(&mut self, values: &'a [&'a str]) -> &'a str {
        values[self.int_n(values.len())]
    }

    fn int_range(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        low + self.int_n((high - low + 1) as usize) as i64
    }
}

/// The customer list the dashboard ships with while the customers endpoint
/// is not wired.
pub fn mock_customers() -> Vec<Customer> {
    let customer = |id: &str,
                    name: &str,
                    email: &str,
                    phone: &str,
                    joined: Date,
                    bookings: u32,
                    spent: f64,
                    status: CustomerStatus| Customer {
        id: RecordId::from(id),
        name: name.to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
        joined_date: joined,
        total_bookings: bookings,
        total_spent: spent,
        status,
    };
    vec![
        customer(
            "C1",
            "Asha Rao",
            "asha.rao@example.in",
            "+91 98450 12345",
            calendar_date(2024, Month::January, 12),
            12,
            18_450.0,
            CustomerStatus::Active,
        ),
        customer(
            "C2",
            "Ben Ito",
            "ben.ito@example.in",
            "+91 99000 54321",
            calendar_date(2024, Month::March, 3),
            3,
            4_200.0,
            CustomerStatus::Blocked,
        ),
        customer(
            "C3",
            "Chitra Iyer",
            "chitra.iyer@example.in",
            "+91 90080 11223",
            calendar_date(2024, Month::June, 21),
            7,
            9_870.0,
            CustomerStatus::Active,
        ),
        customer(
            "C4",
            "Dev Sharma",
            "dev.sharma@example.in",
            "+91 97310 44556",
            calendar_date(2024, Month::September, 9),
            1,
            799.0,
            CustomerStatus::Active,
        ),
    ]
}

pub fn mock_invoices() -> Vec<Invoice> {
    let invoice = |id: &str, name: &str, date: Date, amount: f64, status| Invoice {
        id: RecordId::from(id),
        customer_name: name.to_owned(),
        date,
        due_date: date + Duration::days(15),
        amount,
        status,
    };
    vec![
        invoice(
            "INV-001",
            "Asha Rao",
            calendar_date(2025, Month::January, 5),
            2_499.0,
            InvoiceStatus::Paid,
        ),
        invoice(
            "INV-002",
            "Ben Ito",
            calendar_date(2025, Month::January, 11),
            1_200.0,
            InvoiceStatus::Unpaid,
        ),
        invoice(
            "INV-003",
            "Chitra Iyer",
            calendar_date(2025, Month::February, 2),
            8_999.0,
            InvoiceStatus::Failed,
        ),
        invoice(
            "INV-004",
            "Dev Sharma",
            calendar_date(2025, Month::February, 14),
            799.0,
            InvoiceStatus::Paid,
        ),
    ]
}

/// Builds the record a backend would echo for a submitted service form.
pub fn service_from_form(form: &ServiceFormInput, id: RecordId) -> Service {
    let lenient = |raw: &str| raw.trim().parse::<f64>().ok().filter(|value| value.is_finite());
    Service {
        id,
        title: form.service_name.clone(),
        description: form.service_description.clone(),
        details: form.service_details.clone(),
        image: form.service_image_url.clone(),
        price: lenient(&form.service_cost).unwrap_or(0.0),
        rating: lenient(&form.rating).unwrap_or(0.0),
        booking_count: lenient(&form.rating_count).map_or(0, |count| count.max(0.0) as u64),
        duration_minutes: SERVICE_DEFAULT_DURATION_MINUTES,
        category: if form.service_type.is_empty() {
            SERVICE_DEFAULT_CATEGORY.to_owned()
        } else {
            form.service_type.clone()
        },
        tags: Vec::new(),
        available: form.active == "Y",
    }
}

type Creator<R> = Box<dyn FnMut(&<R as Record>::Draft, usize) -> Result<R>>;

/// In-memory backend that records every call made against it.
pub struct MemorySource<R: Record> {
    rows: Vec<R>,
    creator: Option<Creator<R>>,
    fail_loads: bool,
    fail_writes: bool,
    pub loads: usize,
    pub creates: usize,
    pub deletes: Vec<RecordId>,
}

impl<R: Record> MemorySource<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows,
            creator: None,
            fail_loads: false,
            fail_writes: false,
            loads: 0,
            creates: 0,
            deletes: Vec::new(),
        }
    }

    pub fn with_creator(
        mut self,
        creator: impl FnMut(&R::Draft, usize) -> Result<R> + 'static,
    ) -> Self {
        self.creator = Some(Box::new(creator));
        self
    }

    pub fn failing_loads(mut self) -> Self {
        self.fail_loads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Total calls of any kind.
    pub fn calls(&self) -> usize {
        self.loads + self.creates + self.deletes.len()
    }
}

impl MemorySource<Service> {
    pub fn services(rows: Vec<Service>) -> Self {
        Self::new(rows).with_creator(|form, sequence| {
            Ok(service_from_form(
                form,
                RecordId::new(format!("SRV-NEW-{sequence}")),
            ))
        })
    }
}

impl<R: Record> RecordSource<R> for MemorySource<R> {
    fn load(&mut self) -> Result<Vec<R>> {
        self.loads += 1;
        if self.fail_loads {
            bail!("network error: connection refused");
        }
        Ok(self.rows.clone())
    }

    fn create(&mut self, draft: &R::Draft) -> Result<R> {
        self.creates += 1;
        if self.fail_writes {
            bail!("server returned 500");
        }
        let sequence = self.creates;
        let Some(creator) = self.creator.as_mut() else {
            bail!("{} cannot be created from this dashboard", R::KIND.plural());
        };
        let record = creator(draft, sequence)?;
        self.rows.insert(0, record.clone());
        Ok(record)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        self.deletes.push(id.clone());
        if self.fail_writes {
            bail!("server returned 500");
        }
        let Some(index) = self.rows.iter().position(|row| row.id() == id) else {
            bail!("server error (404): {} {id} not found", R::KIND.as_str());
        };
        self.rows.remove(index);
        Ok(())
    }
}

/// Overview and statistics computed from a fixed booking list.
#[derive(Debug, Clone)]
pub struct FixtureSummary {
    bookings: Vec<Booking>,
}

impl FixtureSummary {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }
}

impl SummarySource for FixtureSummary {
    fn fetch_summary(&mut self, kind: SummaryKind, time_period: &str) -> Result<AggregateSummary> {
        let count_status = |status: &str| {
            self.bookings
                .iter()
                .filter(|booking| booking.status == status)
                .count()
        };
        let mut fields = Map::new();
        fields.insert("timePeriod".to_owned(), json!(time_period));
        match kind {
            SummaryKind::Overview => {
                let revenue: f64 = self
                    .bookings
                    .iter()
                    .filter_map(|booking| booking.amount)
                    .sum();
                fields.insert("totalBookings".to_owned(), json!(self.bookings.len()));
                fields.insert("totalRevenue".to_owned(), json!(revenue));
            }
            SummaryKind::Statistics => {
                for status in BOOKING_STATUSES {
                    fields.insert(status.to_owned(), Value::from(count_status(status)));
                }
            }
        }
        Ok(AggregateSummary::new(fields))
    }
}

fn calendar_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN)
}

#[cfg(test)]
mod tests {
    use super::{
        DashFaker, FixtureSummary, MemorySource, mock_customers, mock_invoices, service_from_form,
    };
    use anyhow::Result;
    use homedash_app::{
        CustomerStatus, RecordId, RecordSource, ServiceFormInput, SummaryKind, SummarySource,
    };
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let mut left = DashFaker::new(42);
        let mut right = DashFaker::new(42);
        assert_eq!(left.customers(5), right.customers(5));
        assert_eq!(left.bookings(5), right.bookings(5));
    }

    #[test]
    fn zero_seed_is_normalized() {
        let mut zero = DashFaker::new(0);
        let mut one = DashFaker::new(1);
        assert_eq!(zero.service(), one.service());
    }

    #[test]
    fn ids_are_unique_across_kinds() {
        let mut faker = DashFaker::new(7);
        let mut ids = BTreeSet::new();
        for customer in faker.customers(20) {
            assert!(ids.insert(customer.id));
        }
        for invoice in faker.invoices(20) {
            assert!(ids.insert(invoice.id));
        }
    }

    #[test]
    fn invoices_fall_due_after_issue() {
        let mut faker = DashFaker::new(3);
        for invoice in faker.invoices(30) {
            assert!(invoice.due_date > invoice.date, "invoice {}", invoice.id);
            assert!((500.0..=15_000.0).contains(&invoice.amount));
        }
    }

    #[test]
    fn services_use_catalog_prices_and_ratings() {
        let mut faker = DashFaker::new(11);
        for service in faker.services(30) {
            assert!(!service.title.is_empty());
            assert!(service.price > 0.0);
            assert!((3.0..=5.0).contains(&service.rating), "{}", service.rating);
            assert_eq!(service.duration_minutes, 60);
        }
    }

    #[test]
    fn mock_customers_include_the_reference_pair() {
        let customers = mock_customers();
        assert_eq!(customers[0].name, "Asha Rao");
        assert_eq!(customers[0].status, CustomerStatus::Active);
        assert_eq!(customers[1].name, "Ben Ito");
        assert_eq!(customers[1].status, CustomerStatus::Blocked);
        assert_eq!(mock_invoices().len(), 4);
    }

    #[test]
    fn service_from_form_maps_defaults() -> Result<()> {
        let mut form = ServiceFormInput::default();
        form.set_field("service_name", "Geyser Repair")?;
        form.set_field("service_cost", "650")?;
        let service = service_from_form(&form, RecordId::from("S9"));
        assert_eq!(service.price, 650.0);
        assert_eq!(service.category, "General");
        assert!(service.available);
        Ok(())
    }

    #[test]
    fn memory_source_deletes_known_rows_only() -> Result<()> {
        let mut source = MemorySource::new(mock_customers());
        source.delete(&RecordId::from("C1"))?;
        assert_eq!(source.rows().len(), 3);
        assert!(source.delete(&RecordId::from("C1")).is_err());
        assert_eq!(source.deletes.len(), 2);
        Ok(())
    }

    #[test]
    fn memory_source_without_creator_refuses_create() {
        let mut source = MemorySource::new(mock_customers());
        let error = source
            .create(&homedash_app::NoDraft)
            .expect_err("customers have no creator");
        assert!(error.to_string().contains("customers cannot be created"));
    }

    #[test]
    fn fixture_summary_counts_statuses() -> Result<()> {
        let mut faker = DashFaker::new(5);
        let mut summary = FixtureSummary::new(faker.bookings(40));

        let overview = summary.fetch_summary(SummaryKind::Overview, "all-time")?;
        assert_eq!(overview.number("totalBookings"), Some(40.0));

        let statistics = summary.fetch_summary(SummaryKind::Statistics, "all-time")?;
        let counted: f64 = ["pending", "confirmed", "completed", "cancelled"]
            .iter()
            .filter_map(|status| statistics.number(status))
            .sum();
        assert_eq!(counted, 40.0);
        Ok(())
    }
}
