// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use homedash_api::Client;
use homedash_app::{
    AggregateSummary, Booking, Customer, Invoice, RecordId, RecordSource, Service,
    ServiceFormInput, SummaryKind, SummarySource,
};
use homedash_testkit::{DashFaker, FixtureSummary, MemorySource, mock_customers, mock_invoices};

/// Everything a dashboard page can ask of its backend.
pub trait DashboardRuntime:
    RecordSource<Booking>
    + RecordSource<Customer>
    + RecordSource<Invoice>
    + RecordSource<Service>
    + SummarySource
{
}

impl<T> DashboardRuntime for T where
    T: RecordSource<Booking>
        + RecordSource<Customer>
        + RecordSource<Invoice>
        + RecordSource<Service>
        + SummarySource
{
}

pub struct ApiRuntime<'a> {
    client: &'a Client,
}

impl<'a> ApiRuntime<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

impl RecordSource<Booking> for ApiRuntime<'_> {
    fn load(&mut self) -> Result<Vec<Booking>> {
        self.client.list_bookings()
    }
}

impl RecordSource<Service> for ApiRuntime<'_> {
    fn load(&mut self) -> Result<Vec<Service>> {
        self.client.list_services()
    }

    fn create(&mut self, draft: &ServiceFormInput) -> Result<Service> {
        self.client.create_service(draft)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        self.client.delete_service(id)
    }
}

impl RecordSource<Customer> for ApiRuntime<'_> {
    fn load(&mut self) -> Result<Vec<Customer>> {
        bail!(
            "the booking API at {} has no customers endpoint; run with --demo to browse sample customers",
            self.client.base_url()
        )
    }
}

impl RecordSource<Invoice> for ApiRuntime<'_> {
    fn load(&mut self) -> Result<Vec<Invoice>> {
        bail!(
            "the booking API at {} has no invoices endpoint; run with --demo to browse sample invoices",
            self.client.base_url()
        )
    }
}

impl SummarySource for ApiRuntime<'_> {
    fn fetch_summary(&mut self, kind: SummaryKind, time_period: &str) -> Result<AggregateSummary> {
        self.client.bookings_summary(kind, time_period)
    }
}

pub const DEMO_SEED: u64 = 20_250_101;
const DEMO_BOOKINGS: usize = 24;
const DEMO_SERVICES: usize = 8;

/// In-memory backend seeded with sample data. Nothing is persisted.
pub struct DemoRuntime {
    bookings: MemorySource<Booking>,
    customers: MemorySource<Customer>,
    invoices: MemorySource<Invoice>,
    services: MemorySource<Service>,
    summary: FixtureSummary,
}

impl DemoRuntime {
    pub fn seeded(seed: u64) -> Self {
        let mut faker = DashFaker::new(seed);
        let bookings = faker.bookings(DEMO_BOOKINGS);
        let services = faker.services(DEMO_SERVICES);
        let mut customers = mock_customers();
        customers.extend(faker.customers(4));
        let mut invoices = mock_invoices();
        invoices.extend(faker.invoices(4));

        Self {
            summary: FixtureSummary::new(bookings.clone()),
            bookings: MemorySource::new(bookings),
            customers: MemorySource::new(customers),
            invoices: MemorySource::new(invoices),
            services: MemorySource::services(services),
        }
    }
}

impl RecordSource<Booking> for DemoRuntime {
    fn load(&mut self) -> Result<Vec<Booking>> {
        self.bookings.load()
    }
}

impl RecordSource<Customer> for DemoRuntime {
    fn load(&mut self) -> Result<Vec<Customer>> {
        self.customers.load()
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        self.customers.delete(id)
    }
}

impl RecordSource<Invoice> for DemoRuntime {
    fn load(&mut self) -> Result<Vec<Invoice>> {
        self.invoices.load()
    }
}

impl RecordSource<Service> for DemoRuntime {
    fn load(&mut self) -> Result<Vec<Service>> {
        self.services.load()
    }

    fn create(&mut self, draft: &ServiceFormInput) -> Result<Service> {
        self.services.create(draft)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        self.services.delete(id)
    }
}

impl SummarySource for DemoRuntime {
    fn fetch_summary(&mut self, kind: SummaryKind, time_period: &str) -> Result<AggregateSummary> {
        self.summary.fetch_summary(kind, time_period)
    }
}
