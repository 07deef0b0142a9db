// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::forms::{NoDraft, ServiceFormInput};
use crate::ids::RecordId;
use crate::list::{Record, Toggle};
use crate::model::{Booking, Customer, Invoice, RecordKind, Service};

impl Record for Booking {
    type Draft = NoDraft;

    const KIND: RecordKind = RecordKind::Booking;
    const FACETS: &'static [&'static str] = &["status", "city"];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.customer_name.as_deref(),
            self.customer_number.as_deref(),
        ]
    }

    fn facet(&self, facet: &str) -> Option<&str> {
        match facet {
            "status" => Some(self.status.as_str()),
            "city" => Some(self.city.as_str()),
            _ => None,
        }
    }
}

impl Record for Customer {
    type Draft = NoDraft;

    const KIND: RecordKind = RecordKind::Customer;
    const FACETS: &'static [&'static str] = &["status"];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), Some(self.email.as_str())]
    }

    fn facet(&self, facet: &str) -> Option<&str> {
        match facet {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Toggle for Customer {
    fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }

    fn status_label(&self) -> &str {
        self.status.as_str()
    }
}

impl Record for Invoice {
    type Draft = NoDraft;

    const KIND: RecordKind = RecordKind::Invoice;
    const FACETS: &'static [&'static str] = &["status"];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.customer_name.as_str()), Some(self.id.as_str())]
    }

    fn facet(&self, facet: &str) -> Option<&str> {
        match facet {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Record for Service {
    type Draft = ServiceFormInput;

    const KIND: RecordKind = RecordKind::Service;
    const FACETS: &'static [&'static str] = &["category", "availability"];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.title.as_str()), Some(self.description.as_str())]
    }

    fn facet(&self, facet: &str) -> Option<&str> {
        match facet {
            "category" => Some(self.category.as_str()),
            "availability" => Some(self.availability()),
            _ => None,
        }
    }
}

impl Toggle for Service {
    fn toggle_status(&mut self) {
        self.available = !self.available;
    }

    fn status_label(&self) -> &str {
        self.availability()
    }
}

#[cfg(test)]
mod tests {
    use crate::ids::RecordId;
    use crate::list::{Record, Toggle};
    use crate::model::Booking;

    fn booking(name: Option<&str>, number: Option<&str>) -> Booking {
        Booking {
            id: RecordId::from(7_i64),
            customer_name: name.map(str::to_owned),
            customer_number: number.map(str::to_owned),
            city: "Pune".to_owned(),
            service_name: "Deep Cleaning".to_owned(),
            booking_date: Some("2025-02-01".to_owned()),
            booking_time: "10:00".to_owned(),
            status: "confirmed".to_owned(),
            amount: Some(1499.0),
        }
    }

    #[test]
    fn booking_search_skips_missing_fields() {
        let row = booking(None, Some("9845012345"));
        let fields: Vec<_> = row.search_fields().into_iter().flatten().collect();
        assert_eq!(fields, vec!["9845012345"]);
    }

    #[test]
    fn booking_facets_expose_status_and_city() {
        let row = booking(Some("Asha Rao"), None);
        assert_eq!(row.facet("status"), Some("confirmed"));
        assert_eq!(row.facet("city"), Some("Pune"));
        assert_eq!(row.facet("category"), None);
    }

    #[test]
    fn service_toggle_flips_availability_label() {
        let mut service = crate::model::Service {
            id: RecordId::from("S1"),
            title: "Sofa Cleaning".to_owned(),
            description: String::new(),
            details: String::new(),
            image: String::new(),
            price: 799.0,
            rating: 0.0,
            booking_count: 0,
            duration_minutes: 60,
            category: "General".to_owned(),
            tags: Vec::new(),
            available: true,
        };
        assert_eq!(service.status_label(), "available");
        service.toggle_status();
        assert_eq!(service.status_label(), "unavailable");
        assert_eq!(service.facet("availability"), Some("unavailable"));
    }
}
