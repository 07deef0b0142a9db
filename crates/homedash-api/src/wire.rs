// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use homedash_app::{
    Booking, RecordId, SERVICE_DEFAULT_CATEGORY, SERVICE_DEFAULT_DURATION_MINUTES, Service,
    ServiceFormInput,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Booking row as served by `GET /api/bookings`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookingWire {
    #[serde(default, deserialize_with = "lenient_text")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub customer_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub booking_service_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub booking_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub booking_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub booking_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub booking_amount: Option<f64>,
}

impl BookingWire {
    pub fn into_record(self) -> Booking {
        Booking {
            id: self
                .customer_id
                .map(RecordId::from)
                .unwrap_or_else(generated_id),
            customer_name: self.customer_name,
            customer_number: self.customer_number,
            city: self.city.unwrap_or_default(),
            service_name: self.booking_service_name.unwrap_or_default(),
            booking_date: self.booking_date,
            booking_time: self.booking_time.unwrap_or_default(),
            status: self.booking_status.unwrap_or_default(),
            amount: self.booking_amount,
        }
    }
}

/// Service row as served by `GET /customer/all-services` and echoed back by
/// `POST /customer/add-service`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceWire {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_details: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub service_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub active: Option<String>,
}

impl ServiceWire {
    pub fn into_record(self) -> Service {
        let category = self
            .service_type
            .filter(|kind| !kind.is_empty())
            .unwrap_or_else(|| SERVICE_DEFAULT_CATEGORY.to_owned());
        Service {
            id: self.id.map(RecordId::from).unwrap_or_else(generated_id),
            title: self.service_name.unwrap_or_default(),
            description: self.service_description.unwrap_or_default(),
            details: self.service_details.unwrap_or_default(),
            image: self.service_image_url.unwrap_or_default(),
            price: self.service_cost.unwrap_or(0.0),
            rating: self.rating.unwrap_or(0.0),
            booking_count: self.rating_count.map_or(0, |count| count.max(0.0) as u64),
            duration_minutes: SERVICE_DEFAULT_DURATION_MINUTES,
            category,
            tags: Vec::new(),
            available: self.active.as_deref() == Some("Y"),
        }
    }
}

/// Body of `POST /customer/add-service`: the form fields as typed plus the
/// create/update dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCreateRequest<'a> {
    pub service_name: &'a str,
    pub service_cost: &'a str,
    pub service_description: &'a str,
    pub service_details: &'a str,
    pub service_image_url: &'a str,
    pub service_type: &'a str,
    pub rating: &'a str,
    pub rating_count: &'a str,
    pub remarks: &'a str,
    pub created_by: &'a str,
    pub updated_by: &'a str,
    pub create_date: String,
    pub updated_date: String,
    pub active: &'a str,
}

impl<'a> ServiceCreateRequest<'a> {
    pub fn new(form: &'a ServiceFormInput, today: time::Date) -> Self {
        let stamp = today.to_string();
        Self {
            service_name: &form.service_name,
            service_cost: &form.service_cost,
            service_description: &form.service_description,
            service_details: &form.service_details,
            service_image_url: &form.service_image_url,
            service_type: &form.service_type,
            rating: &form.rating,
            rating_count: &form.rating_count,
            remarks: &form.remarks,
            created_by: &form.created_by,
            updated_by: &form.updated_by,
            create_date: stamp.clone(),
            updated_date: stamp,
            active: &form.active,
        }
    }
}

fn generated_id() -> RecordId {
    RecordId::new(uuid::Uuid::new_v4().to_string())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

// Numbers arrive as JSON numbers or numeric strings; anything else reads as 0.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::{BookingWire, ServiceCreateRequest, ServiceWire};
    use anyhow::Result;
    use homedash_app::ServiceFormInput;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn service_wire_maps_backend_fields() -> Result<()> {
        let wire: ServiceWire = serde_json::from_value(json!({
            "id": 12,
            "service_name": "Deep Cleaning",
            "service_description": "Whole home",
            "service_details": "3 staff, 4 hours",
            "service_image_url": "https://cdn.example/clean.jpg",
            "service_cost": 2499,
            "rating": "4.6",
            "rating_count": "118",
            "service_type": "Cleaning",
            "active": "Y",
        }))?;
        let service = wire.into_record();
        assert_eq!(service.id, "12");
        assert_eq!(service.title, "Deep Cleaning");
        assert_eq!(service.price, 2499.0);
        assert_eq!(service.rating, 4.6);
        assert_eq!(service.booking_count, 118);
        assert_eq!(service.duration_minutes, 60);
        assert_eq!(service.category, "Cleaning");
        assert!(service.available);
        assert!(service.tags.is_empty());
        Ok(())
    }

    #[test]
    fn service_wire_defaults_missing_values() -> Result<()> {
        let wire: ServiceWire = serde_json::from_value(json!({
            "service_name": "Termite Control",
            "rating": "n/a",
            "rating_count": null,
            "service_type": "",
            "active": "N",
        }))?;
        let service = wire.into_record();
        assert_eq!(service.id.as_str().len(), 36, "uuid assigned");
        assert_eq!(service.rating, 0.0);
        assert_eq!(service.booking_count, 0);
        assert_eq!(service.category, "General");
        assert!(!service.available);
        Ok(())
    }

    #[test]
    fn booking_wire_keys_rows_by_customer_id() -> Result<()> {
        let wire: BookingWire = serde_json::from_value(json!({
            "customer_id": 301,
            "customer_name": "Asha Rao",
            "customer_number": 9845012345_u64,
            "city": "Pune",
            "booking_service_name": "Sofa Cleaning",
            "booking_date": "2025-02-01T00:00:00.000+00:00",
            "booking_time": "10:30 AM",
            "booking_status": "confirmed",
            "booking_amount": "1499.00",
        }))?;
        let booking = wire.into_record();
        assert_eq!(booking.id, "301");
        assert_eq!(booking.customer_number.as_deref(), Some("9845012345"));
        assert_eq!(booking.amount, Some(1499.0));
        assert_eq!(booking.status, "confirmed");
        Ok(())
    }

    #[test]
    fn booking_wire_reads_scalar_text_fields_as_text() -> Result<()> {
        let wire: BookingWire = serde_json::from_value(json!({
            "customer_id": "C-17",
            "city": false,
            "booking_time": 1030,
            "booking_status": null,
        }))?;
        let booking = wire.into_record();
        assert_eq!(booking.id, "C-17");
        assert_eq!(booking.city, "false");
        assert_eq!(booking.booking_time, "1030");
        assert_eq!(booking.status, "");
        Ok(())
    }

    #[test]
    fn create_request_stamps_both_dates() -> Result<()> {
        let mut form = ServiceFormInput::default();
        form.set_field("service_name", "AC Repair")?;
        form.set_field("service_cost", "1200")?;
        let request = ServiceCreateRequest::new(&form, date!(2025 - 06 - 09));
        let body = serde_json::to_value(&request)?;
        assert_eq!(body["service_name"], "AC Repair");
        assert_eq!(body["service_cost"], "1200");
        assert_eq!(body["create_date"], "2025-06-09");
        assert_eq!(body["updated_date"], "2025-06-09");
        assert_eq!(body["active"], "Y");
        Ok(())
    }
}
