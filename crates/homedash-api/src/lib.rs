// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod wire;

pub use wire::{BookingWire, ServiceCreateRequest, ServiceWire};

use anyhow::{Context, Result, anyhow, bail};
use homedash_app::{AggregateSummary, Booking, RecordId, Service, ServiceFormInput, SummaryKind};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use time::{Date, OffsetDateTime};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// Blocking client for the booking-platform REST API.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    timeout: Option<Duration>,
    http: HttpClient,
}

impl Client {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let base_url =
            Url::parse(trimmed).with_context(|| format!("parse api.base_url {trimmed:?}"))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            bail!(
                "api.base_url {trimmed:?} must use http or https, got {}",
                base_url.scheme()
            );
        }
        if base_url.cannot_be_a_base() {
            bail!("api.base_url {trimmed:?} cannot carry a path");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn list_bookings(&self) -> Result<Vec<Booking>> {
        let url = self.endpoint(&["api", "bookings"])?;
        let response = self.send(self.http.get(url))?;
        let rows: Vec<BookingWire> = response.json().context("decode bookings")?;
        Ok(rows.into_iter().map(BookingWire::into_record).collect())
    }

    pub fn bookings_overview(&self, time_period: &str) -> Result<AggregateSummary> {
        self.bookings_summary(SummaryKind::Overview, time_period)
    }

    pub fn bookings_statistics(&self, time_period: &str) -> Result<AggregateSummary> {
        self.bookings_summary(SummaryKind::Statistics, time_period)
    }

    pub fn bookings_summary(
        &self,
        kind: SummaryKind,
        time_period: &str,
    ) -> Result<AggregateSummary> {
        let url = self.endpoint(&["api", "bookings", kind.label()])?;
        let response = self.send(self.http.get(url).query(&[("timePeriod", time_period)]))?;
        response
            .json()
            .with_context(|| format!("decode bookings {}", kind.label()))
    }

    pub fn list_services(&self) -> Result<Vec<Service>> {
        let url = self.endpoint(&["customer", "all-services"])?;
        let response = self.send(self.http.get(url))?;
        let rows: Vec<ServiceWire> = response.json().context("decode services")?;
        Ok(rows.into_iter().map(ServiceWire::into_record).collect())
    }

    /// Creates a service stamped with today's UTC date.
    pub fn create_service(&self, form: &ServiceFormInput) -> Result<Service> {
        self.create_service_on(form, OffsetDateTime::now_utc().date())
    }

    pub fn create_service_on(&self, form: &ServiceFormInput, today: Date) -> Result<Service> {
        let url = self.endpoint(&["customer", "add-service"])?;
        let body = ServiceCreateRequest::new(form, today);
        let response = self.send(self.http.post(url).json(&body))?;
        let created: ServiceWire = response.json().context("decode created service")?;
        Ok(created.into_record())
    }

    pub fn delete_service(&self, id: &RecordId) -> Result<()> {
        let url = self.endpoint(&["customer", "delete-service", id.as_str()])?;
        self.send(self.http.delete(url))?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("api.base_url {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .map_err(|error| connection_error(self.base_url(), error))?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "api response");
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }
        Ok(response)
    }
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach the booking API at {} -- check [api].base_url or start the backend ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = parsed.message.filter(|message| !message.is_empty()) {
            return anyhow!("server error ({}): {}", status.as_u16(), message);
        }
        if let Some(error) = parsed.error.filter(|error| !error.is_empty()) {
            return anyhow!("server error ({}): {}", status.as_u16(), error);
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return anyhow!("server error ({}): {}", status.as_u16(), trimmed);
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
    error: Option<String>,
}
