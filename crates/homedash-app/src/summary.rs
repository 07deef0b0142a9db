// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::list::{ListEvent, ListPhase};

pub const DEFAULT_TIME_PERIOD: &str = "all-time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryKind {
    Overview,
    Statistics,
}

impl SummaryKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Statistics => "statistics",
        }
    }
}

/// Aggregate object returned by the bookings overview and statistics
/// endpoints. Its fields are not fixed, so they are kept as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateSummary {
    fields: Map<String, Value>,
}

impl AggregateSummary {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.fields.get(name)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

pub trait SummarySource {
    fn fetch_summary(&mut self, kind: SummaryKind, time_period: &str) -> Result<AggregateSummary>;
}

/// Statistics-style page: one aggregate object for a time period.
#[derive(Debug, Clone)]
pub struct SummaryView {
    kind: SummaryKind,
    time_period: String,
    phase: ListPhase,
    summary: Option<AggregateSummary>,
}

impl SummaryView {
    pub fn new(kind: SummaryKind) -> Self {
        Self {
            kind,
            time_period: DEFAULT_TIME_PERIOD.to_owned(),
            phase: ListPhase::Uninitialized,
            summary: None,
        }
    }

    pub fn kind(&self) -> SummaryKind {
        self.kind
    }

    pub fn time_period(&self) -> &str {
        &self.time_period
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn summary(&self) -> Option<&AggregateSummary> {
        self.summary.as_ref()
    }

    /// The period is passed to the backend verbatim.
    pub fn set_period(&mut self, time_period: &str) {
        self.time_period = time_period.to_owned();
    }

    pub fn load(&mut self, source: &mut impl SummarySource) -> Vec<ListEvent> {
        self.phase = ListPhase::Loading;
        let mut events = vec![ListEvent::PhaseChanged(self.phase)];

        match source.fetch_summary(self.kind, &self.time_period) {
            Ok(summary) => {
                self.summary = Some(summary);
                self.phase = ListPhase::Ready;
            }
            Err(error) => {
                tracing::warn!(
                    time_period = %self.time_period,
                    "failed to fetch bookings {}: {error:#}",
                    self.kind.label()
                );
                self.phase = ListPhase::LoadFailed;
            }
        }
        events.push(ListEvent::PhaseChanged(self.phase));
        events
    }
}
