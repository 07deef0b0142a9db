// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::BTreeMap;
use std::fmt;

use crate::forms::Draft;
use crate::ids::RecordId;
use crate::model::RecordKind;

/// A row a list page holds in memory.
pub trait Record: Clone {
    type Draft: Draft;

    const KIND: RecordKind;
    /// Categorical fields that accept an exact-match filter.
    const FACETS: &'static [&'static str];

    fn id(&self) -> &RecordId;

    /// Fields the free-text search is matched against. A missing field never
    /// matches.
    fn search_fields(&self) -> Vec<Option<&str>>;

    fn facet(&self, facet: &str) -> Option<&str>;
}

/// Records with a two-valued status that can be flipped locally.
pub trait Toggle {
    fn toggle_status(&mut self);

    fn status_label(&self) -> &str;
}

/// Backend a list controller reads from and writes to.
pub trait RecordSource<R: Record> {
    fn load(&mut self) -> Result<Vec<R>>;

    fn create(&mut self, draft: &R::Draft) -> Result<R> {
        let _ = draft;
        bail!("{} cannot be created from this dashboard", R::KIND.plural())
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        bail!(
            "{} {id} cannot be deleted: no delete endpoint for {}",
            R::KIND.as_str(),
            R::KIND.plural()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    All,
    Exact(String),
}

impl FilterValue {
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn parse(raw: &str) -> Self {
        if raw == Self::ALL_SENTINEL {
            Self::All
        } else {
            Self::Exact(raw.to_owned())
        }
    }

    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Exact(expected) => value == Some(expected.as_str()),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_SENTINEL),
            Self::Exact(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Uninitialized,
    Loading,
    Ready,
    LoadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    PhaseChanged(ListPhase),
    ItemsReplaced(usize),
    SearchChanged(String),
    FilterChanged {
        facet: &'static str,
        value: FilterValue,
    },
    FormOpened,
    FormClosed,
    Created(RecordId),
    CreateFailed(String),
    DeleteCancelled(RecordId),
    Deleted(RecordId),
    DeleteFailed {
        id: RecordId,
        error: String,
    },
    Updated(RecordId),
    NotFound(RecordId),
    Acknowledged(String),
}

/// Local snapshot of one page's records plus the search and filter state the
/// page derives its visible rows from.
#[derive(Debug, Clone)]
pub struct ListController<R: Record> {
    items: Vec<R>,
    search_term: String,
    filters: BTreeMap<&'static str, FilterValue>,
    phase: ListPhase,
    form: Option<R::Draft>,
    acknowledgment: Option<String>,
}

impl<R: Record> Default for ListController<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_term: String::new(),
            filters: BTreeMap::new(),
            phase: ListPhase::Uninitialized,
            form: None,
            acknowledgment: None,
        }
    }
}

impl<R: Record> ListController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter(&self, facet: &str) -> FilterValue {
        self.filters.get(facet).cloned().unwrap_or_default()
    }

    pub fn acknowledgment(&self) -> Option<&str> {
        self.acknowledgment.as_deref()
    }

    pub fn clear_acknowledgment(&mut self) {
        self.acknowledgment = None;
    }

    pub fn load(&mut self, source: &mut impl RecordSource<R>) -> Vec<ListEvent> {
        let mut events = self.begin_load();
        events.extend(self.finish_load(source.load()));
        events
    }

    pub fn begin_load(&mut self) -> Vec<ListEvent> {
        self.phase = ListPhase::Loading;
        vec![ListEvent::PhaseChanged(self.phase)]
    }

    /// Applies a load outcome. Outcomes are applied in arrival order, so the
    /// last one to arrive wins.
    pub fn finish_load(&mut self, result: Result<Vec<R>>) -> Vec<ListEvent> {
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "loaded {}", R::KIND.plural());
                self.items = items;
                self.phase = ListPhase::Ready;
                vec![
                    ListEvent::ItemsReplaced(self.items.len()),
                    ListEvent::PhaseChanged(self.phase),
                ]
            }
            Err(error) => {
                tracing::warn!("failed to fetch {}: {error:#}", R::KIND.plural());
                self.phase = ListPhase::LoadFailed;
                vec![ListEvent::PhaseChanged(self.phase)]
            }
        }
    }

    pub fn set_search(&mut self, term: &str) -> Vec<ListEvent> {
        self.search_term = term.to_owned();
        vec![ListEvent::SearchChanged(self.search_term.clone())]
    }

    pub fn set_filter(&mut self, facet: &str, value: FilterValue) -> Result<Vec<ListEvent>> {
        let Some(facet) = R::FACETS.iter().copied().find(|known| *known == facet) else {
            bail!(
                "{} cannot be filtered by {facet:?}; filterable fields: {}",
                R::KIND.plural(),
                R::FACETS.join(", ")
            );
        };
        self.filters.insert(facet, value.clone());
        Ok(vec![ListEvent::FilterChanged { facet, value }])
    }

    /// Rows matching the current search term and every active filter, in
    /// `items` order. Recomputed on each call.
    pub fn filtered_view(&self) -> Vec<&R> {
        let needle = self.search_term.to_lowercase();
        self.items
            .iter()
            .filter(|record| matches_search(*record, &needle))
            .filter(|record| {
                self.filters
                    .iter()
                    .all(|(facet, value)| value.admits(record.facet(facet)))
            })
            .collect()
    }

    /// Distinct values of `facet` across all held rows, in first-seen order.
    pub fn facet_values(&self, facet: &str) -> Vec<&str> {
        let mut values: Vec<&str> = Vec::new();
        for value in self.items.iter().filter_map(|record| record.facet(facet)) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        values
    }

    pub fn form(&self) -> Option<&R::Draft> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut R::Draft> {
        self.form.as_mut()
    }

    pub fn open_form(&mut self) -> Vec<ListEvent> {
        if self.form.is_none() {
            self.form = Some(R::Draft::default());
        }
        vec![ListEvent::FormOpened]
    }

    pub fn close_form(&mut self) -> Vec<ListEvent> {
        self.form = None;
        vec![ListEvent::FormClosed]
    }

    /// Submits the open form. A created record is prepended; on failure the
    /// form stays open with its contents.
    pub fn submit_form(&mut self, source: &mut impl RecordSource<R>) -> Vec<ListEvent> {
        let Some(draft) = self.form.as_ref() else {
            return Vec::new();
        };

        if let Err(error) = draft.validate() {
            let message = error.to_string();
            return vec![
                ListEvent::CreateFailed(message.clone()),
                self.acknowledge(message),
            ];
        }

        match source.create(draft) {
            Ok(record) => {
                let id = record.id().clone();
                self.items.insert(0, record);
                self.form = None;
                vec![
                    ListEvent::Created(id),
                    ListEvent::FormClosed,
                    self.acknowledge(format!("{} added successfully!", R::KIND.label())),
                ]
            }
            Err(error) => {
                tracing::error!("failed to add {}: {error:#}", R::KIND.as_str());
                vec![
                    ListEvent::CreateFailed(format!("{error:#}")),
                    self.acknowledge(format!("Failed to add {}", R::KIND.as_str())),
                ]
            }
        }
    }

    /// Deletes `id` after `confirm` approves it. The row is dropped locally
    /// only once the backend accepts the delete.
    pub fn remove(
        &mut self,
        source: &mut impl RecordSource<R>,
        id: &RecordId,
        confirm: impl FnOnce(&R) -> bool,
    ) -> Vec<ListEvent> {
        let Some(index) = self.items.iter().position(|record| record.id() == id) else {
            return vec![ListEvent::NotFound(id.clone())];
        };
        if !confirm(&self.items[index]) {
            return vec![ListEvent::DeleteCancelled(id.clone())];
        }

        match source.delete(id) {
            Ok(()) => {
                // Ids are not unique on every page; drop the selected row only.
                self.items.remove(index);
                vec![
                    ListEvent::Deleted(id.clone()),
                    self.acknowledge(format!("{} deleted successfully!", R::KIND.label())),
                ]
            }
            Err(error) => {
                tracing::error!("failed to delete {} {id}: {error:#}", R::KIND.as_str());
                vec![
                    ListEvent::DeleteFailed {
                        id: id.clone(),
                        error: format!("{error:#}"),
                    },
                    self.acknowledge(format!(
                        "Failed to delete {}. Please try again.",
                        R::KIND.as_str()
                    )),
                ]
            }
        }
    }

    /// Patches a held row in place. Nothing is sent to the backend.
    pub fn update_local(&mut self, id: &RecordId, patch: impl FnOnce(&mut R)) -> Vec<ListEvent> {
        match self.items.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                patch(record);
                vec![ListEvent::Updated(id.clone())]
            }
            None => vec![ListEvent::NotFound(id.clone())],
        }
    }

    fn acknowledge(&mut self, message: String) -> ListEvent {
        self.acknowledgment = Some(message.clone());
        ListEvent::Acknowledged(message)
    }
}

impl<R: Record + Toggle> ListController<R> {
    pub fn toggle(&mut self, id: &RecordId) -> Vec<ListEvent> {
        self.update_local(id, R::toggle_status)
    }
}

fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    record
        .search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}
