// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::PageKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active_page: PageKind,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_page: PageKind::Bookings,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextPage,
    PrevPage,
    OpenPage(PageKind),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    PageChanged(PageKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextPage => self.rotate_page(1),
            AppCommand::PrevPage => self.rotate_page(-1),
            AppCommand::OpenPage(page) => self.open_page(page),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_page(&mut self, delta: isize) -> Vec<AppEvent> {
        let pages = PageKind::ALL;
        let current = pages
            .iter()
            .position(|page| *page == self.active_page)
            .unwrap_or(0) as isize;
        let len = pages.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.open_page(pages[next])
    }

    // Leaving a page drops its acknowledgment along with its list state.
    fn open_page(&mut self, page: PageKind) -> Vec<AppEvent> {
        self.active_page = page;
        let mut events = vec![AppEvent::PageChanged(page)];
        if self.status_line.take().is_some() {
            events.push(AppEvent::StatusCleared);
        }
        events
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
