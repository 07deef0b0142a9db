// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use homedash_app::{
    AppCommand, AppState, Booking, Customer, CustomerTotals, FilterValue, Invoice, InvoiceTotals,
    ListController, ListEvent, ListPhase, PageKind, Record, RecordId, RecordSource, Service,
    SummaryKind, SummarySource, SummaryView, Tabular, Theme, ThemeStore, Toggle, format_rupees,
    revenue_by_service,
};
use std::io::Write;

use crate::render;
use crate::runtime::DashboardRuntime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Page(PageKind),
    Summary(SummaryKind),
}

impl Screen {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "overview" => Some(Self::Summary(SummaryKind::Overview)),
            "statistics" => Some(Self::Summary(SummaryKind::Statistics)),
            other => PageKind::parse(other).map(Self::Page),
        }
    }

    /// Summary screens live under the bookings page.
    pub const fn page(self) -> PageKind {
        match self {
            Self::Page(page) => page,
            Self::Summary(_) => PageKind::Bookings,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Page(page) => page.label(),
            Self::Summary(kind) => kind.label(),
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Page(page) => page.title(),
            Self::Summary(SummaryKind::Overview) => "Bookings Overview",
            Self::Summary(SummaryKind::Statistics) => "Bookings Statistics",
        }
    }
}

/// Page options collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub period: Option<String>,
    pub toggles: Vec<RecordId>,
    pub delete: Option<RecordId>,
    pub add: bool,
    pub fields: Vec<(String, String)>,
    pub theme: Option<Theme>,
}

pub struct PageContext<'a> {
    pub state: &'a mut AppState,
    pub themes: &'a mut ThemeStore,
    pub out: &'a mut dyn Write,
    pub confirm: &'a mut dyn FnMut(&str) -> bool,
}

pub fn run_screen<T: DashboardRuntime>(
    runtime: &mut T,
    screen: Screen,
    request: &PageRequest,
    ctx: &mut PageContext<'_>,
) -> Result<()> {
    ctx.state.dispatch(AppCommand::OpenPage(screen.page()));
    writeln!(ctx.out, "{}", screen.title())?;
    writeln!(ctx.out)?;

    let mut failures = Vec::new();
    match screen {
        Screen::Page(PageKind::Bookings) => {
            let mut controller = load_list::<Booking>(runtime)?;
            failures.extend(apply_delete(&mut controller, runtime, request, ctx));
            show_list(&mut controller, request, ctx)?;
        }
        Screen::Page(PageKind::Customers) => {
            let mut controller = load_list::<Customer>(runtime)?;
            failures.extend(apply_toggles(&mut controller, request, ctx));
            failures.extend(apply_delete(&mut controller, runtime, request, ctx));
            show_list(&mut controller, request, ctx)?;

            let totals = CustomerTotals::from_customers(controller.items());
            writeln!(ctx.out)?;
            writeln!(ctx.out, "Total Customers: {}", totals.total)?;
            writeln!(ctx.out, "Active Customers: {}", totals.active)?;
            render::rupees_line(ctx.out, "Total Spent", totals.total_spent)?;
        }
        Screen::Page(PageKind::Invoices) => {
            let mut controller = load_list::<Invoice>(runtime)?;
            failures.extend(apply_delete(&mut controller, runtime, request, ctx));
            show_list(&mut controller, request, ctx)?;

            let totals = InvoiceTotals::from_invoices(controller.items());
            writeln!(ctx.out)?;
            render::rupees_line(ctx.out, "Total Revenue", totals.total_revenue)?;
            render::rupees_line(ctx.out, "Pending Amount", totals.pending_amount)?;
        }
        Screen::Page(PageKind::Services) => {
            let mut controller = load_list::<Service>(runtime)?;
            failures.extend(apply_new_service(&mut controller, runtime, request, ctx)?);
            failures.extend(apply_toggles(&mut controller, request, ctx));
            failures.extend(apply_delete(&mut controller, runtime, request, ctx));
            show_list(&mut controller, request, ctx)?;
        }
        Screen::Page(PageKind::Financial) => {
            let controller = load_list::<Booking>(runtime)?;
            show_financial(controller.items(), ctx)?;
        }
        Screen::Page(PageKind::Settings) => show_settings(request, ctx)?,
        Screen::Summary(kind) => show_summary(runtime, kind, request, ctx)?,
    }

    if let Some(status) = &ctx.state.status_line {
        writeln!(ctx.out)?;
        writeln!(ctx.out, "{status}")?;
    }
    if !failures.is_empty() {
        bail!("{}", failures.join("; "));
    }
    Ok(())
}

fn load_list<R: Record>(source: &mut impl RecordSource<R>) -> Result<ListController<R>> {
    let mut controller = ListController::new();
    controller.load(source);
    if controller.phase() == ListPhase::LoadFailed {
        bail!("Failed to fetch {}", R::KIND.plural());
    }
    Ok(controller)
}

fn apply_delete<R: Record>(
    controller: &mut ListController<R>,
    source: &mut impl RecordSource<R>,
    request: &PageRequest,
    ctx: &mut PageContext<'_>,
) -> Vec<String> {
    let Some(id) = &request.delete else {
        return Vec::new();
    };
    let prompt = format!(
        "Are you sure you want to delete this {} ({id})?",
        R::KIND.as_str()
    );
    let confirm = &mut *ctx.confirm;
    let events = controller.remove(source, id, |_| confirm(&prompt));
    settle(events, ctx)
}

fn apply_toggles<R: Record + Toggle>(
    controller: &mut ListController<R>,
    request: &PageRequest,
    ctx: &mut PageContext<'_>,
) -> Vec<String> {
    let mut failures = Vec::new();
    for id in &request.toggles {
        failures.extend(settle(controller.toggle(id), ctx));
        if let Some(record) = controller.items().iter().find(|record| record.id() == id) {
            let status = format!("{} {id} is now {}", R::KIND.label(), record.status_label());
            ctx.state.dispatch(AppCommand::SetStatus(status));
        }
    }
    failures
}

fn apply_new_service(
    controller: &mut ListController<Service>,
    source: &mut impl RecordSource<Service>,
    request: &PageRequest,
    ctx: &mut PageContext<'_>,
) -> Result<Vec<String>> {
    if !request.add {
        return Ok(Vec::new());
    }
    controller.open_form();
    if let Some(form) = controller.form_mut() {
        for (name, value) in &request.fields {
            form.set_field(name, value)?;
        }
    }
    Ok(settle(controller.submit_form(source), ctx))
}

fn show_list<R: Record + Tabular>(
    controller: &mut ListController<R>,
    request: &PageRequest,
    ctx: &mut PageContext<'_>,
) -> Result<()> {
    if let Some(term) = &request.search {
        controller.set_search(term);
    }
    for (facet, value) in &request.filters {
        controller.set_filter(facet, FilterValue::parse(value))?;
    }

    let rows = controller.filtered_view();
    let empty = format!("No {} found.", R::KIND.plural());
    render::table(ctx.out, &rows, &empty)?;
    writeln!(
        ctx.out,
        "\nShowing {} of {} {}",
        rows.len(),
        controller.items().len(),
        R::KIND.plural()
    )?;

    for facet in R::FACETS {
        let current = controller.filter(facet);
        let options = controller.facet_values(facet).join(", ");
        writeln!(ctx.out, "{facet} [{current}]: {options}")?;
    }
    Ok(())
}

fn show_financial(bookings: &[Booking], ctx: &mut PageContext<'_>) -> Result<()> {
    let breakdown = revenue_by_service(bookings);
    let total: f64 = breakdown.iter().map(|row| row.revenue).sum();
    let rows: Vec<Vec<String>> = breakdown
        .into_iter()
        .map(|row| {
            vec![
                row.service,
                format_rupees(row.revenue),
                format!("{}%", row.percentage),
            ]
        })
        .collect();

    if rows.is_empty() {
        writeln!(ctx.out, "No revenue recorded yet.")?;
    } else {
        render::grid(ctx.out, &["Service", "Revenue", "Share"], &rows)?;
    }
    writeln!(ctx.out)?;
    render::rupees_line(ctx.out, "Total Revenue", total)?;
    Ok(())
}

fn show_summary(
    source: &mut impl SummarySource,
    kind: SummaryKind,
    request: &PageRequest,
    ctx: &mut PageContext<'_>,
) -> Result<()> {
    let mut view = SummaryView::new(kind);
    if let Some(period) = &request.period {
        view.set_period(period);
    }
    view.load(source);

    let Some(summary) = view.summary().filter(|_| view.phase() == ListPhase::Ready) else {
        bail!("Failed to fetch bookings {}", kind.label());
    };
    writeln!(ctx.out, "Time period: {}", view.time_period())?;
    render::summary(ctx.out, summary)?;
    Ok(())
}

fn show_settings(request: &PageRequest, ctx: &mut PageContext<'_>) -> Result<()> {
    if let Some(theme) = request.theme {
        let status = if ctx.themes.set(theme) {
            format!("Theme set to {}", theme.as_str())
        } else {
            format!("Theme is already {}", theme.as_str())
        };
        ctx.state.dispatch(AppCommand::SetStatus(status));
    }
    writeln!(ctx.out, "Theme: {}", ctx.themes.get().as_str())?;
    Ok(())
}

/// Moves acknowledgments into the status line and returns failure messages.
fn settle(events: Vec<ListEvent>, ctx: &mut PageContext<'_>) -> Vec<String> {
    let mut failures = Vec::new();
    for event in events {
        match event {
            ListEvent::Acknowledged(message) => {
                ctx.state.dispatch(AppCommand::SetStatus(message));
            }
            ListEvent::DeleteCancelled(id) => {
                ctx.state.dispatch(AppCommand::SetStatus(format!("Kept {id}")));
            }
            ListEvent::CreateFailed(error) | ListEvent::DeleteFailed { error, .. } => {
                failures.push(error);
            }
            ListEvent::NotFound(id) => failures.push(format!("no record with id {id}")),
            _ => {}
        }
    }
    failures
}
