// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod pages;
mod render;
mod runtime;
mod settings;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use homedash_api::Client;
use homedash_app::{AppState, PageKind, RecordId, Theme, ThemeStore};
use pages::{PageContext, PageRequest, Screen};
use runtime::{ApiRuntime, DEMO_SEED, DemoRuntime};
use settings::ThemeFile;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "HOMEDASH_LOG";

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `homedash --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    init_logging(&config.log_level());

    let client = Client::new(config.base_url(), config.timeout()?).with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/timeout values",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        return Ok(());
    }

    let mut themes = ThemeStore::new(config.theme());
    if !options.demo {
        let theme_file = ThemeFile::new(ThemeFile::default_path()?);
        if let Some(saved) = theme_file.load()? {
            themes.set(saved);
        }
        theme_file.attach(&mut themes);
    }

    let mut state = AppState::default();
    let screen = options.screen.unwrap_or(Screen::Page(state.active_page));
    tracing::debug!(screen = screen.label(), demo = options.demo, "opening screen");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let assume_yes = options.assume_yes;
    let mut confirm = |prompt: &str| assume_yes || ask(prompt);
    let mut ctx = PageContext {
        state: &mut state,
        themes: &mut themes,
        out: &mut out,
        confirm: &mut confirm,
    };

    let result = if options.demo {
        let mut runtime = DemoRuntime::seeded(DEMO_SEED);
        pages::run_screen(&mut runtime, screen, &options.request, &mut ctx)
    } else {
        let mut runtime = ApiRuntime::new(&client);
        pages::run_screen(&mut runtime, screen, &options.request, &mut ctx)
    };
    out.flush()?;
    result
}

fn init_logging(config_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn ask(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = io::stderr().flush();
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(error) => {
            tracing::warn!("cannot read confirmation: {error}");
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    assume_yes: bool,
    screen: Option<Screen>,
    request: PageRequest,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
        assume_yes: false,
        screen: None,
        request: PageRequest::default(),
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let path = next_value(&mut iter, "--config", "a file path")?;
                options.config_path = PathBuf::from(path);
            }
            "--print-config-path" => options.print_config_path = true,
            "--print-example-config" => options.print_example = true,
            "--demo" => options.demo = true,
            "--check" => options.check_only = true,
            "--help" | "-h" => options.show_help = true,
            "--yes" | "-y" => options.assume_yes = true,
            "--search" => {
                let term = next_value(&mut iter, "--search", "a search term")?;
                options.request.search = Some(term);
            }
            "--filter" => {
                let raw = next_value(&mut iter, "--filter", "<facet>=<value>")?;
                options.request.filters.push(split_pair("--filter", &raw)?);
            }
            "--period" => {
                let period = next_value(&mut iter, "--period", "a time period")?;
                options.request.period = Some(period);
            }
            "--toggle" => {
                let id = next_value(&mut iter, "--toggle", "a record id")?;
                options.request.toggles.push(RecordId::new(id));
            }
            "--delete" => {
                let id = next_value(&mut iter, "--delete", "a record id")?;
                options.request.delete = Some(RecordId::new(id));
            }
            "--add" => options.request.add = true,
            "--set" => {
                let raw = next_value(&mut iter, "--set", "<field>=<value>")?;
                options.request.fields.push(split_pair("--set", &raw)?);
            }
            "--theme" => {
                let raw = next_value(&mut iter, "--theme", "light or dark")?;
                let theme = Theme::parse(&raw)
                    .ok_or_else(|| anyhow!("--theme must be light or dark, got {raw:?}"))?;
                options.request.theme = Some(theme);
            }
            unknown if unknown.starts_with('-') => {
                bail!("unknown argument {unknown:?}; run with --help to see supported options");
            }
            page => {
                if options.screen.is_some() {
                    bail!("only one page may be given, got extra {page:?}");
                }
                let screen = Screen::parse(page).ok_or_else(|| {
                    anyhow!("unknown page {page:?}; run with --help to see available pages")
                })?;
                options.screen = Some(screen);
            }
        }
    }

    check_page_options(options.screen, &options.request)?;
    Ok(options)
}

fn next_value<S: AsRef<str>>(
    iter: &mut impl Iterator<Item = S>,
    flag: &str,
    what: &str,
) -> Result<String> {
    iter.next()
        .map(|value| value.as_ref().to_owned())
        .ok_or_else(|| anyhow!("{flag} requires {what}"))
}

fn split_pair(flag: &str, raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_owned(), value.to_owned()))
        }
        _ => bail!("{flag} expects <name>=<value>, got {raw:?}"),
    }
}

/// Rejects page options the chosen page cannot act on.
fn check_page_options(screen: Option<Screen>, request: &PageRequest) -> Result<()> {
    let page = screen.unwrap_or(Screen::Page(PageKind::Bookings));
    let is_list = matches!(
        page,
        Screen::Page(
            PageKind::Bookings | PageKind::Customers | PageKind::Invoices | PageKind::Services
        )
    );
    let reject = |flag: &str| -> Result<()> {
        bail!("{flag} does not apply to the {} page", page.label())
    };

    if !is_list
        && (request.search.is_some() || !request.filters.is_empty() || request.delete.is_some())
    {
        reject("--search/--filter/--delete")?;
    }
    if request.period.is_some() && !matches!(page, Screen::Summary(_)) {
        reject("--period")?;
    }
    if !request.toggles.is_empty()
        && !matches!(
            page,
            Screen::Page(PageKind::Customers | PageKind::Services)
        )
    {
        reject("--toggle")?;
    }
    if (request.add || !request.fields.is_empty()) && page != Screen::Page(PageKind::Services) {
        reject("--add/--set")?;
    }
    if !request.fields.is_empty() && !request.add {
        bail!("--set only applies together with --add");
    }
    if request.theme.is_some() && page != Screen::Page(PageKind::Settings) {
        reject("--theme")?;
    }
    Ok(())
}

fn print_help() {
    println!("homedash [options] <page> [page options]");
    println!();
    println!("Pages:");
    println!("  bookings customers invoices services overview statistics financial settings");
    println!();
    println!("Options:");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Use seeded sample data instead of the booking API");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
    println!();
    println!("Page options:");
    println!("  --search <term>          Case-insensitive search");
    println!("  --filter <facet>=<value> Exact-match filter; value `all` clears it");
    println!("  --period <period>        Time period for overview/statistics (default all-time)");
    println!("  --toggle <id>            Flip a customer or service status locally");
    println!("  --delete <id>            Delete a record after confirmation");
    println!("  --yes                    Skip the delete confirmation");
    println!("  --add                    Add a service from --set fields");
    println!("  --set <field>=<value>    Service form field, for example service_cost=1499");
    println!("  --theme light|dark       Switch the display theme");
}
