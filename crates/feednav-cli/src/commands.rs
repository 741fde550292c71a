//! Subcommand implementations.
//!
//! Every command writes its report to the given writer; `main` passes
//! stdout.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use tracing::{debug, info};

use feednav_core::{
    CachingNameResolver, MemoryHistory, NavigationError, Navigator, NavigatorSettings,
    PreloadSummary, StateManager,
};
use feednav_feed::GtfsDirectoryFeed;
use feednav_model::{NavigationEvent, PageState, codec};

use crate::cli::{Command, CrumbsArgs, DecodeArgs, NamesArgs, WalkArgs};
use crate::render::{trail_line, walk_line};
use crate::steps::{Step, parse_steps};
use crate::summary::{breadcrumb_table, history_table, preload_table};

pub fn load_settings(path: Option<&Path>) -> Result<NavigatorSettings> {
    match path {
        Some(path) => NavigatorSettings::try_load_from(path)
            .with_context(|| format!("load settings from {}", path.display())),
        None => Ok(NavigatorSettings::load()),
    }
}

/// Run `command` and return the process exit code.
pub async fn run<W: Write>(command: &Command, settings: &NavigatorSettings, out: &mut W) -> Result<i32> {
    match command {
        Command::Decode(args) => run_decode(args, settings, out).map(|()| 0),
        Command::Crumbs(args) => run_crumbs(args, settings, out).await.map(|()| 0),
        Command::Walk(args) => run_walk(args, settings, out).await.map(|()| 0),
        Command::Names(args) => run_names(args, settings, out)
            .await
            .map(|summary| preload_exit_code(&summary)),
    }
}

/// `1` when any table failed to preload.
pub fn preload_exit_code(summary: &PreloadSummary) -> i32 {
    if summary.is_complete() { 0 } else { 1 }
}

/// Text printed to stderr for a failed command.
///
/// Navigation errors add their plain-language message and a hint.
pub fn error_report(error: &anyhow::Error) -> String {
    let mut report = format!("error: {error:#}");
    if let Some(navigation) = error.downcast_ref::<NavigationError>() {
        let _ = write!(report, "\n  {}", navigation.user_message());
        if let Some(suggestion) = navigation.suggestion() {
            let _ = write!(report, "\n  hint: {suggestion}");
        }
    }
    report
}

pub fn run_decode<W: Write>(args: &DecodeArgs, settings: &NavigatorSettings, out: &mut W) -> Result<()> {
    let state = codec::decode(&args.query);
    let json = serde_json::to_string_pretty(&state).context("serialize page state")?;
    writeln!(out, "{json}")?;
    writeln!(out, "URL: {}", codec::encode_url(&settings.url.base_path, &state))?;
    Ok(())
}

pub async fn run_crumbs<W: Write>(
    args: &CrumbsArgs,
    settings: &NavigatorSettings,
    out: &mut W,
) -> Result<()> {
    let resolver = open_resolver(&args.feed_dir, settings, None).await?;
    if settings.cache.preload_on_open {
        resolver.preload_cache().await;
    }

    let mut manager = StateManager::from_settings(resolver, settings, None);
    let mut navigator = manager.navigator();
    let state = navigator
        .init_from_location(&args.query)
        .await
        .context("navigate to URL")?;
    let items = navigator.current_breadcrumbs().await;

    writeln!(out, "Page: {state}")?;
    writeln!(out, "{}", trail_line(&items))?;
    if !items.is_empty() {
        writeln!(out, "{}", breadcrumb_table(&items, &settings.url.base_path))?;
    }
    Ok(())
}

pub async fn run_walk<W: Write>(args: &WalkArgs, settings: &NavigatorSettings, out: &mut W) -> Result<()> {
    let steps = parse_steps(&args.steps)?;
    info!(steps = steps.len(), "replaying navigation");

    let resolver = open_resolver(&args.feed_dir, settings, None).await?;
    if settings.cache.preload_on_open {
        resolver.preload_cache().await;
    }

    let host = MemoryHistory::new(settings.url.base_path.clone());
    let mut manager =
        StateManager::from_settings(resolver, settings, Some(Box::new(host.clone())));

    let events: Arc<Mutex<Vec<NavigationEvent>>> = Arc::default();
    let sink = Arc::clone(&events);
    manager.add_navigation_handler(move |event| {
        debug!(from = %event.from(), to = %event.to(), "walk transition");
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    });

    for (index, step) in steps.iter().enumerate() {
        let before = event_count(&events);
        let mut navigator = manager.navigator();
        match step {
            Step::Navigate(state) => navigate(&mut navigator, state)
                .await
                .with_context(|| format!("step {}: {step}", index + 1))?,
            Step::Back => {
                navigator.navigate_back().await;
            }
        }
        let trail = navigator.current_breadcrumbs().await;
        let event = latest_event(&events, before);
        writeln!(out, "{}", walk_line(index + 1, step, event.as_ref(), &trail))?;
    }

    writeln!(out)?;
    writeln!(out, "History:")?;
    writeln!(out, "{}", history_table(&manager.navigation_history()))?;
    if let Some(location) = manager.current_location() {
        writeln!(out, "URL: {location}")?;
    }
    info!(
        steps = steps.len(),
        history = manager.navigation_history().len(),
        "walk finished"
    );
    Ok(())
}

pub async fn run_names<W: Write>(
    args: &NamesArgs,
    settings: &NavigatorSettings,
    out: &mut W,
) -> Result<PreloadSummary> {
    let resolver = open_resolver(&args.feed_dir, settings, args.stop_limit).await?;
    preload_names(&resolver, out).await
}

/// Preload `resolver` and write the per-table report.
pub async fn preload_names<W: Write>(
    resolver: &CachingNameResolver,
    out: &mut W,
) -> Result<PreloadSummary> {
    let summary = resolver.preload_cache().await;
    writeln!(out, "{}", preload_table(&summary))?;
    writeln!(out, "Stop preload limit: {}", resolver.stop_preload_limit())?;
    writeln!(out, "Cached names: {}", resolver.cache_len())?;
    Ok(summary)
}

async fn open_resolver(
    feed_dir: &Path,
    settings: &NavigatorSettings,
    stop_limit: Option<usize>,
) -> Result<Arc<CachingNameResolver>> {
    let feed = GtfsDirectoryFeed::open_async(feed_dir.to_path_buf())
        .await
        .with_context(|| format!("open feed {}", feed_dir.display()))?;
    let resolver = CachingNameResolver::new(Arc::new(feed))
        .with_stop_preload_limit(stop_limit.unwrap_or(settings.cache.stop_preload_limit));
    Ok(Arc::new(resolver))
}

async fn navigate(navigator: &mut Navigator<'_>, state: &PageState) -> feednav_core::Result<()> {
    match state {
        PageState::Home => navigator.navigate_to_home().await,
        PageState::Agency { agency_id } => navigator.navigate_to_agency(agency_id).await,
        PageState::Route { route_id } => navigator.navigate_to_route(route_id).await,
        PageState::Timetable {
            route_id,
            service_id,
            direction_id,
        } => {
            navigator
                .navigate_to_timetable(route_id, service_id, direction_id.as_deref())
                .await
        }
        PageState::Stop { stop_id } => navigator.navigate_to_stop(stop_id).await,
        PageState::Service { service_id } => navigator.navigate_to_service(service_id).await,
    }
}

fn event_count(events: &Mutex<Vec<NavigationEvent>>) -> usize {
    events.lock().unwrap_or_else(PoisonError::into_inner).len()
}

fn latest_event(events: &Mutex<Vec<NavigationEvent>>, before: usize) -> Option<NavigationEvent> {
    let events = events.lock().unwrap_or_else(PoisonError::into_inner);
    if events.len() > before {
        events.last().cloned()
    } else {
        None
    }
}
