use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use catalog_core::{
    CatalogError, ControllerEvent, GraphQlCatalogClient, QueryStateController, SessionContext,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use shared::{
    domain::{CourseCategory, CourseId, CourseType, MemberId},
    error::ErrorCode,
    inquiry::SortPreset,
};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod navigator;
mod render;

use config::{load_settings, read_token_file, ListingView, Settings};
use navigator::ShareableLinkNavigator;

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Browse and filter the course catalog")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// GraphQL endpoint; overrides the config file.
    #[arg(long)]
    endpoint: Option<String>,
    /// A shared link, or just its query string, e.g. `input=%7B...%7D`.
    #[arg(long)]
    address: Option<String>,
    #[arg(long, value_enum)]
    view: Option<ListingView>,
    /// Only courses owned by this member.
    #[arg(long)]
    member: Option<String>,
    #[arg(long)]
    token_file: Option<PathBuf>,
    /// Stacked layout for narrow terminals.
    #[arg(long)]
    compact: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply filter changes in order and show the resulting page.
    Browse(BrowseArgs),
    /// Like a course, then show the refreshed page.
    Like { course_id: String },
}

#[derive(ClapArgs, Debug, Default)]
struct BrowseArgs {
    /// Start from the view's default inquiry, dropping any address state.
    #[arg(long)]
    reset: bool,
    #[arg(long = "category")]
    categories: Vec<CourseCategory>,
    #[arg(long = "uncheck-category")]
    unchecked_categories: Vec<CourseCategory>,
    #[arg(long = "type")]
    types: Vec<CourseType>,
    #[arg(long = "uncheck-type")]
    unchecked_types: Vec<CourseType>,
    /// Free-text search; an empty string clears it.
    #[arg(long)]
    text: Option<String>,
    /// Single-select option; `all` removes it.
    #[arg(long)]
    option: Option<String>,
    #[arg(long)]
    sort: Option<SortPreset>,
    #[arg(long)]
    page: Option<u32>,
}

impl BrowseArgs {
    fn has_changes(&self) -> bool {
        self.reset
            || !self.categories.is_empty()
            || !self.unchecked_categories.is_empty()
            || !self.types.is_empty()
            || !self.unchecked_types.is_empty()
            || self.text.is_some()
            || self.option.is_some()
            || self.sort.is_some()
            || self.page.is_some()
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(endpoint) = &args.endpoint {
        settings.graphql_url = endpoint.clone();
    }
    if let Some(token_file) = &args.token_file {
        settings.token_file = Some(token_file.clone());
    }
    init_tracing(&settings);

    let persisted_token = match &settings.token_file {
        Some(path) => read_token_file(path)?,
        None => None,
    };
    let session = SessionContext::hydrate(persisted_token.as_deref());

    let client = Arc::new(
        GraphQlCatalogClient::with_timeout(
            settings.graphql_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
        .context("failed to build GraphQL client")?,
    );
    let navigator = Arc::new(ShareableLinkNavigator::new(settings.site_url.clone()));

    let view = args.view.unwrap_or(settings.default_view);
    let default_inquiry = view.default_inquiry(args.member.map(MemberId::new));
    let controller = QueryStateController::new_with_dependencies(
        default_inquiry,
        args.address.as_deref(),
        client.clone(),
        client,
        navigator.clone(),
        session,
    );
    let mut events = controller.subscribe_events();
    info!(endpoint = %settings.graphql_url, ?view, "catalog session started");

    match args.command {
        Some(Command::Like { course_id }) => {
            if let Err(err) = controller.like_course(&CourseId::new(course_id)).await {
                report(&err);
            }
        }
        Some(Command::Browse(browse)) => apply_browse(&controller, &browse).await,
        None => apply_browse(&controller, &BrowseArgs::default()).await,
    }

    log_pending_events(&mut events);

    let snapshot = controller.snapshot().await;
    let columns = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok());
    print!(
        "{}",
        render::select_renderer(args.compact, columns).render(&snapshot)
    );
    if let Some(link) = navigator.shareable_link() {
        println!("\nShare: {link}");
    }

    Ok(())
}

/// Logs stale discards still queued on the event channel and returns how
/// many were seen. A lagging receiver skips ahead instead of stopping.
fn log_pending_events(events: &mut broadcast::Receiver<ControllerEvent>) -> usize {
    let mut stale = 0;
    loop {
        match events.try_recv() {
            Ok(ControllerEvent::StaleResponseDiscarded { sequence, latest }) => {
                stale += 1;
                warn!(sequence, latest, "ignored response for superseded inquiry");
            }
            Ok(_) => {}
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "controller events dropped before they were read");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return stale,
        }
    }
}

/// Mirrors a filter panel: each flag is one interaction, committed on its own.
/// A failed interaction is reported and the remaining ones still run.
async fn apply_browse(controller: &QueryStateController, browse: &BrowseArgs) {
    if !browse.has_changes() {
        if let Err(err) = controller.refresh().await {
            report(&err);
        }
        return;
    }

    if browse.reset {
        run(controller.reset().await);
    }
    for category in &browse.categories {
        run(controller.toggle_category(*category, true).await);
    }
    for category in &browse.unchecked_categories {
        run(controller.toggle_category(*category, false).await);
    }
    for course_type in &browse.types {
        run(controller.toggle_type(*course_type, true).await);
    }
    for course_type in &browse.unchecked_types {
        run(controller.toggle_type(*course_type, false).await);
    }
    if let Some(text) = &browse.text {
        controller.edit_text(text.clone()).await;
        run(controller.commit_text().await);
    }
    if let Some(option) = &browse.option {
        run(controller.select_option(option).await);
    }
    if let Some(sort) = browse.sort {
        run(controller.select_sort(sort).await);
    }
    if let Some(page) = browse.page {
        run(controller.set_page(page).await);
    }
}

fn run(result: Result<(), CatalogError>) {
    if let Err(err) = result {
        report(&err);
    }
}

fn report(err: &CatalogError) {
    let api_error = err.to_api_error();
    match api_error.code {
        ErrorCode::NotAuthenticated => eprintln!("note: {}", api_error.message),
        code if code.is_blocking() => eprintln!("error: {}", api_error.message),
        _ => eprintln!("warning: {}", api_error.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lagged_receiver_keeps_reading_stale_discards() {
        let (tx, mut rx) = broadcast::channel(2);
        for sequence in 1..=4 {
            tx.send(ControllerEvent::StaleResponseDiscarded {
                sequence,
                latest: 5,
            })
            .expect("send");
        }

        assert_eq!(log_pending_events(&mut rx), 2);
        assert_eq!(log_pending_events(&mut rx), 0);
    }
}
