use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::time::Instant;
use tokio::time::{sleep, Duration};

use fleetfront::cli::{Cli, Commands};
use fleetfront::config::EnhanceConfig;
use fleetfront::events::{EventResult, PageEvent};
use fleetfront::page::{Page, Selector};
use fleetfront::services::fleet_stats::FleetStatsService;
use fleetfront::services::leads::LeadService;
use fleetfront::ui::Enhancer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing for logging
    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let config = match &cli.config {
        Some(path) => EnhanceConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EnhanceConfig::default(),
    };

    match cli.command {
        Commands::Run { page, stats_url } => run_trace(&page, stats_url, &config).await,
        Commands::Inspect { page } => inspect(&page, &config),
    }
}

/// Attach the suite to a page and drive it through a scripted visit:
/// scroll to the bottom, fetch live stats if the page wants them, then
/// ride the back-to-top control home.
async fn run_trace(page_path: &Path, stats_url: Option<String>, config: &EnhanceConfig) -> Result<()> {
    let html = std::fs::read_to_string(page_path)
        .with_context(|| format!("reading {}", page_path.display()))?;
    let mut page = Page::parse(&html)?;
    let mut enhancer = Enhancer::attach(&mut page, config);
    let lead_service = LeadService::new(&config.base_url, &config.leads_path).ok();

    enhancer.handle_event(&mut page, &PageEvent::Ready);

    // Scroll sweep down the page.
    let bottom = page_bottom(&page, config);
    let mut y = 0.0;
    while y < bottom {
        y += 150.0;
        dispatch(&mut enhancer, &mut page, &lead_service, PageEvent::Scrolled { y }).await;
        dispatch(
            &mut enhancer,
            &mut page,
            &lead_service,
            PageEvent::Frame {
                now: Instant::now(),
            },
        )
        .await;
        sleep(Duration::from_millis(16)).await;
    }
    drain_frames(&mut enhancer, &mut page).await;

    if enhancer.wants_fleet_stats() {
        let base = stats_url.as_deref().unwrap_or(&config.base_url);
        match FleetStatsService::new(base, &config.fleet_stats_path) {
            Ok(service) => match service.fetch().await {
                Ok(stats) => enhancer.apply_fleet_stats(&mut page, &stats),
                Err(e) => tracing::debug!("fleet stats unavailable: {}", e),
            },
            Err(e) => tracing::debug!("fleet stats endpoint rejected: {}", e),
        }
    }

    // Ride the injected control back to the top.
    if let Some(button) = page.element_by_id("back-to-top") {
        dispatch(
            &mut enhancer,
            &mut page,
            &lead_service,
            PageEvent::Clicked { target: button },
        )
        .await;
        drain_frames(&mut enhancer, &mut page).await;
    }

    println!("trace complete for {}", page_path.display());
    println!("  final scroll offset: {}", page.scroll_y());
    println!("  header sticky: {}", enhancer.header_is_sticky(&page));
    println!("  back-to-top visible: {}", enhancer.back_to_top_visible(&page));
    for counter in page.select(&Selector::parse("[data-count]")?) {
        println!(
            "  counter {} -> {}",
            page.element(counter).attr("data-count").unwrap_or("?"),
            page.element(counter).text()
        );
    }
    Ok(())
}

/// Handle one event and execute whatever network work it requested.
async fn dispatch(
    enhancer: &mut Enhancer,
    page: &mut Page,
    lead_service: &Option<LeadService>,
    event: PageEvent,
) {
    match enhancer.handle_event(page, &event) {
        EventResult::SubmitLead(payload) => {
            let Some(service) = lead_service else {
                return;
            };
            match service.submit(&payload).await {
                Ok(()) => enhancer.mark_lead_sent(page),
                Err(e) => tracing::warn!("lead submission failed: {}", e),
            }
        }
        EventResult::Continue | EventResult::Consumed => {}
    }
}

/// Run animation frames until every tween settles.
async fn drain_frames(enhancer: &mut Enhancer, page: &mut Page) {
    while enhancer.is_animating() {
        enhancer.handle_event(
            page,
            &PageEvent::Frame {
                now: Instant::now(),
            },
        );
        sleep(Duration::from_millis(16)).await;
    }
}

fn page_bottom(page: &Page, config: &EnhanceConfig) -> f64 {
    let deepest = page
        .select(&Selector::parse("[data-offset-top]").expect("static selector"))
        .into_iter()
        .map(|el| page.element(el).offset_top() + page.element(el).height())
        .fold(0.0_f64, f64::max);
    (deepest - config.viewport_height).max(config.viewport_height)
}

fn inspect(page_path: &Path, config: &EnhanceConfig) -> Result<()> {
    let html = std::fs::read_to_string(page_path)
        .with_context(|| format!("reading {}", page_path.display()))?;
    let page = Page::parse(&html)?;

    let count = |selector: &str| -> Result<usize> {
        Ok(page.select(&Selector::parse(selector)?).len())
    };

    println!("{}", page_path.display());
    println!("  header: {}", count(&config.header_selector)?);
    println!("  menu panel: {}", count(&config.menu.panel)?);
    println!("  menu toggle: {}", count(&config.menu.toggle)?);
    println!("  counters: {}", count(&config.counter_selector)?);
    println!("  phone fields: {}", count(&config.phone_selector)?);
    println!("  deferred images: {}", count(&config.lazy_image_selector)?);
    println!("  in-page anchors: {}", count(r##"a[href^="#"]"##)?);
    println!("  stats section: {}", count(&config.stats_section_selector)?);
    println!("  lead form: {}", count(&config.lead_form_selector)?);
    Ok(())
}
