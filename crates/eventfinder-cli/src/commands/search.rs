//! Search command and result rendering.

use std::borrow::Cow;
use std::fmt::Write as _;

use tracing::debug;

use eventfinder_core::{Event, FusionResult, PriceRange};
use eventfinder_router::FusionOrchestrator;

use crate::cli::{OutputFormat, SearchArgs};
use crate::error::{ClientError, ClientResult};

const MAX_TITLE_LENGTH: usize = 60;

/// Runs a search and prints the result in the requested format.
pub async fn run(orchestrator: &FusionOrchestrator, args: &SearchArgs) -> ClientResult<()> {
    let query = args.to_query();
    debug!(location = %query.location, "running search");

    let result = orchestrator.fetch(&query).await?;
    print!("{}", render(&result, args.output_format())?);
    Ok(())
}

/// Renders a fusion result.
pub fn render(result: &FusionResult, format: OutputFormat) -> ClientResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => to_json(&result.public_view()),
        OutputFormat::Debug => to_json(result),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> ClientResult<String> {
    let mut out = serde_json::to_string_pretty(value)
        .map_err(|e| ClientError::Output(format!("failed to serialize result: {}", e)))?;
    out.push('\n');
    Ok(out)
}

/// Human-readable listing: a header, one block per event, then provider
/// warnings and errors.
pub fn render_text(result: &FusionResult) -> String {
    let mut out = String::new();

    let noun = if result.total == 1 { "event" } else { "events" };
    let _ = writeln!(
        out,
        "Found {} {} via {} ({})",
        result.total,
        noun,
        providers_label(&result.providers_called),
        result.routing.source
    );

    for event in &result.events {
        out.push('\n');
        render_event(&mut out, event);
    }

    let warnings: Vec<_> = result
        .provider_results
        .iter()
        .filter_map(|(name, summary)| summary.warning.as_deref().map(|w| (name, w)))
        .collect();
    if !warnings.is_empty() || result.has_errors() {
        out.push('\n');
    }
    for (name, warning) in warnings {
        let _ = writeln!(out, "warning: {}: {}", name, warning);
    }
    for (name, error) in &result.errors {
        let _ = writeln!(out, "error: {}: {}", name, error);
    }

    out
}

fn providers_label(providers: &[String]) -> Cow<'_, str> {
    if providers.is_empty() {
        Cow::Borrowed("no providers")
    } else {
        Cow::Owned(providers.join(", "))
    }
}

fn render_event(out: &mut String, event: &Event) {
    let when = if event.time.is_empty() {
        event.date.clone()
    } else {
        format!("{} {}", event.date, event.time)
    };
    let _ = writeln!(out, "{}  {}", when, ellipsis(&event.name, MAX_TITLE_LENGTH));

    let place = match (event.venue.is_empty(), event.location.is_empty()) {
        (false, false) => format!("{}, {}", event.venue, event.location),
        (false, true) => event.venue.clone(),
        (true, false) => event.location.clone(),
        (true, true) => String::new(),
    };
    if !place.is_empty() {
        let _ = writeln!(out, "    {}", place);
    }
    if let Some(price) = format_price(&event.price_range) {
        let _ = writeln!(out, "    {}", price);
    }
    if !event.url.is_empty() {
        let _ = writeln!(out, "    {}", event.url);
    }
    let _ = writeln!(out, "    [{}]", event.provider);
}

/// Formats a price range, or `None` when no bound is known.
pub fn format_price(price: &PriceRange) -> Option<String> {
    let currency = price.currency.as_deref().unwrap_or("USD");
    match (price.min, price.max) {
        (Some(min), Some(max)) if min == max => Some(format!("{:.2} {}", min, currency)),
        (Some(min), Some(max)) => Some(format!("{:.2} - {:.2} {}", min, max, currency)),
        (Some(min), None) => Some(format!("from {:.2} {}", min, currency)),
        (None, Some(max)) => Some(format!("up to {:.2} {}", max, currency)),
        (None, None) => None,
    }
}

/// Truncates `s` to `max_len` characters, ending with "...".
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }
    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}
