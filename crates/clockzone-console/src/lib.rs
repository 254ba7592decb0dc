//! Colorful console output for zone diagnostics.
//!
//! Provides a custom `tracing` layer that formats zone engine events with
//! colors.
//!
//! ## Log Levels
//!
//! - **DEBUG**: Derived constructions (absolute zones, empty timelines)
//! - **TRACE**: Individual tightenings that empty a zone, extrapolation

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};


static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Directive used when neither `RUST_LOG` nor the caller sets one.
pub const DEFAULT_DIRECTIVE: &str = "clockzone_zone=info";

/// Initializes console output with the default filter.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with(None);
}

/// Initializes console output, using `directive` when `RUST_LOG` is unset.
///
/// Pass the `log_filter` of a loaded configuration here. Invalid directives
/// are skipped rather than rejected.
pub fn init_with(directive: Option<&str>) {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);

        let _ = tracing_subscriber::registry()
            .with(build_filter(directive))
            .with(ZoneConsoleLayer)
            .try_init();
    });
}

fn build_filter(directive: Option<&str>) -> EnvFilter {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(env) if !env.trim().is_empty() => EnvFilter::builder().parse_lossy(env),
        _ => EnvFilter::builder().parse_lossy(directive.unwrap_or(DEFAULT_DIRECTIVE)),
    }
}

fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

/// A tracing layer that formats zone events with colors.
pub struct ZoneConsoleLayer;

impl<S: Subscriber> Layer<S> for ZoneConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Accept events from engine crates only
        if !metadata.target().starts_with("clockzone") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(
                io::stdout(),
                "{} {}",
                format!("{:>7.3}s", elapsed_secs()).bright_black(),
                output
            );
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    size: Option<i64>,
    dim: Option<i64>,
    clock: Option<i64>,
    i: Option<i64>,
    j: Option<i64>,
    raw: Option<i64>,
    bound: Option<i64>,
    upper: Option<i64>,
    constant: Option<i64>,
    guards: Option<i64>,
    strict: Option<bool>,
    valid: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "event" {
            self.event = Some(format!("{:?}", value).trim_matches('"').to_string());
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        let slot = match field.name() {
            "size" => &mut self.size,
            "dim" => &mut self.dim,
            "clock" => &mut self.clock,
            "i" => &mut self.i,
            "j" => &mut self.j,
            "raw" => &mut self.raw,
            "bound" => &mut self.bound,
            "upper" => &mut self.upper,
            "constant" => &mut self.constant,
            "guards" => &mut self.guards,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_i64(field, i64::try_from(value).unwrap_or(i64::MAX));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "strict" => self.strict = Some(value),
            "valid" => self.valid = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.event = Some(value.to_string());
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "zone_emptied" => format_zone_emptied(v),
        "negative_cycle" => format_negative_cycle(v),
        "extrapolate" => format_extrapolate(v),
        "absolute_zone" => format_absolute_zone(v),
        "timeline_empty" => format_timeline_empty(v),
        _ => String::new(),
    }
}

fn format_size(v: &EventVisitor) -> String {
    v.size.or(v.dim).unwrap_or(0).to_string()
}

fn format_zone_emptied(v: &EventVisitor) -> String {
    let cell = format!("({}, {})", v.i.unwrap_or(0), v.j.unwrap_or(0));
    let mut output = format!(
        "{} Zone emptied │ size {} │ entry {}",
        "✗".bright_red().bold(),
        format_size(v).bright_yellow(),
        cell.white().bold()
    );

    if let Some(bound) = v.bound {
        let op = if v.strict.unwrap_or(false) { "<" } else { "≤" };
        output.push_str(&format!(" │ {}{}", op, bound.bright_magenta()));
    } else if let Some(raw) = v.raw {
        output.push_str(&format!(" │ raw {}", raw.bright_magenta()));
    }

    output
}

fn format_negative_cycle(v: &EventVisitor) -> String {
    format!(
        "{} Negative cycle │ size {} │ clock {}",
        "✗".bright_red().bold(),
        format_size(v).bright_yellow(),
        v.clock.unwrap_or(0).white().bold()
    )
}

fn format_extrapolate(v: &EventVisitor) -> String {
    format!(
        "{} Extrapolated │ size {} │ constant {}",
        "⇡".bright_blue(),
        format_size(v).bright_yellow(),
        v.constant.unwrap_or(0).bright_magenta()
    )
}

fn format_absolute_zone(v: &EventVisitor) -> String {
    let status = if v.valid.unwrap_or(false) {
        "VALID".bright_green().bold().to_string()
    } else {
        "EMPTY".bright_red().bold().to_string()
    };

    format!(
        "{} Absolute zone │ size {} │ {} guards │ {}",
        "◆".bright_cyan().bold(),
        format_size(v).bright_yellow(),
        v.guards.unwrap_or(0).white(),
        status
    )
}

fn format_timeline_empty(v: &EventVisitor) -> String {
    format!(
        "{} Zones never meet │ clock {} │ raw upper {}",
        "∅".bright_red(),
        v.clock.unwrap_or(0).white().bold(),
        v.upper.unwrap_or(0).bright_magenta()
    )
}
