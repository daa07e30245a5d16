//! Colorful console output for offer generation.
//!
//! Provides a `tracing` layer that renders `negforge_engine` events with
//! colors. Enabled by the `console` feature.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Honors
/// `RUST_LOG`; engine events default to `info`.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "negforge_engine=info".parse() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host application
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(NegotiationConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let version_line = format!(
        "NegForge v{} - Offer Generation Engine",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats engine events with colors.
pub struct NegotiationConsoleLayer;

impl<S: Subscriber> Layer<S> for NegotiationConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("negforge_engine") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    reason: Option<String>,
    offer: Option<String>,
    issue_count: Option<u64>,
    space_size: Option<u64>,
    generated: Option<u64>,
    added: Option<u64>,
    constraint_count: Option<u64>,
    discovered: Option<u64>,
    utility: Option<f64>,
    max_util: Option<f64>,
    acceptance_threshold: Option<f64>,
    satisfiable: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "reason" => self.reason = Some(s.trim_matches('"').to_string()),
            "offer" => self.offer = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            "offer" => self.offer = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "issue_count" => self.issue_count = Some(value),
            "space_size" => self.space_size = Some(value),
            "generated" => self.generated = Some(value),
            "added" => self.added = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "discovered" => self.discovered = Some(value),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "utility" => self.utility = Some(value),
            "max_util" => self.max_util = Some(value),
            "acceptance_threshold" => self.acceptance_threshold = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "satisfiable" {
            self.satisfiable = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "generator_created" => format_generator_created(v),
        "constraints_applied" => format_constraints_applied(v),
        "constraints_discovered" => format_constraints_discovered(v),
        "offer" => format_offer(v),
        "exhausted" => format_exhausted(v),
        _ => String::new(),
    }
}

fn format_generator_created(v: &EventVisitor) -> String {
    format!(
        "{} {} {} issue count ({}), space size ({}), acceptance threshold ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Generator]".bright_cyan(),
        v.issue_count.unwrap_or(0).bright_yellow(),
        v.space_size.unwrap_or(0).bright_yellow(),
        format_utility(v.acceptance_threshold.unwrap_or(0.0)),
    )
}

fn format_constraints_applied(v: &EventVisitor) -> String {
    let status = if v.satisfiable.unwrap_or(true) {
        "satisfiable".bright_green().to_string()
    } else {
        "unsatisfiable".bright_red().bold().to_string()
    };

    format!(
        "{} {} {} +{} constraints ({} total), max utility ({}), {}",
        timestamp().bright_black(),
        "DEBUG".bright_blue(),
        "[Constraints]".bright_cyan(),
        v.added.unwrap_or(0).yellow(),
        v.constraint_count.unwrap_or(0).white(),
        format_utility(v.max_util.unwrap_or(0.0)),
        status,
    )
}

fn format_constraints_discovered(v: &EventVisitor) -> String {
    format!(
        "{} {} {} discovered {} unreachable values",
        timestamp().bright_black(),
        "DEBUG".bright_blue(),
        "[Discovery]".bright_cyan(),
        v.discovered.unwrap_or(0).bright_magenta(),
    )
}

fn format_offer(v: &EventVisitor) -> String {
    format!(
        "    {} {} | {}",
        "->".bright_blue(),
        format_utility(v.utility.unwrap_or(0.0)),
        v.offer.as_deref().unwrap_or("[]").white(),
    )
}

fn format_exhausted(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Exhausted after {} offers ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Generator]".bright_cyan(),
        v.generated.unwrap_or(0).bright_yellow(),
        v.reason.as_deref().unwrap_or("unknown").replace('_', " "),
    )
}

fn format_utility(utility: f64) -> String {
    let text = format!("{}", utility);
    if utility < 0.0 {
        text.bright_red().to_string()
    } else if utility > 0.0 {
        text.bright_green().to_string()
    } else {
        text.white().to_string()
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}
