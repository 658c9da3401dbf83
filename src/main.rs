// SPDX-License-Identifier: MIT
//
// focus-rings — command-line front end for the focus ring engine.
//
// Two subcommands, both pure computation over the workspace crates:
//
//   probe <color>...   composite background layers (nearest first) and
//                      report the ring color the engine would pick
//   demo               build a small in-memory document, move focus
//                      between two scopes, and print each ring's style
//
// Flags use `name=value` form, like the editor's `:set` arguments:
//
//   --threshold=F      brightness threshold override (relative luminance)
//   --offset=N         ring inset in pixels (demo only)
//
// Logging goes to stderr through tracing; FOCUS_RINGS_LOG takes an
// EnvFilter directive (default "warn").

use std::env;
use std::process;

use fr_color::Color;
use fr_contrast::{ContrastConfig, RingColor, ThemeOptions, composite_layers, contrast_ratio, select_ring_color};
use fr_engine::{
    ComputedStyle, DocumentTree, Rect, RingError, RingRegistry, RingShowOptions, RingStyle, RingTracker, ScopeId,
    ScrollOffset,
};
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "FOCUS_RINGS_LOG";

const USAGE: &str = "\
usage: focus-rings probe [--threshold=F] <color>...
       focus-rings demo [--threshold=F] [--offset=N]
       focus-rings help";

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
enum CliError {
    #[error("missing command (try 'focus-rings help')")]
    MissingCommand,

    #[error("unknown command '{0}' (try 'focus-rings help')")]
    UnknownCommand(String),

    #[error("unknown flag '{0}'")]
    UnknownFlag(String),

    #[error("invalid value for --{name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("probe needs at least one background color")]
    NoLayers,

    #[error("demo takes no positional arguments, got '{0}'")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Ring(#[from] RingError),
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Flags {
    threshold: Option<f64>,
    offset: f64,
}

impl Flags {
    fn theme(self) -> ThemeOptions {
        ThemeOptions { brightness_threshold: self.threshold }
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Probe { layers: Vec<String>, flags: Flags },
    Demo(Flags),
    Help,
}

/// Parse everything after the program name.
fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let (command, rest) = args.split_first().ok_or(CliError::MissingCommand)?;

    let mut flags = Flags::default();
    let mut positional = Vec::new();
    for arg in rest {
        match arg.strip_prefix("--") {
            Some(flag) => parse_flag(flag, &mut flags)?,
            None => positional.push(arg.clone()),
        }
    }

    match command.as_str() {
        "probe" if positional.is_empty() => Err(CliError::NoLayers),
        "probe" => Ok(Command::Probe { layers: positional, flags }),
        "demo" => match positional.into_iter().next() {
            Some(extra) => Err(CliError::UnexpectedArgument(extra)),
            None => Ok(Command::Demo(flags)),
        },
        "help" | "-h" | "--help" => Ok(Command::Help),
        other => Err(CliError::UnknownCommand(other.to_owned())),
    }
}

/// Apply one `name=value` flag (leading dashes already stripped).
fn parse_flag(flag: &str, flags: &mut Flags) -> Result<(), CliError> {
    let (name, value) = flag.split_once('=').unwrap_or((flag, ""));
    match name {
        "threshold" => {
            let threshold = parse_number("threshold", value)?;
            flags.threshold = Some(threshold);
        }
        "offset" => flags.offset = parse_number("offset", value)?,
        _ => return Err(CliError::UnknownFlag(format!("--{flag}"))),
    }
    Ok(())
}

fn parse_number(name: &'static str, value: &str) -> Result<f64, CliError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CliError::InvalidValue { name, value: value.to_owned() })
}

// ─── probe ──────────────────────────────────────────────────────────────────

/// Everything `probe` reports about one background stack.
#[derive(Debug, Clone, PartialEq)]
struct Probe {
    background: Color,
    saturation: f64,
    luminance: f64,
    ring: RingColor,
    /// Contrast of the ring (composited over the background) against the
    /// background. `None` for the theme color, which is not known here.
    contrast: Option<f64>,
}

fn probe(layers: &[&str], flags: Flags) -> Probe {
    for &layer in layers {
        if Color::parse(layer).is_none() {
            warn!(layer, "skipping unparsable background layer");
        }
    }

    let background = composite_layers(layers.iter().copied());
    let theme = flags.theme();
    let ring = select_ring_color(Some(background), Some(&theme), &ContrastConfig::default());
    debug!(%background, ?ring, "probe resolved");

    Probe {
        background,
        saturation: background.to_hsl().saturation,
        luminance: background.relative_luminance(),
        ring,
        contrast: ring.color().map(|c| contrast_ratio(c.over(background), background)),
    }
}

fn format_probe(p: &Probe) -> Vec<String> {
    let contrast = p.contrast.map_or_else(|| "n/a (theme color)".to_owned(), |r| format!("{r:.2}:1"));
    vec![
        format!("background  {}  {}", p.background, p.background.to_hex_string()),
        format!("saturation  {:.3}", p.saturation),
        format!("luminance   {:.4}", p.luminance),
        format!("ring        {:?}  {}", p.ring, p.ring),
        format!("contrast    {contrast}"),
    ]
}

// ─── demo ───────────────────────────────────────────────────────────────────

/// Walk a small scene through a focus handoff and describe each step.
///
/// body (white, global container)
/// ├── toolbar (deep blue, z-index 10)
/// │   └── save button (6px corners)
/// └── dialog (amber, its own scope)
///     └── name input
fn demo(flags: Flags) -> Result<Vec<String>, CliError> {
    let mut doc = DocumentTree::new();
    let body = doc.insert(None, ComputedStyle::new().background("#ffffff"), Rect::new(0.0, 0.0, 1024.0, 768.0));
    let toolbar = doc.insert(
        Some(body),
        ComputedStyle::new().background("#1e3a8a").z_index("10"),
        Rect::new(0.0, 0.0, 1024.0, 48.0),
    );
    let save = doc.insert(Some(toolbar), ComputedStyle::new().radius("6px"), Rect::new(8.0, 16.0, 72.0, 32.0));
    let dialog = doc.insert(
        Some(body),
        ComputedStyle::new().background("rgb(251, 191, 36)").radius("12px"),
        Rect::new(200.0, 312.0, 400.0, 240.0),
    );
    let input = doc.insert(
        Some(dialog),
        ComputedStyle::new().background("rgba(255, 255, 255, 0.1)").radius("4px"),
        Rect::new(260.0, 336.0, 352.0, 28.0),
    );

    let theme = flags.theme();
    let options = RingShowOptions::new().with_offset(flags.offset);
    let mut registry = RingRegistry::new(Some(body));
    let dialog_scope = registry.create_scope(Some(dialog), Some(theme));
    registry.manager_mut(ScopeId::GLOBAL)?.set_theme_options(Some(theme));
    registry.set_rings_enabled(true);

    let mut tracker = RingTracker::new();
    tracker.enable();
    let mut lines = Vec::new();

    registry.show(ScopeId::GLOBAL, &doc, save, options.clone())?;
    tracker.tick(&mut registry, &doc);
    lines.push("focus save button (global scope)".to_owned());
    describe(&mut lines, "global", &registry.render_style(ScopeId::GLOBAL, &doc)?);

    doc.set_scroll(body, ScrollOffset::new(0.0, 24.0));
    let outcome = tracker.tick(&mut registry, &doc);
    lines.push(format!("scroll body 24px right: tracker {outcome:?}"));
    describe(&mut lines, "global", tracker.last_style());

    registry.show(dialog_scope, &doc, input, options)?;
    let outcome = tracker.tick(&mut registry, &doc);
    lines.push(format!("focus name input (dialog scope): tracker {outcome:?}"));
    describe(&mut lines, "global", &registry.render_style(ScopeId::GLOBAL, &doc)?);
    describe(&mut lines, "dialog", &registry.render_style(dialog_scope, &doc)?);

    Ok(lines)
}

fn describe(lines: &mut Vec<String>, scope: &str, style: &RingStyle) {
    if !style.is_visible() {
        lines.push(format!("  {scope}: hidden"));
        return;
    }
    lines.push(format!("  {scope}:"));
    for (property, value) in style.css_properties() {
        lines.push(format!("    {property}: {value}"));
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &[String]) -> Result<Vec<String>, CliError> {
    match parse_args(args)? {
        Command::Probe { layers, flags } => {
            let layers: Vec<&str> = layers.iter().map(String::as_str).collect();
            Ok(format_probe(&probe(&layers, flags)))
        }
        Command::Demo(flags) => demo(flags),
        Command::Help => Ok(USAGE.lines().map(str::to_owned).collect()),
    }
}

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().skip(1).collect();

    match run(&args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            eprintln!("focus-rings: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
