//! Argument parsing and command execution.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use lokale::settings::RealEnv;
use lokale::{
    global, parse, Arg, ComponentMap, Element, NodeWriter, Rendered, Settings, TagTransform,
};

/// How translated output is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Text only.
    Plain,
    /// Text styled per element, using the configured styles.
    #[default]
    Term,
    /// Elements shown as `[name]…[/name]`.
    Debug,
    /// Escaped HTML.
    Html,
}

/// Translate messages and render component templates.
#[derive(Debug, Parser)]
#[command(name = "lokale", version, about)]
pub struct Cli {
    /// Settings file (YAML).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Locale to translate into (overrides settings and LOKALE_LOCALE).
    #[arg(short, long, global = true)]
    pub locale: Option<String>,

    /// Directory holding catalog files.
    #[arg(long, global = true, value_name = "DIR")]
    pub catalog_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Term)]
    pub output: OutputFormat,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a message, formatting ARGS into its placeholders.
    T {
        message: String,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Translate a pluralized message; COUNT selects the plural form.
    Tn {
        singular: String,
        plural: String,
        #[arg(allow_hyphen_values = true)]
        count: String,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Translate and render a component template.
    Tct {
        template: String,
        /// Component for a group, as NAME=TAG[:ATTR=VALUE,...].
        #[arg(
            short = 'c',
            long = "component",
            value_name = "NAME=TAG[:ATTR=VALUE,...]",
            value_parser = parse_component
        )]
        components: Vec<ComponentSpec>,
    },
    /// Print the group table of a template as JSON.
    Parse { template: String },
    /// Print information about the active catalog.
    Catalog,
}

/// A `--component` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    pub name: String,
    pub element: Element,
}

/// Parses `link=a:href=/docs,target=_blank`.
pub fn parse_component(spec: &str) -> Result<ComponentSpec, String> {
    let (name, rest) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TAG, got {spec:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing group name in {spec:?}"));
    }

    let (tag, attrs) = match rest.split_once(':') {
        Some((tag, attrs)) => (tag.trim(), Some(attrs)),
        None => (rest.trim(), None),
    };
    if tag.is_empty() {
        return Err(format!("missing element name in {spec:?}"));
    }

    let mut element = Element::new(tag);
    for attr in attrs.into_iter().flat_map(|a| a.split(',')) {
        if attr.trim().is_empty() {
            continue;
        }
        let (key, value) = attr
            .split_once('=')
            .ok_or_else(|| format!("expected ATTR=VALUE, got {attr:?}"))?;
        element = element.attr(key.trim(), value);
    }

    Ok(ComponentSpec {
        name: name.to_string(),
        element,
    })
}

/// Reads a command line argument as a number when it looks like one.
pub fn parse_arg(raw: &str) -> Arg {
    if let Ok(i) = raw.parse::<i64>() {
        return Arg::Int(i);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Arg::Float(f),
        _ => Arg::from(raw),
    }
}

/// Settings file, then environment, then command line flags.
pub fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let mut settings = settings.apply_env(&RealEnv);
    if let Some(dir) = &cli.catalog_dir {
        settings.catalog_dir = Some(dir.clone());
    }
    if let Some(locale) = &cli.locale {
        settings.default_locale = locale.clone();
    }
    Ok(settings)
}

fn writer_for(output: OutputFormat, settings: &Settings) -> NodeWriter {
    match output {
        OutputFormat::Term => NodeWriter::new(settings.console_styles(), TagTransform::Apply),
        OutputFormat::Debug => NodeWriter::new(HashMap::new(), TagTransform::Keep),
        OutputFormat::Plain | OutputFormat::Html => NodeWriter::plain(),
    }
}

fn write_rendered(rendered: &Rendered, output: OutputFormat, writer: &NodeWriter) -> String {
    match (rendered, output) {
        (_, OutputFormat::Html) => rendered.to_html(),
        (Rendered::Text(text), _) => text.clone(),
        (Rendered::Node(node), _) => writer.write(node),
    }
}

/// Installs the translator for the resolved locale and returns the writer
/// for node output.
fn activate(cli: &Cli) -> Result<NodeWriter> {
    let settings = resolve_settings(cli)?;
    let writer = writer_for(cli.output, &settings);
    let locale = settings.default_locale.clone();
    tracing::debug!(
        locale = %locale,
        catalog_dir = ?settings.catalog_dir,
        output = ?cli.output,
        "resolved settings"
    );
    global::configure(settings);
    global::set_locale(&locale).with_context(|| format!("activating locale {locale:?}"))?;
    Ok(writer)
}

/// Runs a command and returns what to print.
pub fn run(cli: &Cli) -> Result<String> {
    let output = cli.output;
    match &cli.command {
        Command::T { message, args } => {
            let writer = activate(cli)?;
            let args: Vec<Arg> = args.iter().map(|a| parse_arg(a)).collect();
            Ok(write_rendered(&global::t(message, &args), output, &writer))
        }
        Command::Tn {
            singular,
            plural,
            count,
            args,
        } => {
            let writer = activate(cli)?;
            let args: Vec<Arg> = std::iter::once(count)
                .chain(args)
                .map(|a| parse_arg(a))
                .collect();
            Ok(write_rendered(&global::tn(singular, plural, &args), output, &writer))
        }
        Command::Tct {
            template,
            components,
        } => {
            let mut map = ComponentMap::new();
            for spec in components {
                if map.get(&spec.name).is_some() {
                    bail!("component {:?} given more than once", spec.name);
                }
                map.insert(spec.name.clone(), spec.element.clone());
            }
            let writer = activate(cli)?;
            let rendered = Rendered::Node(global::tct(template, &map));
            Ok(write_rendered(&rendered, output, &writer))
        }
        Command::Parse { template } => Ok(serde_json::to_string_pretty(&parse(template))?),
        Command::Catalog => {
            activate(cli)?;
            let translator = global::current();
            let catalog = translator.catalog();
            let info = serde_json::json!({
                "locale": catalog.locale(),
                "domain": catalog.domain(),
                "plural_forms": catalog.plural_forms().source(),
                "nplurals": catalog.plural_forms().count(),
                "messages": catalog.len(),
            });
            Ok(serde_json::to_string_pretty(&info)?)
        }
    }
}
