// crates/vpc-foundation-cli/src/main.rs
// ============================================================================
// Module: VPC Foundation CLI Entry Point
// Description: Command dispatcher for environment configuration validation.
// Purpose: Provide a localized CLI that gates configs before orchestration.
// Dependencies: clap, serde, serde_jcs, thiserror, vpc-foundation-config.
// ============================================================================

//! ## Overview
//! The VPC Foundation CLI validates per-environment VPC configuration before
//! it is handed to the infrastructure orchestration layer. It never
//! provisions anything: it loads `vpc-foundation.toml` (or ad-hoc values),
//! reports every violation, and exits non-zero when any rule fails. All
//! user-facing strings are routed through the i18n catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use vpc_foundation_cli::audit::CompositeAuditSink;
use vpc_foundation_cli::audit::FileAuditSink;
use vpc_foundation_cli::audit::NoopAuditSink;
use vpc_foundation_cli::audit::StderrAuditSink;
use vpc_foundation_cli::audit::ValidationAuditEvent;
use vpc_foundation_cli::audit::ValidationAuditSink;
use vpc_foundation_cli::audit::ValidationSource;
use vpc_foundation_cli::i18n::Locale;
use vpc_foundation_cli::i18n::set_locale;
use vpc_foundation_cli::t;
use vpc_foundation_config::EnvironmentConfig;
use vpc_foundation_config::EnvironmentName;
use vpc_foundation_config::EnvironmentOutcome;
use vpc_foundation_config::StackConfig;
use vpc_foundation_config::Violation;
use vpc_foundation_config::config_schema;
use vpc_foundation_config::config_toml_example;
use vpc_foundation_config::parse_private_cidr;
use vpc_foundation_config::resolve_config_path;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "VPC_FOUNDATION_LANG";
/// Exit code reported when validation finds violations. Usage and load
/// errors exit with 1.
const VIOLATIONS_EXIT_CODE: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "vpc-foundation", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `VPC_FOUNDATION_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate ad-hoc environment values without a config file.
    Check(CheckCommand),
    /// Check whether a single CIDR block is an accepted private range.
    Cidr(CidrCommand),
    /// Print built-in environment defaults.
    Defaults(DefaultsCommand),
    /// Configuration file utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate every environment described by a config file.
    Validate(ConfigValidateCommand),
    /// Print the JSON schema for `vpc-foundation.toml`.
    Schema,
    /// Print a canonical example `vpc-foundation.toml`.
    Example,
}

/// Audit logging flags shared by validation commands.
#[derive(Args, Debug, Default)]
struct AuditArgs {
    /// Append JSON-line audit events to this file.
    #[arg(long, value_name = "PATH")]
    audit_log: Option<PathBuf>,
    /// Emit JSON-line audit events to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    audit_stderr: bool,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to vpc-foundation.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Restrict validation to these environments (repeatable).
    #[arg(long = "env", value_name = "NAME")]
    environments: Vec<String>,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
    /// Audit logging flags.
    #[command(flatten)]
    audit: AuditArgs,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Environment name (dev, staging, prod).
    #[arg(long, value_name = "NAME")]
    name: String,
    /// VPC CIDR block.
    #[arg(long, value_name = "CIDR")]
    cidr: String,
    /// Availability-zone count.
    #[arg(long, value_name = "COUNT")]
    max_azs: u32,
    /// NAT gateway count.
    #[arg(long, value_name = "COUNT")]
    nat_gateways: Option<u32>,
    /// Resource tag as KEY=VALUE (repeatable).
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    tags: Vec<String>,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
    /// Audit logging flags.
    #[command(flatten)]
    audit: AuditArgs,
}

/// Arguments for `cidr`.
#[derive(Args, Debug)]
struct CidrCommand {
    /// CIDR block to check.
    #[arg(value_name = "CIDR")]
    cidr: String,
}

/// Arguments for `defaults`.
#[derive(Args, Debug)]
struct DefaultsCommand {
    /// Print defaults for a single environment.
    #[arg(long = "env", value_name = "NAME")]
    environment: Option<String>,
}

/// Output formats for validation reports.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Canonical JSON.
    Json,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Output Types
// ============================================================================

/// JSON rendering of one environment's validation result.
#[derive(Debug, Serialize)]
struct EnvironmentSummary<'a> {
    /// Environment name as supplied.
    environment: &'a str,
    /// True when no rule failed.
    valid: bool,
    /// Violations in rule order.
    violations: &'a [Violation],
}

/// JSON rendering of a validation run.
#[derive(Debug, Serialize)]
struct ValidationSummary<'a> {
    /// True when every environment is valid.
    valid: bool,
    /// Per-environment results.
    environments: Vec<EnvironmentSummary<'a>>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            write_stdout_bytes(err.render().to_string().as_bytes())
                .map_err(|io_err| CliError::new(output_error("stdout", &io_err)))?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => return Err(CliError::new(err.render().to_string().trim_end().to_string())),
    };
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Check(command) => command_check(command),
        Commands::Cidr(command) => command_cidr(&command),
        Commands::Defaults(command) => command_defaults(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Schema => {
            write_json(&config_schema())?;
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::Example => {
            write_stdout_bytes(config_toml_example().as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let path = resolve_config_path(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let stack = StackConfig::load(Some(&path))
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let outcomes = resolve_outcomes(&stack, &command.environments)?;
    let sink = build_audit_sink(&command.audit)?;
    let config_path = path.display().to_string();
    for outcome in &outcomes {
        sink.record(&ValidationAuditEvent::from_outcome(
            ValidationSource::ConfigFile,
            Some(config_path.clone()),
            outcome,
        ));
    }
    report_outcomes(&outcomes, command.format)
}

/// Resolves the requested environments (or all) into validation outcomes.
fn resolve_outcomes(stack: &StackConfig, filter: &[String]) -> CliResult<Vec<EnvironmentOutcome>> {
    if filter.is_empty() {
        return stack
            .resolve_all()
            .map_err(|err| CliError::new(t!("config.resolve_failed", error = err)));
    }
    filter
        .iter()
        .map(|name| {
            stack
                .resolve(name)
                .map(|config| EnvironmentOutcome::from(config.validate()))
                .map_err(|err| CliError::new(t!("config.resolve_failed", error = err)))
        })
        .collect()
}

// ============================================================================
// SECTION: Check Commands
// ============================================================================

/// Executes the ad-hoc `check` command.
fn command_check(command: CheckCommand) -> CliResult<ExitCode> {
    let tags = parse_tags(&command.tags)?;
    let config = EnvironmentConfig {
        name: command.name,
        vpc_cidr_block: command.cidr,
        max_availability_zones: command.max_azs,
        nat_gateway_count: command.nat_gateways,
        tags,
    };
    let outcome = EnvironmentOutcome::from(config.validate());
    let sink = build_audit_sink(&command.audit)?;
    sink.record(&ValidationAuditEvent::from_outcome(ValidationSource::Inline, None, &outcome));
    report_outcomes(std::slice::from_ref(&outcome), command.format)
}

/// Executes the `cidr` command.
fn command_cidr(command: &CidrCommand) -> CliResult<ExitCode> {
    let (message, code) = match parse_private_cidr(&command.cidr) {
        Ok(cidr) => (t!("cidr.valid", cidr = command.cidr, range = cidr.range), ExitCode::SUCCESS),
        Err(err) => (
            t!("cidr.invalid", cidr = command.cidr, error = err),
            ExitCode::from(VIOLATIONS_EXIT_CODE),
        ),
    };
    write_stdout_line(&message).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(code)
}

/// Executes the `defaults` command.
fn command_defaults(command: &DefaultsCommand) -> CliResult<ExitCode> {
    let names = match command.environment.as_deref() {
        Some(value) => vec![EnvironmentName::parse(value).ok_or_else(|| {
            CliError::new(t!(
                "defaults.unknown_env",
                name = value,
                expected = EnvironmentName::expected_labels()
            ))
        })?],
        None => EnvironmentName::ALL.to_vec(),
    };
    let defaults: BTreeMap<&str, EnvironmentConfig> = names
        .into_iter()
        .map(|name| (name.as_str(), EnvironmentConfig::defaults_for(name)))
        .collect();
    write_json(&defaults)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses repeated `KEY=VALUE` tag arguments; later keys win.
fn parse_tags(values: &[String]) -> CliResult<BTreeMap<String, String>> {
    let mut tags = BTreeMap::new();
    for value in values {
        let (key, tag_value) = parse_tag_arg(value)
            .ok_or_else(|| CliError::new(t!("check.tag.invalid", value = value)))?;
        tags.insert(key, tag_value);
    }
    Ok(tags)
}

/// Splits a single `KEY=VALUE` argument at the first `=`.
fn parse_tag_arg(value: &str) -> Option<(String, String)> {
    let (key, tag_value) = value.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), tag_value.to_string()))
}

/// Builds the audit sink selected by CLI flags.
fn build_audit_sink(args: &AuditArgs) -> CliResult<Box<dyn ValidationAuditSink>> {
    let mut sinks: Vec<Box<dyn ValidationAuditSink>> = Vec::new();
    if args.audit_stderr {
        sinks.push(Box::new(StderrAuditSink));
    }
    if let Some(path) = &args.audit_log {
        let sink = FileAuditSink::new(path).map_err(|err| {
            CliError::new(t!("audit.open_failed", path = path.display(), error = err))
        })?;
        sinks.push(Box::new(sink));
    }
    if sinks.is_empty() {
        return Ok(Box::new(NoopAuditSink));
    }
    Ok(Box::new(CompositeAuditSink::new(sinks)))
}

/// Writes validation outcomes and returns the matching exit code.
fn report_outcomes(outcomes: &[EnvironmentOutcome], format: OutputFormat) -> CliResult<ExitCode> {
    let failed = outcomes.iter().filter(|outcome| !outcome.violations().is_empty()).count();
    match format {
        OutputFormat::Json => {
            let summary = ValidationSummary {
                valid: failed == 0,
                environments: outcomes
                    .iter()
                    .map(|outcome| EnvironmentSummary {
                        environment: outcome.environment(),
                        valid: outcome.violations().is_empty(),
                        violations: outcome.violations(),
                    })
                    .collect(),
            };
            write_json(&summary)?;
        }
        OutputFormat::Text => {
            write_stdout_bytes(render_outcomes_text(outcomes, failed).as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    if failed == 0 { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::from(VIOLATIONS_EXIT_CODE)) }
}

/// Renders validation outcomes as localized text.
fn render_outcomes_text(outcomes: &[EnvironmentOutcome], failed: usize) -> String {
    let mut output = String::new();
    for outcome in outcomes {
        let violations = outcome.violations();
        if violations.is_empty() {
            output.push_str(&t!("validate.env.valid", environment = outcome.environment()));
        } else {
            output.push_str(&t!(
                "validate.env.invalid",
                environment = outcome.environment(),
                count = violations.len()
            ));
        }
        output.push('\n');
        for violation in violations {
            output.push_str(&t!("validate.violation", message = violation.message));
            output.push('\n');
        }
    }
    if failed == 0 {
        output.push_str(&t!("validate.summary.ok", count = outcomes.len()));
    } else {
        output.push_str(&t!("validate.summary.failed", failed = failed, count = outcomes.len()));
    }
    output.push('\n');
    output
}

/// Resolves the CLI locale from flags or the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes canonical JSON to stdout with a trailing newline.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
