// crates/vpc-foundation-cli/src/audit.rs
// ============================================================================
// Module: Validation Audit Logging
// Description: Structured audit events for environment validation outcomes.
// Purpose: Emit JSON-line audit records without hard logging dependencies.
// Dependencies: serde, serde_json, vpc-foundation-config
// ============================================================================

//! ## Overview
//! Each validated environment produces one [`ValidationAuditEvent`]. Sinks
//! serialize events as JSON lines so deployments can route them into their
//! own logging pipeline. Events carry violation kinds and messages but never
//! the full tag set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use vpc_foundation_config::EnvironmentOutcome;
use vpc_foundation_config::ViolationKind;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Where the validated values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationSource {
    /// Resolved from a stack configuration file.
    ConfigFile,
    /// Supplied directly on the command line.
    Inline,
}

/// Validation outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Every rule passed.
    Valid,
    /// At least one rule failed.
    Invalid,
}

/// A single violation as recorded in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditViolation {
    /// Rule that failed.
    pub kind: ViolationKind,
    /// Display message.
    pub message: String,
}

/// Validation audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Origin of the validated values.
    pub source: ValidationSource,
    /// Config file path when loaded from disk.
    pub config_path: Option<String>,
    /// Environment name as supplied.
    pub environment: String,
    /// Outcome classification.
    pub outcome: AuditOutcome,
    /// Number of violations.
    pub violation_count: usize,
    /// Violations in rule order.
    pub violations: Vec<AuditViolation>,
}

impl ValidationAuditEvent {
    /// Builds an audit event from a validation outcome.
    #[must_use]
    pub fn from_outcome(
        source: ValidationSource,
        config_path: Option<String>,
        outcome: &EnvironmentOutcome,
    ) -> Self {
        let violations: Vec<AuditViolation> = outcome
            .violations()
            .iter()
            .map(|violation| AuditViolation {
                kind: violation.kind,
                message: violation.message.clone(),
            })
            .collect();
        Self {
            event: "environment_validated",
            timestamp_ms: now_ms(),
            source,
            config_path,
            environment: outcome.environment().to_string(),
            outcome: if violations.is_empty() {
                AuditOutcome::Valid
            } else {
                AuditOutcome::Invalid
            },
            violation_count: violations.len(),
            violations,
        }
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|duration| duration.as_millis()).unwrap_or(0)
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for validation events.
pub trait ValidationAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ValidationAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ValidationAuditSink for StderrAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ValidationAuditSink for FileAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Fans events out to several sinks in order.
pub struct CompositeAuditSink {
    /// Downstream sinks.
    sinks: Vec<Box<dyn ValidationAuditSink>>,
}

impl CompositeAuditSink {
    /// Builds a composite sink; an empty list discards events.
    #[must_use]
    pub fn new(sinks: Vec<Box<dyn ValidationAuditSink>>) -> Self {
        Self {
            sinks,
        }
    }
}

impl ValidationAuditSink for CompositeAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        for sink in &self.sinks {
            sink.record(event);
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ValidationAuditSink for NoopAuditSink {
    fn record(&self, _event: &ValidationAuditEvent) {}
}
