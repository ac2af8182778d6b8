use crate::conf::types::RuntimeConfig;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const SUPPORTED_VERSION: u32 = 1;

/// Smallest refresh interval the viewer page may be configured with.
pub const MIN_REFRESH_INTERVAL_MILLIS: u64 = 100;

/// A config that passed validation, with any warnings it produced.
#[derive(Debug)]
pub struct ValidatedConfig {
    pub config: RuntimeConfig,
    pub report: ValidationReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub file: PathBuf,
    pub section: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Serialize)]
struct ValidationReportJson<'a> {
    errors: &'a [ValidationIssue],
    warnings: &'a [ValidationIssue],
}

/// Validate everything that exists in a fully parsed config.
pub fn validate_config(config: &RuntimeConfig, file: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();
    let origin = |section| Origin {
        file: file.to_path_buf(),
        section,
    };

    if config.server.version != SUPPORTED_VERSION {
        report.unsupported_version(config.server.version, &origin("server"));
        return report;
    }

    if config.server.threads == Some(0) {
        report.error("threads must be greater than 0".to_string(), &origin("server"), None);
    }

    validate_listener(config, &mut report, &origin("listener"));
    validate_tail(config, &mut report, &origin("tail"));

    report
}

fn validate_listener(config: &RuntimeConfig, report: &mut ValidationReport, origin: &Origin) {
    let listener = &config.listener;

    if listener.addr.parse::<SocketAddr>().is_err() {
        report.invalid_listener_addr(&listener.addr, origin);
    }

    if let Some(tls) = &listener.tls {
        if !Path::new(&tls.cert).is_file() {
            report.missing_cert_file(&tls.cert, origin);
        }
        if !Path::new(&tls.key).is_file() {
            report.missing_key_file(&tls.key, origin);
        }
    }
}

fn validate_tail(config: &RuntimeConfig, report: &mut ValidationReport, origin: &Origin) {
    let tail = &config.tail;

    if !tail.route.starts_with('/') || tail.route.contains('?') {
        report.invalid_route(&tail.route, origin);
    }

    if tail.bytes_to_read == 0 {
        report.error("bytes_to_read must be greater than 0".to_string(), origin, None);
    }

    if tail.max_read_bytes == 0 {
        report.error("max_read_bytes must be greater than 0".to_string(), origin, None);
    }

    if tail.refresh_interval_millis < MIN_REFRESH_INTERVAL_MILLIS {
        report.refresh_interval_too_small(tail.refresh_interval_millis, origin);
    }

    if !tail.log_dir.exists() {
        report.log_dir_does_not_exist(&tail.log_dir, origin);
    } else if !tail.log_dir.is_dir() {
        report.log_dir_is_not_a_directory(&tail.log_dir, origin);
    }
}

impl ValidationReport {
    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub(crate) fn error(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            message,
            origin: origin.clone(),
            help,
        });
    }

    fn warning(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        let json = ValidationReportJson {
            errors: &self.errors,
            warnings: &self.warnings,
        };

        serde_json::to_string_pretty(&json)
    }

    pub fn render_plain(&self) {
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            println!(
                "{}:{}: {}",
                issue.origin.file.display(),
                severity,
                issue.message
            );

            if let Some(help) = &issue.help {
                println!("  help: {}", help);
            }
        }
    }

    pub fn render_pretty(&self) {
        let errors = self.errors.len();
        let warnings = self.warnings.len();

        if errors > 0 || warnings > 0 {
            println!(
                "configuration validation failed ({} errors, {} warnings)\n",
                errors, warnings
            );
        }

        for issue in self.errors.iter().chain(self.warnings.iter()) {
            match issue.severity {
                Severity::Error => {
                    println!(
                        "  {}: [{}] {}",
                        "error".red().bold(),
                        issue.origin.section,
                        issue.message
                    );
                }
                Severity::Warning => {
                    println!(
                        "  {}: [{}] {}",
                        "warning".yellow().bold(),
                        issue.origin.section,
                        issue.message
                    );
                }
            }

            if let Some(help) = &issue.help {
                println!("    {}: {}", "help".cyan(), help);
            }

            println!();
        }
    }
}

/// Server Validation
impl ValidationReport {
    pub fn unsupported_version(&mut self, version: u32, origin: &Origin) {
        self.error(
            format!("unsupported config version: {}", version),
            origin,
            Some(format!("Set `version = {}` in the server block.", SUPPORTED_VERSION)),
        );
    }
}

/// Listener Validation
impl ValidationReport {
    pub fn invalid_listener_addr(&mut self, addr: &str, origin: &Origin) {
        self.error(format!("invalid address: {}", addr), origin, None);
    }

    pub fn missing_cert_file(&mut self, cert_file: &str, origin: &Origin) {
        self.error(format!("missing cert file: {}", cert_file), origin, None);
    }

    pub fn missing_key_file(&mut self, key_file: &str, origin: &Origin) {
        self.error(format!("missing key file: {}", key_file), origin, None);
    }
}

/// Tail Validation
impl ValidationReport {
    pub fn invalid_route(&mut self, route: &str, origin: &Origin) {
        self.error(
            format!("invalid tail route: {}", route),
            origin,
            Some("Routes are absolute paths without a query, e.g. \"/bin/tail/log\".".to_string()),
        );
    }

    pub fn refresh_interval_too_small(&mut self, millis: u64, origin: &Origin) {
        self.error(
            format!(
                "refresh interval {}ms is below the minimum of {}ms",
                millis, MIN_REFRESH_INTERVAL_MILLIS
            ),
            origin,
            None,
        );
    }

    pub fn log_dir_does_not_exist(&mut self, dir: &Path, origin: &Origin) {
        self.warning(
            format!("log dir does not exist: {}", dir.display()),
            origin,
            Some("Requests will return 404 until the directory is created.".to_string()),
        );
    }

    pub fn log_dir_is_not_a_directory(&mut self, dir: &Path, origin: &Origin) {
        self.error(
            format!("log dir is not a directory: {}", dir.display()),
            origin,
            None,
        );
    }
}
