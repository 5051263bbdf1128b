//! Constants for pharmaguard cache configuration and file organization.
//!
//! This module defines environment variable names, directory names, file
//! extensions, command strings and the fixed user-facing fallback messages.

// Environment variable names

/// Environment variable name for setting the cache directory location.
///
/// When set, this overrides the default cache location (`~/.pharmaguard/`).
///
/// # Example
///
/// ```bash
/// export PHARMAGUARD_CACHE=/custom/cache/path
/// ```
pub const PHARMAGUARD_CACHE_ENV: &str = "PHARMAGUARD_CACHE";

/// Environment variable name for setting the analysis service base URL.
///
/// When set, this overrides the default (`http://localhost:8000`).
pub const PHARMAGUARD_API_ENV: &str = "PHARMAGUARD_API";

/// Environment variable name for the conversational assistant endpoint.
pub const PHARMAGUARD_ASSISTANT_API_ENV: &str = "PHARMAGUARD_ASSISTANT_API";

/// Environment variable name for the assistant API key, sent as `x-api-key`.
pub const PHARMAGUARD_ASSISTANT_KEY_ENV: &str = "PHARMAGUARD_ASSISTANT_KEY";

/// Environment variable name for the assistant model identifier.
pub const PHARMAGUARD_ASSISTANT_MODEL_ENV: &str = "PHARMAGUARD_ASSISTANT_MODEL";

pub const DEFAULT_API: &str = "http://localhost:8000";

pub const DEFAULT_ASSISTANT_MODEL: &str = "pharmaguard-assistant";

/// Path of the analysis endpoint under the service base URL.
pub const ANALYZE_PATH: &str = "/analyze/";

// Command-line interface command names

/// Subcommand for previewing the panel variants of a file.
pub const PREVIEW_CMD: &str = "preview";

/// Subcommand for running (or reusing) an analysis.
pub const ANALYZE_CMD: &str = "analyze";

/// Subcommand group for inspecting and evicting cached reports.
pub const REPORTS_CMD: &str = "reports";
pub const REPORTS_LIST: &str = "list";
pub const REPORTS_LATEST: &str = "latest";
pub const REPORTS_SHOW: &str = "show";
pub const REPORTS_REMOVE: &str = "rm";
pub const REPORTS_CLEAR: &str = "clear";

/// Subcommand for the genetics detail of the latest report.
pub const GENETICS_CMD: &str = "genetics";

/// Subcommand for asking the assistant about the latest report.
pub const ASK_CMD: &str = "ask";

// Directory structure constants

/// Default subdirectory name for storing serialized reports.
///
/// Reports are stored in `<cache_folder>/reports/`.
pub const DEFAULT_REPORT_SUBFOLDER: &str = "reports";

/// File extension of a stored entry; the file stem is the entry key.
pub const DEFAULT_ENTRY_EXT: &str = "json";

// Messages

/// Shown when the service reports an error without a message.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Unsupported VCF format or no matching variants found.";

/// Shown when there is neither a file to send nor a cached report.
pub const NO_FILE_MESSAGE: &str = "No VCF file was supplied and no cached report exists for";

/// Substring identifying the service's "no matching variant" failure.
pub const NO_VARIANT_MARKER: &str = "No pharmacogenomic variant found";

/// Assistant reply when the service answers without any text.
pub const ASSISTANT_EMPTY_REPLY: &str = "I'm sorry, I couldn't process that. Please try again.";

/// Assistant reply when the service can't be reached.
pub const ASSISTANT_ERROR_REPLY: &str = "Something went wrong. Please try again.";

/// Number of most recent chat messages sent along with a question.
pub const MAX_HISTORY_TURNS: usize = 20;

/// Prefix of generated patient identifiers.
pub const PATIENT_ID_PREFIX: &str = "PATIENT";
