//! Application constants for the precipitation validator
//!
//! Default values for the file contract: the fixed schema header, the
//! sentinel tokens, the cadence epoch and the accepted year range.

// =============================================================================
// File Contract
// =============================================================================

/// Exact first line of every station file
pub const SCHEMA_HEADER: &str = "precip\tMIROC5\tRCP60\tREGRESION\tdecimas\t1";

/// Tab-delimited field count of the station metadata line
pub const STATION_LINE_FIELDS: usize = 8;

/// Prefix letter of station identifiers (`P7`, `P12`, ...)
pub const STATION_ID_PREFIX: char = 'P';

/// Number of header lines before the data records start
pub const HEADER_LINES: usize = 2;

/// Expected extension of station files
pub const DATA_FILE_EXTENSION: &str = "dat";

// =============================================================================
// Record Layout
// =============================================================================

/// Leading metadata tokens on a data line: prefix, year, month
pub const RECORD_METADATA_FIELDS: usize = 3;

/// Day slots carried by every data line
pub const DAY_SLOTS: usize = 31;

/// Minimum token count of a structurally parseable data line
pub const MIN_RECORD_FIELDS: usize = RECORD_METADATA_FIELDS + DAY_SLOTS;

/// Tokens marking an intentionally missing daily value
pub const SENTINEL_TOKENS: &[&str] = &["-999", "-999.0"];

// =============================================================================
// Cadence
// =============================================================================

/// First (year, month) every file is expected to start at
pub const DEFAULT_EPOCH_YEAR: i32 = 2006;
pub const DEFAULT_EPOCH_MONTH: u32 = 1;

/// Year bounds observed in the scenario data
pub const DEFAULT_MIN_YEAR: i32 = 2006;
pub const DEFAULT_MAX_YEAR: i32 = 2100;

// =============================================================================
// Output
// =============================================================================

/// Default append-only findings log
pub const DEFAULT_LOG_FILE: &str = "errores.log";

/// Timestamp layout of findings log lines
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
