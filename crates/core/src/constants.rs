/// chrono format of trade dates in bulk-deal exports (e.g. `05-Jan-23`)
pub const SOURCE_DATE_FORMAT: &str = "%d-%b-%y";

/// chrono format used when trade dates are displayed or serialized
pub const DISPLAY_DATE_FORMAT: &str = "%Y/%m/%d";

/// Extension accepted by the file intake
pub const CSV_FILE_EXTENSION: &str = "csv";

/// How long a success notification stays on screen
pub const SUCCESS_AUTO_CLOSE_MS: u32 = 2500;

/// How long an error notification stays on screen
pub const ERROR_AUTO_CLOSE_MS: u32 = 5000;
