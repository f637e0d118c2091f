//! Application constants for the call record ingester
//!
//! Default values, cookie names and the fixed message texts shown to users.

// =============================================================================
// CSV Layout
// =============================================================================

/// Byte-order mark that spreadsheet exports prepend to the first header cell
pub const BOM: char = '\u{FEFF}';

/// Separator used when rendering a row preview
pub const PREVIEW_SEPARATOR: &str = " · ";

/// Number of rows shown in a clean preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

// =============================================================================
// Field Validation
// =============================================================================

/// Allowed phone shape after normalization
pub const DEFAULT_PHONE_PATTERN: &str = r"^[0-9+\-\s()]{2,50}$";

/// Largest accepted fixed offset for naive timestamps (UTC+14:00)
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Canonical disposition values on the wire
pub mod disposition {
    pub const ANSWERED: &str = "ANSWERED";
    pub const NO_ANSWER: &str = "NO ANSWER";
    pub const OTHER: &str = "OTHER";
}

// =============================================================================
// Transport
// =============================================================================

/// Bulk create endpoint of a locally running records API
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/calls/bulk_create/";

/// Authorization header scheme expected by the records API
pub const DEFAULT_AUTH_SCHEME: &str = "Token";

/// Cookie holding the API token
pub const TOKEN_COOKIE: &str = "auth_token";

/// Cookie holding the anti-forgery token
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header carrying the anti-forgery token (`X-CSRFToken`)
pub const CSRF_HEADER: &str = "x-csrftoken";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Config file name under the user config directory
pub const CONFIG_DIR_NAME: &str = "cdr-ingest";
pub const CONFIG_FILE_NAME: &str = "config.json";

// =============================================================================
// User-facing Messages
// =============================================================================

pub mod messages {
    pub const READ_FAILED: &str = "Could not read the file.";

    pub const CALLDATE_REQUIRED: &str = "Date and time are required.";
    pub const CALLDATE_INVALID: &str = "Invalid calldate format.";
    pub const SRC_REQUIRED: &str = "Field \"src\" is required.";
    pub const SRC_INVALID: &str =
        "Invalid src format (digits, + - spaces and parentheses only).";
    pub const DST_REQUIRED: &str = "Field \"dst\" is required.";
    pub const DST_INVALID: &str =
        "Invalid dst format (digits, + - spaces and parentheses only).";
    pub const DURATION_INVALID: &str = "Duration must be an integer >= 0.";
    pub const DURATION_EMPTY: &str = "duration is empty";
    pub const BILLSEC_INVALID: &str = "Billsec must be an integer >= 0.";
    pub const BILLSEC_EMPTY: &str = "billsec is empty";

    pub const UNAUTHORIZED: &[&str] = &[
        "Unauthorized (401). Check the authorization token.",
        "Check that the 'auth_token' cookie is present and that the request sends the header Authorization: Token <auth_token>.",
        "If the cookie is present, make sure the server expects the 'Token ' prefix and that CORS/credentials are configured (requests must include credentials).",
        "Try signing in again (logout, then login) and repeat the upload.",
    ];

    pub const FORBIDDEN: &[&str] = &[
        "Access denied (403). The token is valid but the user lacks permission.",
        "Check that the signed-in user has the required permissions and that the endpoint is guarded by the intended logic (check permission_classes on the server).",
    ];

    pub const FIX_AND_RETRY: &str = "After fixing the errors, repeat the upload. To check locally, open the CSV and inspect the problem rows by their numbers.";
    pub const RECORDS_KEY_HINT: &str =
        "Check that you are sending JSON with the records key: [{...}, {...}]";
    pub const UNPARSEABLE_RESPONSE: &str = "Could not parse the server response.";

    pub const NETWORK_CONNECTIVITY: &str =
        "Check your internet connection and that the server is reachable.";
    pub const NETWORK_INSPECT: &str =
        "Inspect the request: URL, request headers, request payload and response body.";

    /// Phrases in a server `detail` that mean the `records` key was malformed
    pub const RECORDS_KEY_PHRASES: &[&str] = &["records должен", "records must"];
}
