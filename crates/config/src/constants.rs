//! Centralized constants for the multiroot workspace.
//!
//! Field names and section names that both the store and the root loader
//! rely on live here so the two layers cannot drift apart.

// =============================================================================
// Config Store
// =============================================================================

/// Name of the implicit section holding keys declared before any header.
pub const DEFAULT_SECTION: &str = "default";

/// Characters that start a comment line (after leading whitespace).
pub const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

/// Quote characters accepted around values.
pub const QUOTE_CHARS: [char; 2] = ['"', '\''];

// =============================================================================
// Root Specification Fields
// =============================================================================

/// Path to the PEM-encoded private key of a file-backed root.
pub const PRIVATE_KEY_FIELD: &str = "private_key";

/// Path to the PEM-encoded certificate of a file-backed root.
pub const CERTIFICATE_FIELD: &str = "certificate";

/// Fields making up the file-backed identity group.
pub const FILE_BACKED_FIELDS: [&str; 2] = [PRIVATE_KEY_FIELD, CERTIFICATE_FIELD];

/// Fields that select a key inside an external key-storage module.
///
/// The first field present (in this order) names the module in diagnostics.
pub const TOKEN_BACKED_FIELDS: [&str; 5] = ["ksm", "module", "token", "slot", "pin"];

/// URI scheme accepted (and stripped) in front of a private key path.
pub const FILE_SCHEME: &str = "file://";

/// URI schemes in a `private_key` value that point into a key-storage module.
pub const TOKEN_SCHEMES: [&str; 2] = ["ksm://", "pkcs11:"];

// =============================================================================
// Defaults
// =============================================================================

/// File name of the roots configuration inside the platform config directory.
pub const DEFAULT_ROOTS_FILE: &str = "roots.conf";

/// Application name used to derive platform directories.
pub const APP_NAME: &str = "multiroot";
