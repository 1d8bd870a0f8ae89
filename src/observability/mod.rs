//! Logging for script filter processes.
//!
//! Standard output carries the result document, so diagnostics go elsewhere:
//! to standard error when the workflow runs in debug mode (the launcher's
//! debugger shows it), and optionally to a rotating log file in the workflow
//! cache directory.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (stderr, debug only)
//!                            → fmt layer (FileWriter, log_to_file only)
//! ```
//!
//! # Configuration
//!
//! The level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. The launcher's debug flag (`alfred_debug=1` → `debug`)
//! 3. Default: `"warn"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
pub mod init;

pub use file_writer::FileWriter;
pub use init::{init_logging, LOG_FILE_NAME};
