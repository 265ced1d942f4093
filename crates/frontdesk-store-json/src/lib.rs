//! JSON file stores: the active visitor registry and the SMTP settings.
//!
//! Both files are small and rewritten in full on every save. Writes go to a
//! sibling temporary file that is then renamed over the target, so a crash
//! mid-write leaves the previous contents intact.

mod fs;

pub mod error;
pub mod registry;
pub mod smtp;

pub use error::{Error, Result};
pub use registry::JsonRegistryFile;
pub use smtp::SmtpConfig;
