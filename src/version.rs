// Crate identity reported by GET /version

/// Package version baked in at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");
