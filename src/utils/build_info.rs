/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("DREAMFUND_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("DREAMFUND_BUILD_TIMESTAMP").unwrap_or("unknown"),
        profile: option_env!("DREAMFUND_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("DREAMFUND_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
