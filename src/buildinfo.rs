//! Build metadata served by the `Q1` query.
//!
//! The values are baked in at compile time by `build.rs`; the interpreter
//! treats this as an opaque collaborator and only ever reads the strings.

/// Identification strings for the running simulator build.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    /// Crate name and version, e.g. `bakesim 0.2.0`.
    pub build: &'static str,
    /// User on the machine that compiled this binary.
    pub builder: &'static str,
    /// UTC date of compilation, `YYYY-MM-DD`.
    pub build_date: &'static str,
}

impl BuildInfo {
    /// Metadata for the binary currently running.
    pub fn current() -> Self {
        Self {
            build: concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")),
            builder: env!("BAKESIM_BUILDER"),
            build_date: env!("BAKESIM_BUILD_DATE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_string_carries_name_and_version() {
        let info = BuildInfo::current();
        assert!(info.build.starts_with("bakesim "));
        assert!(!info.builder.is_empty());
        assert!(!info.build_date.is_empty());
    }
}
