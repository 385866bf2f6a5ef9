use super::PlatformProvider;

/// macOS exposes none of the extra readings without IOKit bindings, so
/// every optional metric reports as unavailable.
pub struct MacosProvider;

impl MacosProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformProvider for MacosProvider {
    fn platform_name(&self) -> &'static str {
        "macos"
    }
}
