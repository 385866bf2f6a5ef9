use super::PlatformProvider;

pub struct WindowsProvider;

impl WindowsProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformProvider for WindowsProvider {
    fn platform_name(&self) -> &'static str {
        "windows"
    }
}
