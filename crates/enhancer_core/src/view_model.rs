pub const NO_FILE_LABEL: &str = "No file chosen";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneView {
    Placeholder { text: String },
    Image { src: String, alt: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiViewModel {
    pub file_name: String,
    pub submit_enabled: bool,
    pub status: String,
    pub original: PaneView,
    pub result: PaneView,
    pub spinner_visible: bool,
    pub dirty: bool,
}
