use super::{ColumnLayout, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn column_layout() -> ColumnLayout {
        ColumnLayout::Standard
    }

    fn lister_program() -> &'static str {
        "ps"
    }
}
