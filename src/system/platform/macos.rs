use super::{ColumnLayout, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn column_layout() -> ColumnLayout {
        // BSD `ps` on macOS has no per-process thread count column.
        ColumnLayout::Reduced
    }

    fn lister_program() -> &'static str {
        "ps"
    }
}
