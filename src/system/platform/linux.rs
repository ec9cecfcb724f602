use super::{ColumnLayout, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn column_layout() -> ColumnLayout {
        // procps `ps` reports the light-weight process count as `nlwp`.
        ColumnLayout::Standard
    }

    fn lister_program() -> &'static str {
        "ps"
    }
}
