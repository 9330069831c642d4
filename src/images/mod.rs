//! Cover art loading and caching for terminal display.
//!
//! Covers are downloaded by the app worker, decoded, and kept in a small
//! cache. Rendering goes through `ratatui-image`, which picks Sixel, Kitty or
//! iTerm2 when the terminal supports them and Unicode halfblocks otherwise.

mod cache;
mod loader;

pub use cache::CoverCache;
pub use loader::{fetch_cover, resize_if_needed};

use ratatui_image::picker::{Picker, ProtocolType};
use std::sync::OnceLock;

/// Global picker instance (initialized once at startup)
static PICKER: OnceLock<Picker> = OnceLock::new();

/// Query terminal graphics support.
///
/// Must run before entering the alternate screen.
pub fn init_picker() -> &'static Picker {
    PICKER.get_or_init(|| match Picker::from_query_stdio() {
        Ok(p) => {
            tracing::info!("Image support detected: {:?}", p.protocol_type());
            p
        }
        Err(e) => {
            tracing::debug!("No image protocol support: {e}");
            Picker::halfblocks()
        }
    })
}

/// The picker, if [`init_picker`] has run
pub fn picker() -> Option<&'static Picker> {
    PICKER.get()
}

/// Whether the terminal has a native graphics protocol (not just halfblocks)
pub fn has_native_graphics() -> bool {
    picker().is_some_and(|p| !matches!(p.protocol_type(), ProtocolType::Halfblocks))
}
