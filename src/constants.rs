// Browser-side wiring and drawing constants.
//
// Element ids are the contract with the page markup; everything else tunes
// how a field snapshot is painted.

// Element ids
pub const FIELD_CANVAS_ID: &str = "particle-field";
pub const TRACK_ELEMENT_ID: &str = "mode-track";
pub const MARKER_ELEMENT_ID: &str = "mode-marker";
pub const FILL_ELEMENT_ID: &str = "mode-fill"; // optional

// Classes toggled on the page
pub const DARK_CLASS: &str = "dark";
pub const DRAGGING_CLASS: &str = "dragging";

// Optional config overrides read from the canvas element
pub const ATTR_PARTICLE_COUNT: &str = "data-particle-count";
pub const ATTR_LINK_DISTANCE: &str = "data-link-distance";
pub const MAX_PARTICLE_COUNT: usize = 2000; // guards against runaway markup values

// Paint (primary colour per theme, as CSS colour strings)
pub const PRIMARY_LIGHT: &str = "#030213";
pub const PRIMARY_DARK: &str = "#fafafa";
pub const LINK_LINE_WIDTH: f64 = 1.0;

// Frame stats
pub const STATS_LOG_INTERVAL_SEC: f32 = 5.0;
