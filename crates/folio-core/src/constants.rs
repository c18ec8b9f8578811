// Reference tuning for the ambient motion layer. `FieldConfig::default()` and
// `DragConfig::default()` are built from these.

// Population
pub const PARTICLE_COUNT: usize = 30;

// Spawn distributions
pub const SPAWN_SPEED_SPAN: f32 = 0.5; // each velocity component in [-span/2, span/2]
pub const SIZE_MIN: f32 = 1.0;
pub const SIZE_MAX: f32 = 4.0;
pub const OPACITY_MIN: f32 = 0.1;
pub const OPACITY_MAX: f32 = 0.4;

// Pointer attraction
pub const ATTRACTION_RADIUS: f32 = 100.0; // no pull at or beyond this distance
pub const ATTRACTION_DIVISOR: f32 = 1000.0; // impulse = (radius - d) / divisor

// Velocity shaping
pub const MAX_VELOCITY: f32 = 2.0; // per component
pub const VELOCITY_DAMPING: f32 = 0.99; // applied once per tick

// Proximity graph
pub const LINK_DISTANCE: f32 = 120.0;
pub const LINK_MAX_OPACITY: f32 = 0.2;
pub const GRID_SCAN_MIN_PARTICLES: usize = 64; // below this the pairwise scan is used

// Layer opacity multiplier per theme
pub const LAYER_OPACITY_DARK: f32 = 0.4;
pub const LAYER_OPACITY_LIGHT: f32 = 0.2;

// Drag track
pub const TRACK_MIN: f32 = 0.0;
pub const TRACK_MAX: f32 = 100.0;
pub const TRACK_THRESHOLD: f32 = 50.0; // strictly above is the high (dark) side
pub const TRACK_INITIAL_POSITION: f32 = 20.0;
