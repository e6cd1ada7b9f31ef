//! Stable colors for bucket keys.
//!
//! Color is a pure function of the key label: FNV-1a over its bytes,
//! modulo a fixed palette. Re-rendering the same data gives the same
//! colors, and a bucket keeps its color when neighbours come and go.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Palette for chart sinks
pub const PALETTE: &[&str] = &[
    "#4e79a7", // Blue
    "#f28e2b", // Orange
    "#e15759", // Red
    "#76b7b2", // Teal
    "#59a14f", // Green
    "#edc948", // Yellow
    "#b07aa1", // Purple
    "#ff9da7", // Pink
    "#9c755f", // Brown
    "#bab0ac", // Gray
];

/// Terminal counterpart of `PALETTE`, same length
const ANSI_PALETTE: &[&str] = &[
    "\x1b[34m", "\x1b[33m", "\x1b[31m", "\x1b[36m", "\x1b[32m",
    "\x1b[93m", "\x1b[35m", "\x1b[95m", "\x1b[33;2m", "\x1b[90m",
];

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

fn palette_index(key: &str) -> usize {
    (fnv1a(key.as_bytes()) % PALETTE.len() as u64) as usize
}

/// Hex color for a bucket key
pub fn color_for_key(key: &str) -> &'static str {
    PALETTE[palette_index(key)]
}

/// ANSI escape for a bucket key, matching `color_for_key`
pub fn ansi_color_for_key(key: &str) -> &'static str {
    ANSI_PALETTE[palette_index(key)]
}
