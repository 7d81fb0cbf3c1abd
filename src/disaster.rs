//! Simulated disaster hotspots.
//!
//! Every category owns a fixed list of region centers. A request scatters a
//! cluster of random points around each center; nothing is stored and the
//! values are drawn fresh on every call.

use rand::Rng;
use serde::Serialize;

/// Points emitted around each region center.
pub const POINTS_PER_CENTER: usize = 25;
/// Maximum offset, in degrees, of a point from its center on either axis.
pub const SCATTER_DEGREES: f64 = 5.0;
/// Lower (inclusive) and upper (exclusive) bound of a point's chance.
pub const CHANCE_RANGE: (f64, f64) = (40.0, 100.0);

/// A (latitude, longitude) pair in degrees.
pub type Center = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisasterPoint {
    pub lat: f64,
    pub lon: f64,
    pub chance: f64,
}

// Wildfire hotspots
const FIRE: &[Center] = &[
    (-25.0, 133.0), // Northern Territory
    (37.0, -120.0), // California
    (43.0, -2.0),   // Iberia
    (60.0, -135.0), // Yukon / Alaska
    (-15.0, 28.0),  // Zambia
    (20.0, 78.0),   // Central India
    (41.0, 21.0),   // Balkans
    (-34.0, 18.0),  // Western Cape
    (-9.0, -75.0),  // Peruvian Amazon
    (55.0, 100.0),  // Siberian taiga
];

const FLOOD: &[Center] = &[
    (23.0, 90.0),   // Bangladesh
    (13.0, 80.0),   // Chennai
    (5.0, -1.0),    // Ghana
    (30.0, 120.0),  // Eastern China
    (10.0, -84.0),  // Costa Rica
    (-1.0, 36.0),   // Kenya
    (16.0, 105.0),  // Laos / Vietnam
    (50.0, 30.0),   // Ukraine
    (0.0, 103.0),   // Malay peninsula
    (6.0, 3.0),     // Lagos
];

// Major tectonic boundaries
const EARTHQUAKE: &[Center] = &[
    (35.0, 140.0),  // Japan
    (38.0, -122.0), // San Francisco
    (19.0, -99.0),  // Mexico City
    (-15.0, -72.0), // Peru
    (39.0, 23.0),   // Aegean
    (30.0, 70.0),   // Pakistan
    (37.0, 142.0),  // Japan trench
    (17.0, 121.0),  // Luzon
    (-7.0, 107.0),  // Java
    (-36.0, -72.0), // Chile
    (40.0, 125.0),  // Korean peninsula
    (64.0, -149.0), // Alaska
    (35.0, 51.0),   // Iran
    (45.0, 14.0),   // Adriatic
    (12.0, -86.0),  // Nicaragua
];

// Tropical storms and cyclones
const STORM: &[Center] = &[
    (15.0, -90.0),  // Caribbean
    (10.0, 100.0),  // Gulf of Thailand
    (25.0, 80.0),   // Bay of Bengal
    (35.0, 140.0),  // Japan
    (12.0, 125.0),  // Philippines
    (-18.0, 147.0), // Coral Sea
    (20.0, -80.0),  // Cuba / Bahamas
    (22.0, 120.0),  // Taiwan
    (30.0, -90.0),  // Gulf of Mexico
    (-15.0, 45.0),  // Mozambique Channel
];

/// Fallback for any category the table does not know.
pub const DEFAULT_CENTERS: &[Center] = &[(20.0, 0.0)];

/// Categories with their own center list, in display order.
pub const CATEGORIES: &[&str] = &["fire", "flood", "earthquake", "storm"];

/// Region centers for `category`, matched case-insensitively.
pub fn centers_for(category: &str) -> &'static [Center] {
    match category.to_lowercase().as_str() {
        "fire" => FIRE,
        "flood" => FLOOD,
        "earthquake" => EARTHQUAKE,
        "storm" => STORM,
        _ => DEFAULT_CENTERS,
    }
}

/// Scatter [`POINTS_PER_CENTER`] points around every center of `category`
/// using the thread-local RNG.
pub fn generate(category: &str) -> Vec<DisasterPoint> {
    generate_with(category, &mut rand::thread_rng())
}

pub fn generate_with<R: Rng>(category: &str, rng: &mut R) -> Vec<DisasterPoint> {
    let centers = centers_for(category);
    let mut points = Vec::with_capacity(centers.len() * POINTS_PER_CENTER);

    for &(lat_c, lon_c) in centers {
        for _ in 0..POINTS_PER_CENTER {
            points.push(DisasterPoint {
                lat: lat_c + rng.gen_range(-SCATTER_DEGREES..SCATTER_DEGREES),
                lon: lon_c + rng.gen_range(-SCATTER_DEGREES..SCATTER_DEGREES),
                chance: rng.gen_range(CHANCE_RANGE.0..CHANCE_RANGE.1),
            });
        }
    }

    tracing::info!(count = points.len(), disaster = %category, "generated disaster points");
    points
}
