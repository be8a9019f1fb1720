//! Track data for the pseudo-3D racer.
//!
//! A track is a flat list of fixed-length segments. Each segment carries a
//! curve coefficient (accumulated by the projector to bend the road
//! sideways) and a palette picked by stripe group so the road bands light
//! and dark as it scrolls. The list is circular: driving off the end wraps
//! back to segment zero.

/// World-space length of one road segment.
pub const SEGMENT_LENGTH: f64 = 200.0;
/// Segments per color stripe. Palettes alternate every `STRIPE_GROUP`
/// segments, which is what produces the classic scrolling band effect.
pub const STRIPE_GROUP: usize = 3;

/// Fill colors for one segment stripe.
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub road: &'static str,
    pub grass: &'static str,
    pub rumble: &'static str,
    /// Center lane marker, only painted on the light stripe.
    pub lane: Option<&'static str>,
}

pub const PALETTE_LIGHT: Palette = Palette {
    road: "#475569",
    grass: "#0f172a",
    rumble: "#ffffff",
    lane: Some("#e2e8f0"),
};

pub const PALETTE_DARK: Palette = Palette {
    road: "#334155",
    grass: "#1e1b4b",
    rumble: "#c026d3",
    lane: None,
};

/// One slice of road.
#[derive(Debug, Clone, Copy)]
pub struct RoadSegment {
    pub index: usize,
    /// Per-segment curve increment. Positive bends right, negative left.
    pub curve: f64,
    pub world_start_z: f64,
    pub world_end_z: f64,
}

impl RoadSegment {
    pub fn palette(&self) -> &'static Palette {
        if (self.index / STRIPE_GROUP) % 2 == 0 {
            &PALETTE_LIGHT
        } else {
            &PALETTE_DARK
        }
    }
}

/// Run of identically-curved segments used to author a circuit.
#[derive(Debug, Clone, Copy)]
pub struct TrackDirective {
    pub curve: f64,
    pub length: usize,
}

/// Directives for the default circuit: an opening straight, an S-bend, a
/// long left sweep and a hairpin before the lap closes.
pub static DEFAULT_CIRCUIT: [TrackDirective; 8] = [
    TrackDirective { curve: 0.0, length: 120 },
    TrackDirective { curve: 2.0, length: 40 },
    TrackDirective { curve: -2.0, length: 40 },
    TrackDirective { curve: 0.0, length: 60 },
    TrackDirective { curve: -3.0, length: 80 },
    TrackDirective { curve: 0.0, length: 60 },
    TrackDirective { curve: 4.0, length: 30 },
    TrackDirective { curve: 0.0, length: 70 },
];

/// A complete circular track.
#[derive(Debug)]
pub struct Track {
    segments: Vec<RoadSegment>,
}

impl Track {
    /// Expands directives into consecutive segments. Empty directive lists
    /// yield an empty track, which callers must not project.
    pub fn build(directives: &[TrackDirective]) -> Track {
        let mut segments = Vec::new();
        for d in directives {
            for _ in 0..d.length {
                let index = segments.len();
                segments.push(RoadSegment {
                    index,
                    curve: d.curve,
                    world_start_z: index as f64 * SEGMENT_LENGTH,
                    world_end_z: (index + 1) as f64 * SEGMENT_LENGTH,
                });
            }
        }
        Track { segments }
    }

    pub fn default_circuit() -> Track {
        Track::build(&DEFAULT_CIRCUIT)
    }

    pub fn segments(&self) -> &[RoadSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total world-space length of a lap.
    pub fn length(&self) -> f64 {
        self.segments.len() as f64 * SEGMENT_LENGTH
    }

    /// Segment containing the given track position. Positions are expected
    /// to already be wrapped into `0..length()`.
    pub fn segment_at(&self, position: f64) -> &RoadSegment {
        let idx = (position / SEGMENT_LENGTH) as usize % self.segments.len();
        &self.segments[idx]
    }
}

// --- Tests -----------------------------------------------------------------
