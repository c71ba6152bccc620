use crate::trial::{Angle, BlockParams, Color, Direction, ResponseSelection, Shape, Stimulus};
use strum::IntoEnumIterator;

/// Every image a session can ask for: each color as global, local and
/// circle figure at each rotation.
pub fn preload_manifest() -> Vec<Stimulus> {
    let mut assets = Vec::new();
    for color in Color::iter() {
        for shape in [Shape::Global, Shape::Local, Shape::Circle] {
            for angle in Angle::ALL {
                assets.push(Stimulus {
                    color,
                    shape,
                    angle,
                });
            }
        }
    }
    assets
}

/// Response symbol drawn under an instruction example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCue {
    Arrow(Angle),
    Cross,
}

impl ResponseCue {
    /// Key the example asks for; `None` for a cross.
    pub fn response(&self) -> Option<Direction> {
        match self {
            Self::Arrow(angle) => Some(angle.orientation()),
            Self::Cross => None,
        }
    }

    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Arrow(_) => "arrow",
            Self::Cross => "cross",
        }
    }
}

/// One worked example on a block's instruction page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub global: Stimulus,
    pub local: Stimulus,
    pub cue: ResponseCue,
}

// (global color, global angle, local color, local angle, withhold)
type Example = (Color, Angle, Color, Angle, bool);

const PLAIN_EXAMPLES: [Example; 4] = [
    (Color::Blue, Angle::Left, Color::Red, Angle::Left, false),
    (Color::Yellow, Angle::Down, Color::Blue, Angle::Down, false),
    (Color::White, Angle::Left, Color::Red, Angle::Right, false),
    (Color::Red, Angle::Down, Color::Yellow, Angle::Up, true),
];

const STOP_EXAMPLES: [Example; 5] = [
    (Color::Blue, Angle::Left, Color::Red, Angle::Left, false),
    (Color::Yellow, Angle::Down, Color::Red, Angle::Down, false),
    (Color::Red, Angle::Left, Color::Blue, Angle::Right, false),
    (Color::Blue, Angle::Down, Color::Yellow, Angle::Up, true),
    (Color::White, Angle::Left, Color::Red, Angle::Left, true),
];

/// Examples shown before a block starts.
pub fn instruction_legend(params: &BlockParams) -> Vec<LegendEntry> {
    let global_shape = if params.conflict {
        Shape::Global
    } else {
        Shape::Circle
    };
    let examples: &[Example] = if params.inhibition {
        &STOP_EXAMPLES
    } else {
        &PLAIN_EXAMPLES
    };

    examples
        .iter()
        .map(|&(g_color, g_angle, l_color, l_angle, withhold)| {
            let cue = match params.response_selection {
                _ if withhold => ResponseCue::Cross,
                // Baseline: any figure that is not pointing up means DOWN.
                ResponseSelection::None => ResponseCue::Arrow(Angle::Down),
                ResponseSelection::Conditional => ResponseCue::Arrow(l_angle),
            };
            LegendEntry {
                global: Stimulus {
                    color: g_color,
                    shape: global_shape,
                    angle: g_angle,
                },
                local: Stimulus {
                    color: l_color,
                    shape: Shape::Local,
                    angle: l_angle,
                },
                cue,
            }
        })
        .collect()
}
