use crate::error::{CcResult, CoConError};
use crate::rng::RandomSource;
use crate::trial::{
    Angle, BlockParams, Color, Conflict, ResponseSelection, Shape, Stimulus, Trial, TrialKind,
};
use tracing::debug;

/// Colors for figures when white carries no meaning.
pub const FULL_PALETTE: [Color; 4] = [Color::Red, Color::Yellow, Color::Blue, Color::White];
/// Colors for figures when white is the stop cue.
pub const CUED_PALETTE: [Color; 3] = [Color::Red, Color::Yellow, Color::Blue];
/// Global color that cancels the response.
pub const STOP_COLOR: Color = Color::White;

#[derive(Debug, Clone, Copy)]
pub struct TrialGroup {
    pub kind: TrialKind,
    pub count: usize,
}

/// Composition of one block: every sub-block repeats `groups`, is shuffled
/// on its own (when `shuffle` is set) and appended in `sub_blocks` order.
#[derive(Debug)]
pub struct BlockSpec {
    pub name: &'static str,
    pub params: BlockParams,
    pub global_shape: Shape,
    pub palette: &'static [Color],
    pub sub_blocks: &'static [Conflict],
    pub groups: &'static [TrialGroup],
    pub shuffle: bool,
    /// Baseline: every orientation is drawn, the answer is always DOWN.
    pub respond_down: bool,
}

impl BlockSpec {
    pub fn len(&self) -> usize {
        self.sub_blocks.len() * self.groups.iter().map(|g| g.count).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const STOP_SIGNAL_GROUPS: [TrialGroup; 4] = [
    TrialGroup {
        kind: TrialKind::Go,
        count: 40,
    },
    TrialGroup {
        kind: TrialKind::NoResponse,
        count: 3,
    },
    TrialGroup {
        kind: TrialKind::InhibitGo,
        count: 6,
    },
    TrialGroup {
        kind: TrialKind::InhibitDouble,
        count: 3,
    },
];

pub static BLOCK_SPECS: [BlockSpec; 4] = [
    BlockSpec {
        name: "baseline",
        params: BlockParams::new(ResponseSelection::None, false, false),
        global_shape: Shape::Circle,
        palette: &FULL_PALETTE,
        sub_blocks: &[Conflict::Neutral],
        groups: &[TrialGroup {
            kind: TrialKind::Go,
            count: 30,
        }],
        shuffle: false,
        respond_down: true,
    },
    BlockSpec {
        name: "response_selection",
        params: BlockParams::new(ResponseSelection::Conditional, false, false),
        global_shape: Shape::Circle,
        palette: &FULL_PALETTE,
        sub_blocks: &[Conflict::Neutral],
        groups: &[
            TrialGroup {
                kind: TrialKind::Go,
                count: 30,
            },
            TrialGroup {
                kind: TrialKind::NoResponse,
                count: 3,
            },
        ],
        shuffle: true,
        respond_down: false,
    },
    BlockSpec {
        name: "inhibition",
        params: BlockParams::new(ResponseSelection::Conditional, true, false),
        global_shape: Shape::Circle,
        palette: &CUED_PALETTE,
        sub_blocks: &[Conflict::Neutral],
        groups: &STOP_SIGNAL_GROUPS,
        shuffle: true,
        respond_down: false,
    },
    BlockSpec {
        name: "conflict",
        params: BlockParams::new(ResponseSelection::Conditional, true, true),
        global_shape: Shape::Global,
        palette: &CUED_PALETTE,
        sub_blocks: &[Conflict::Incongruent, Conflict::Congruent],
        groups: &STOP_SIGNAL_GROUPS,
        shuffle: true,
        respond_down: false,
    },
];

/// The four blocks of a session, in the order they are administered.
pub fn session_blocks() -> impl Iterator<Item = BlockParams> {
    BLOCK_SPECS.iter().map(|s| s.params)
}

pub fn block_spec(params: BlockParams) -> CcResult<&'static BlockSpec> {
    BLOCK_SPECS
        .iter()
        .find(|s| s.params == params)
        .ok_or_else(|| CoConError::UnsupportedBlock {
            response_selection: params.response_selection.to_string(),
            inhibition: params.inhibition,
            conflict: params.conflict,
        })
}

/// Builds the ordered trial list for one block.
pub fn generate_block<R: RandomSource>(
    response_selection: ResponseSelection,
    inhibition: bool,
    conflict: bool,
    rng: &mut R,
) -> CcResult<Vec<Trial>> {
    let spec = block_spec(BlockParams::new(response_selection, inhibition, conflict))?;
    Ok(build_from_spec(spec, rng))
}

/// Same as [`generate_block`] with the mode given by name (`"None"` or
/// `"Conditional"`).
pub fn generate_block_by_name<R: RandomSource>(
    mode: &str,
    inhibition: bool,
    conflict: bool,
    rng: &mut R,
) -> CcResult<Vec<Trial>> {
    let response_selection = ResponseSelection::parse(mode)?;
    generate_block(response_selection, inhibition, conflict, rng)
}

pub fn build_from_spec<R: RandomSource>(spec: &BlockSpec, rng: &mut R) -> Vec<Trial> {
    let mut trials = Vec::with_capacity(spec.len());

    for &conflict in spec.sub_blocks {
        let mut sub_block: Vec<Trial> = spec
            .groups
            .iter()
            .flat_map(|g| std::iter::repeat(g.kind).take(g.count))
            .map(|kind| make_trial(spec, conflict, kind, rng))
            .collect();

        if spec.shuffle {
            rng.shuffle(&mut sub_block);
        }
        trials.extend(sub_block);
    }

    debug!("Generated {} block: {} trials", spec.name, trials.len());
    trials
}

fn make_trial<R: RandomSource>(
    spec: &BlockSpec,
    conflict: Conflict,
    kind: TrialKind,
    rng: &mut R,
) -> Trial {
    let local_angle = if spec.respond_down {
        rng.choose(&Angle::ALL)
    } else {
        match kind {
            TrialKind::Go | TrialKind::InhibitGo => rng.choose(&Angle::RESPONSIVE),
            TrialKind::NoResponse | TrialKind::InhibitDouble => Angle::Up,
        }
    };

    let global_angle = match conflict {
        Conflict::Neutral => Angle::Down,
        Conflict::Congruent => local_angle,
        Conflict::Incongruent => local_angle.mirrored(),
    };

    let inhibition = matches!(kind, TrialKind::InhibitGo | TrialKind::InhibitDouble);
    let global_color = if inhibition {
        STOP_COLOR
    } else {
        rng.choose(spec.palette)
    };
    let local_color = rng.choose(spec.palette);

    // Pointing up always means "withhold", whatever the block.
    let response_available = local_angle != Angle::Up;
    let response_correct = match (response_available, inhibition) {
        (false, _) | (true, true) => None,
        (true, false) if spec.respond_down => Some(Angle::Down),
        (true, false) => Some(local_angle),
    };

    Trial {
        params: spec.params,
        global: Stimulus {
            color: global_color,
            shape: spec.global_shape,
            angle: global_angle,
        },
        local: Stimulus {
            color: local_color,
            shape: Shape::Local,
            angle: local_angle,
        },
        inhibition,
        conflict,
        response_available,
        response_correct,
        outcome: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lengths() {
        let lens: Vec<usize> = BLOCK_SPECS.iter().map(|s| s.len()).collect();
        assert_eq!(lens, vec![30, 33, 52, 104]);
    }

    #[test]
    fn test_lookup_rejects_unknown_triples() {
        let params = BlockParams::new(ResponseSelection::None, true, false);
        assert!(matches!(
            block_spec(params),
            Err(CoConError::UnsupportedBlock { inhibition: true, .. })
        ));
    }

    #[test]
    fn test_conflict_sub_blocks_are_not_interleaved() {
        let mut rng = fastrand::Rng::with_seed(3);
        let trials = generate_block(ResponseSelection::Conditional, true, true, &mut rng).unwrap();
        assert!(trials[..52].iter().all(|t| t.conflict == Conflict::Incongruent));
        assert!(trials[52..].iter().all(|t| t.conflict == Conflict::Congruent));
    }

    #[test]
    fn test_stop_cue_never_drawn_from_palette() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..50 {
            let trials =
                generate_block(ResponseSelection::Conditional, true, false, &mut rng).unwrap();
            for t in &trials {
                assert_ne!(t.local.color, STOP_COLOR);
                assert_eq!(t.global.color == STOP_COLOR, t.inhibition);
            }
        }
    }
}
