use crate::reports;
use clap::Args;
use cocon::error::CcResult;
use cocon::factory::generate_block_by_name;

#[derive(Args, Debug, Clone)]
pub struct SequenceArgs {
    /// Response selection mode: None or Conditional
    #[arg(short, long, default_value = "Conditional")]
    pub mode: String,

    #[arg(long, default_value_t = false)]
    pub inhibition: bool,

    #[arg(long, default_value_t = false)]
    pub conflict: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: SequenceArgs) -> CcResult<()> {
    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };

    let trials = generate_block_by_name(&args.mode, args.inhibition, args.conflict, &mut rng)?;
    reports::print_sequence(&trials);
    Ok(())
}
