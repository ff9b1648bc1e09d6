use std::path::PathBuf;

use neuroplat_training::TrainingParams;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowConfigArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ShowConfigArg) -> anyhow::Result<()> {
    Output::save_json(&TrainingParams::default(), arg.output.clone())
}
