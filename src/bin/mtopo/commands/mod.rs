mod analyze;
mod motifs;

use analyze::run_analyze;
use motifs::run_motifs;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Analyze(args) => run_analyze(args, ctx),
        Command::Motifs(args) => run_motifs(args, ctx),
    }
}
