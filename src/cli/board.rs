//! kb board command implementation.
//!
//! Thin launcher: load the board for the active partition, hand it to
//! the interactive view, report what changed when it exits.

use std::path::PathBuf;

use crate::error::Result;
use crate::ui;

use super::task::load_context;

/// Options for `kb board`
pub struct BoardOptions {
    pub dir: Option<PathBuf>,
    pub quiet: bool,
}

pub fn run(options: BoardOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let moves = ui::board::run(ctx.board, ctx.config.board.show_completed)?;
    if !options.quiet && moves > 0 {
        println!("saved {moves} move(s)");
    }
    Ok(())
}
