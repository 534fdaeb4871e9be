//! # photo-verify CLI
//!
//! Command-line interface for the photo authenticity checker.
//!
//! ## Usage
//! ```bash
//! photo-verify analyze ~/Pictures/holiday.png
//! photo-verify analyze photo.jpg --strategy remote --output json
//! ```

mod cli;

use photo_authenticity_checker::Result;

fn main() -> Result<()> {
    cli::run()
}
