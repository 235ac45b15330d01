use std::path::PathBuf;

use clap::Parser;

/// List students from a roster file, then filter them by a minimum GPA.
#[derive(Parser, Debug)]
#[command(name = "student-roster", version, about)]
pub struct Cli {
    /// Roster file to read (.yaml, .yml, .json or .csv)
    #[arg(short, long, default_value = "students.yaml")]
    pub file: PathBuf,
}
