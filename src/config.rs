use std::path::PathBuf;

/// Results file written by the benchmark driver.
pub const DEFAULT_INPUT: &str = "MT25018_Part_D_CSV.csv";

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
        }
    }
}
