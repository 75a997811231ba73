use std::path::{Path, PathBuf};

use plotters::style::IntoFont;
use tempfile::TempDir;

/// Two worker counts per program for the cpu and io workloads; no mem rows.
pub const SAMPLE_CSV: &str = "\
Program,Function,Num_Workers,Memory(MB),CPU%,IO(MB/s)
A,cpu,1,10,95.5,0.1
A,cpu,2,20,190.0,0.2
B,cpu,1,15,97.0,0.1
B,cpu,2,25,195.0,0.3
A,io,1,4,12.0,40.0
A,io,2,8,20.0,75.0
B,io,1,3,11.0,42.0
B,io,2,5,18.0,80.0
";

/// Directory removed when the returned guard drops; keep it alive for the test.
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

pub fn write_csv(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("results.csv");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Chart text needs a system sans-serif font; rendering tests skip without one.
pub fn has_chart_font() -> bool {
    let available = ("sans-serif", 12.0).into_font().box_size("0").is_ok();
    if !available {
        eprintln!("no sans-serif font found, skipping chart rendering");
    }
    available
}
