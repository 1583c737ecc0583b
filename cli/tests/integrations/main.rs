mod check;
mod parse;
mod render;
mod show;

use std::fs;
use std::path::{Path, PathBuf};

pub const BENCH_LOG: &str = "\
BEGIN:
Date: 2025-10-18
Phase: 1
Week: 3
Focus: Upper
Duration: 75 min
Ex1: Bench Press
Goal: 60kg x 3 sets x 6-8 reps
W1: 20x8
S1: 60x6 RPE8 good
S2: 60x6 RPE10 perfect failure:myo(3,2+1)
END
";

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
