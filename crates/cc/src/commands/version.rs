//! Version command

use cc_core::VERSION_TAG;

pub fn run() {
    println!("{}", version_line());
}

fn version_line() -> String {
    format!("cc version {}", VERSION_TAG)
}
