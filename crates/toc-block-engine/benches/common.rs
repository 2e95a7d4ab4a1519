// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use toc_block_engine::{BlockId, HeadingNode};

/// `sections` top level headings, each followed by a chain of deeper ones.
#[allow(dead_code)]
pub fn generate_headings(sections: usize, depth: u32) -> Vec<HeadingNode> {
    let mut headings = Vec::new();

    for section in 0..sections {
        for level in 1..=depth {
            headings.push(HeadingNode {
                level,
                content: format!("Section {section} level {level}"),
                anchor: None,
                identity: BlockId::from_u128(headings.len() as u128),
            });
        }
    }

    headings
}

#[allow(dead_code)]
pub fn generate_markdown(sections: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content.\n\n### Detail\n\n> ## Quoted heading\n\n";
    format!("[toc]\n\n{}", base.repeat(sections))
}
