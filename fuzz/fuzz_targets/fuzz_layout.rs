#![no_main]

//! Layout parser fuzzer.
//!
//! Arbitrary text must either be rejected with an error or parse into a
//! layout whose maze renders back to text that parses to the same maze.

use ctfgrid::Layout;
use ctfgrid::layout::render_maze;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let Ok(layout) = Layout::parse(text) else {
        return;
    };
    let rendered = render_maze(&layout.maze);
    let Ok(reparsed) = Layout::parse(&rendered) else {
        panic!("rendered maze failed to parse:\n{rendered}");
    };
    assert_eq!(reparsed.maze, layout.maze);
});
