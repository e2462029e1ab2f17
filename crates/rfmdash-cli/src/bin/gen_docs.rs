//! Binary that emits command-line options markdown to stdout.
//!
//! The output is pasted into `docs/command-line-options.md` when options change.

fn main() {
    print!("{}", rfmdash_cli::render_options_markdown());
}
