// make-miscue-lm: Build a reading miscue tolerant model for one prompt.
//
// Reads the prompt from stdin, splits it on whitespace and writes the
// weighted automaton to stdout in OpenFst text format:
//   from to input output cost
//   state cost
//
// Usage:
//   make-miscue-lm [OPTIONS] < prompt.txt > prompt.fst.txt
//
// Options:
//   -H, --homophones PATH   Homophone groups, one group per line
//   --id ID                 Write ID on its own line before the automaton
//   -c, --config PATH       TOML file with weights and extensions
//   --enable CATEGORY       Enable an extended miscue category (repeatable)
//   --jump-span N           Maximum number of words covered by a jump
//   --check                 Fail unless the automaton is deterministic
//   -h, --help              Print help
//
// Set RUST_LOG=debug to see per-recipe arc counts on stderr.

use std::io::{self, Read, Write};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if miscue_cli::wants_help(&args) {
        println!("make-miscue-lm: Build a reading miscue tolerant model for one prompt.");
        println!();
        println!("Usage: make-miscue-lm [OPTIONS] < prompt.txt > prompt.fst.txt");
        println!();
        println!("Reads the prompt from stdin and writes OpenFst text to stdout.");
        println!();
        println!("Options:");
        println!("  -H, --homophones PATH   Homophone groups, one group per line");
        println!("  --id ID                 Write ID on its own line before the automaton");
        println!("  -c, --config PATH       TOML file with weights and extensions");
        println!("  --enable CATEGORY       Enable an extended miscue category (repeatable):");
        println!("                          jump-forward, jump-backward, premature-end");
        println!("  --jump-span N           Maximum number of words covered by a jump");
        println!("  --check                 Fail unless the automaton is deterministic");
        println!("  -h, --help              Print this help");
        return;
    }

    let options = miscue_cli::parse_args(&args).unwrap_or_else(|e| miscue_cli::fatal(&e));

    let mut prompt = String::new();
    if let Err(e) = io::stdin().lock().read_to_string(&mut prompt) {
        miscue_cli::fatal(&format!("error reading stdin: {e}"));
    }

    let lm = miscue_cli::build_model(&options, &prompt).unwrap_or_else(|e| miscue_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let written = lm
        .write_text(options.id.as_deref(), &mut out)
        .and_then(|()| out.flush());
    if let Err(e) = written {
        miscue_cli::fatal(&format!("error writing output: {e}"));
    }
}
