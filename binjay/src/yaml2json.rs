//! Filter that reads one YAML document from stdin and writes its JSON
//! rendering to stdout.
//!
//! Usage: yaml2json <YAML >JSON
//!
//! Takes no arguments. Exits 0 on success, 21 on malformed input, 1 on
//! usage errors and unsupported constructs, 20 on output failures.

use std::io::{self, BufWriter, Read, Write};
use std::process;

fn main() {
    if std::env::args().len() != 1 {
        eprintln!("USAGE: yaml2json <YAML >JSON");
        process::exit(1);
    }

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading stdin: {}", e);
        process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = libjay::yaml_to_json(&input, &mut out)
        .and_then(|()| out.flush().map_err(libjay::Error::from));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}
