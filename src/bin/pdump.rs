//! Short alias (`pdump`) that forwards to the `pocket_dump` library.

fn main() {
    if let Err(err) = pocket_dump::entry() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
