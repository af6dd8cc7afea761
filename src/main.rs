fn main() {
    if let Err(err) = pocket_dump::entry() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
