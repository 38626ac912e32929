fn main() {
    if let Err(err) = schema_merge::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
