fn main() {
    if let Err(e) = six_cities::run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
