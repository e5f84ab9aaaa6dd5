fn main() {
    if let Err(err) = parlor::cli::main() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
