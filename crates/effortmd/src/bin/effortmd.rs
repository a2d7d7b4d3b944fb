fn main() {
    if let Err(err) = effortmd::run() {
        eprintln!("{}", effortmd::format_error(&err));
        std::process::exit(1);
    }
}
