fn main() {
    if let Err(err) = signage_slide_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
