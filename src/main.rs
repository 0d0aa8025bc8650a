fn main() {
    if let Err(err) = floorplan_rs::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
