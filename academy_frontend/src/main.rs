fn main() -> Result<(), eframe::Error> {
    academy_frontend::run_frontend()
}
