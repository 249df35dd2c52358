fn main() -> anyhow::Result<()> {
    favdeck::cli::run()
}
