fn main() -> anyhow::Result<()> {
    tasksense::cli::run()
}
