use crate::config::SrvkitConfig;
use crate::exec;

pub fn run(_config: &SrvkitConfig) -> anyhow::Result<()> {
    exec::apt_get(&["update"])?;
    exec::apt_get(&["install", "-y", "python3", "python3-pip", "python3-venv"])?;

    println!("Python installation complete:");
    exec::run_command("python3", &["--version"])?;
    exec::run_command("pip3", &["--version"])?;

    Ok(())
}
