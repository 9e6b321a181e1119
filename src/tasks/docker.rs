use anyhow::bail;

use crate::config::SrvkitConfig;
use crate::exec;

pub fn run(_config: &SrvkitConfig) -> anyhow::Result<()> {
    if exec::command_available("docker") {
        println!("Docker already installed:");
        exec::run_command("docker", &["--version"])?;
        return Ok(());
    }

    exec::run_shell_command("curl -fsSL https://get.docker.com | sh")?;

    if !exec::command_available("docker") {
        bail!("`docker` was not found on PATH after installation");
    }
    exec::enable_service("docker");

    if let Some(user) = exec::sudo_user() {
        exec::run_root_command("usermod", &["-aG", "docker", &user])?;
        println!("Added {user} to the docker group; it applies on their next login.");
    }

    println!("Docker installation complete:");
    exec::run_command("docker", &["--version"])?;

    Ok(())
}
