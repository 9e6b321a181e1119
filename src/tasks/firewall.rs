use crate::config::SrvkitConfig;
use crate::exec;

const ALLOW_RULES: &[&str] = &["OpenSSH", "80/tcp", "443/tcp"];

pub fn run(_config: &SrvkitConfig) -> anyhow::Result<()> {
    exec::apt_get(&["update"])?;
    exec::apt_get(&["install", "-y", "ufw"])?;

    for rule in ALLOW_RULES.iter().copied() {
        exec::run_root_command("ufw", &["allow", rule])?;
    }

    // --force skips the prompt that would otherwise block a scripted enable.
    exec::run_root_command("ufw", &["--force", "enable"])?;
    exec::run_root_command("ufw", &["status", "verbose"])?;

    Ok(())
}
