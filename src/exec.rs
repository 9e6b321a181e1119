use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, bail};

pub fn apt_get(args: &[&str]) -> anyhow::Result<()> {
    let mut command = root_command("apt-get")?;
    let status = command
        .args(args)
        .env("DEBIAN_FRONTEND", "noninteractive")
        .status()
        .context("failed to launch apt-get")?;
    if !status.success() {
        bail!("apt-get {} failed with status {}", args.join(" "), status);
    }

    Ok(())
}

pub fn run_root_command(program: &str, args: &[&str]) -> anyhow::Result<()> {
    let mut command = root_command(program)?;
    let status = command
        .args(args)
        .status()
        .with_context(|| format!("failed to start `{program}`"))?;
    if !status.success() {
        bail!(
            "command `{} {}` failed with status {}",
            program,
            args.join(" "),
            status
        );
    }

    Ok(())
}

fn root_command(program: &str) -> anyhow::Result<Command> {
    if current_euid()? == 0 {
        Ok(Command::new(program))
    } else if command_available("sudo") {
        let mut command = Command::new("sudo");
        command.arg(program);
        Ok(command)
    } else {
        bail!("`{program}` requires root privileges; run as root or install `sudo` and retry");
    }
}

pub fn run_command(program: &str, args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to start `{program}`"))?;
    if !status.success() {
        bail!(
            "command `{} {}` failed with status {}",
            program,
            args.join(" "),
            status
        );
    }

    Ok(())
}

pub fn run_shell_command(cmd: &str) -> anyhow::Result<()> {
    let status = Command::new("sh")
        .args(["-c", cmd])
        .status()
        .context("failed to start shell command")?;
    if !status.success() {
        bail!("shell command failed with status {}", status);
    }
    Ok(())
}

pub fn command_available(program: &str) -> bool {
    Command::new("sh")
        .args(["-c", &format!("command -v {program} >/dev/null 2>&1")])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

pub fn enable_service(unit: &str) {
    if !command_available("systemctl") {
        eprintln!("warning: systemctl not available; enable and start `{unit}` manually");
        return;
    }

    if let Err(err) = run_root_command("systemctl", &["enable", "--now", unit]) {
        eprintln!("warning: could not enable `{unit}`: {err:#}");
    }
}

pub fn ensure_shell_init_lines(home: &Path, lines: &[&str]) -> anyhow::Result<()> {
    let files = [home.join(".bashrc"), home.join(".profile")];

    for file in files {
        if !file.exists() {
            fs::write(&file, "").with_context(|| format!("failed to create {}", file.display()))?;
        }

        let content = fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let missing = lines
            .iter()
            .copied()
            .filter(|line| !content.lines().any(|existing| existing.trim() == line.trim()))
            .collect::<Vec<_>>();
        if missing.is_empty() {
            continue;
        }

        let mut handle = OpenOptions::new()
            .append(true)
            .open(&file)
            .with_context(|| format!("failed to open {} for append", file.display()))?;
        writeln!(handle)?;
        for line in missing {
            writeln!(handle, "{line}")?;
        }
    }

    Ok(())
}

pub fn home_dir() -> anyhow::Result<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .context("HOME environment variable is not set")
}

pub fn sudo_user() -> Option<String> {
    let user = env::var("SUDO_USER").ok()?;
    let user = user.trim();
    if user.is_empty() {
        None
    } else {
        Some(user.to_string())
    }
}

fn current_euid() -> anyhow::Result<u32> {
    let output = Command::new("id")
        .arg("-u")
        .output()
        .context("failed to get current uid")?;
    if !output.status.success() {
        bail!("failed to determine current uid");
    }

    let uid = String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse::<u32>()
        .context("failed to parse uid")?;
    Ok(uid)
}
