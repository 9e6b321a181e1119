use std::path::{Path, PathBuf};

use anyhow::bail;

use crate::config::SrvkitConfig;
use crate::exec;

const NVM_INSTALLER: &str =
    "curl -fsSL https://raw.githubusercontent.com/nvm-sh/nvm/v0.40.1/install.sh | bash";

// The lines nvm's installer adds itself; re-ensured in case the user pruned them.
const NVM_INIT_LINES: [&str; 2] = [
    r#"export NVM_DIR="$HOME/.nvm""#,
    r#"[ -s "$NVM_DIR/nvm.sh" ] && \. "$NVM_DIR/nvm.sh""#,
];

pub fn install_node(config: &SrvkitConfig) -> anyhow::Result<()> {
    let home = exec::home_dir()?;
    if nvm_script(&home).exists() {
        println!("nvm already installed, skipping its installer.");
    } else {
        exec::run_shell_command(NVM_INSTALLER)?;
    }
    exec::ensure_shell_init_lines(&home, &NVM_INIT_LINES)?;

    exec::run_shell_command(&nvm_shell(&nvm_install_command(&config.nodejs.version)))?;

    println!("Node.js installation complete:");
    exec::run_shell_command(&nvm_shell("node --version && npm --version"))?;

    Ok(())
}

pub fn install_pm2(_config: &SrvkitConfig) -> anyhow::Result<()> {
    let home = exec::home_dir()?;
    if !nvm_script(&home).exists() && !exec::command_available("npm") {
        bail!("pm2 needs npm, which is not installed; run the `nodejs` task first");
    }

    exec::run_shell_command(&nvm_shell("npm install -g pm2"))?;

    println!("pm2 installation complete:");
    exec::run_shell_command(&nvm_shell("pm2 --version"))?;

    Ok(())
}

fn nvm_script(home: &Path) -> PathBuf {
    home.join(".nvm").join("nvm.sh")
}

fn nvm_shell(command: &str) -> String {
    format!(
        r#"export NVM_DIR="$HOME/.nvm"; [ -s "$NVM_DIR/nvm.sh" ] && \. "$NVM_DIR/nvm.sh"; {command}"#
    )
}

fn nvm_install_command(version: &str) -> String {
    if version == "lts" {
        "nvm install --lts && nvm alias default 'lts/*'".to_string()
    } else {
        format!("nvm install {version} && nvm alias default {version}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_the_lts_alias_to_the_nvm_flag() {
        assert_eq!(
            nvm_install_command("lts"),
            "nvm install --lts && nvm alias default 'lts/*'"
        );
    }

    #[test]
    fn pins_explicit_versions() {
        assert_eq!(
            nvm_install_command("22"),
            "nvm install 22 && nvm alias default 22"
        );
    }

    #[test]
    fn shell_commands_source_nvm_first() {
        let command = nvm_shell("npm install -g pm2");
        assert!(command.starts_with(r#"export NVM_DIR="$HOME/.nvm";"#));
        assert!(command.ends_with("npm install -g pm2"));
    }
}
