use anyhow::bail;

use crate::config::SrvkitConfig;
use crate::exec;

pub fn install_nginx(_config: &SrvkitConfig) -> anyhow::Result<()> {
    exec::apt_get(&["update"])?;
    exec::apt_get(&["install", "-y", "nginx"])?;

    if !exec::command_available("nginx") {
        bail!("`nginx` was not found on PATH after installation");
    }
    exec::enable_service("nginx");

    println!("nginx installation complete:");
    exec::run_command("nginx", &["-v"])?;

    Ok(())
}

pub fn install_certbot(_config: &SrvkitConfig) -> anyhow::Result<()> {
    if !exec::command_available("nginx") {
        bail!("certbot needs nginx, which is not installed; run the `nginx` task first");
    }

    exec::apt_get(&["update"])?;
    exec::apt_get(&["install", "-y", "certbot", "python3-certbot-nginx"])?;

    println!("Request a certificate with: certbot --nginx -d <domain>");
    Ok(())
}
