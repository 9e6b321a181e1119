use crate::config::SrvkitConfig;
use crate::exec;

pub fn install_mariadb(_config: &SrvkitConfig) -> anyhow::Result<()> {
    install_server(&["mariadb-server"], "mariadb")?;
    println!("Harden the installation with: mysql_secure_installation");
    Ok(())
}

pub fn install_postgresql(_config: &SrvkitConfig) -> anyhow::Result<()> {
    install_server(&["postgresql", "postgresql-contrib"], "postgresql")
}

pub fn install_redis(_config: &SrvkitConfig) -> anyhow::Result<()> {
    install_server(&["redis-server"], "redis-server")
}

fn install_server(packages: &[&str], unit: &str) -> anyhow::Result<()> {
    exec::apt_get(&["update"])?;
    let mut args = vec!["install", "-y"];
    args.extend(packages.iter().copied());
    exec::apt_get(&args)?;
    exec::enable_service(unit);
    Ok(())
}
