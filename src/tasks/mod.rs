pub mod base;
pub mod database;
pub mod docker;
pub mod firewall;
pub mod nodejs;
pub mod python;
pub mod web;

use std::collections::BTreeSet;

use anyhow::bail;

use crate::config::SrvkitConfig;

#[derive(Debug, Clone, Copy)]
pub struct Task {
    pub name: &'static str,
    pub summary: &'static str,
    pub run: fn(&SrvkitConfig) -> anyhow::Result<()>,
}

// Ordered so that running an ascending selection satisfies prerequisites:
// nodejs before pm2, nginx before certbot.
const TASKS: &[Task] = &[
    Task {
        name: "base",
        summary: "apt update and essential server packages",
        run: base::run,
    },
    Task {
        name: "nginx",
        summary: "nginx web server, enabled on boot",
        run: web::install_nginx,
    },
    Task {
        name: "nodejs",
        summary: "Node.js via nvm",
        run: nodejs::install_node,
    },
    Task {
        name: "pm2",
        summary: "pm2 process manager (needs nodejs)",
        run: nodejs::install_pm2,
    },
    Task {
        name: "python",
        summary: "Python 3 with pip and venv",
        run: python::run,
    },
    Task {
        name: "mariadb",
        summary: "MariaDB server",
        run: database::install_mariadb,
    },
    Task {
        name: "postgresql",
        summary: "PostgreSQL server",
        run: database::install_postgresql,
    },
    Task {
        name: "redis",
        summary: "Redis server",
        run: database::install_redis,
    },
    Task {
        name: "docker",
        summary: "Docker Engine via get.docker.com",
        run: docker::run,
    },
    Task {
        name: "certbot",
        summary: "certbot with the nginx plugin (needs nginx)",
        run: web::install_certbot,
    },
    Task {
        name: "firewall",
        summary: "ufw allowing OpenSSH, HTTP and HTTPS",
        run: firewall::run,
    },
];

pub fn all() -> &'static [Task] {
    TASKS
}

pub fn find(name: &str) -> Option<(usize, &'static Task)> {
    all().iter().enumerate().find(|(_, task)| task.name == name)
}

pub fn resolve_names(names: &[String]) -> anyhow::Result<BTreeSet<usize>> {
    let mut selection = BTreeSet::new();
    for name in names {
        let Some((index, _)) = find(name) else {
            bail!("unknown task `{name}`; see `srvkit list`");
        };
        selection.insert(index);
    }
    Ok(selection)
}

pub fn print_list() {
    println!("Available provisioning tasks:");
    let width = all()
        .iter()
        .map(|task| task.name.len())
        .max()
        .unwrap_or(0);
    for (index, task) in all().iter().enumerate() {
        println!("{index:>2}) {:<width$}  {}", task.name, task.summary);
    }
}
