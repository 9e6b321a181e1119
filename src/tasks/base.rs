use crate::config::SrvkitConfig;
use crate::exec;

const ESSENTIAL_PACKAGES: &[&str] = &[
    "build-essential",
    "ca-certificates",
    "curl",
    "git",
    "htop",
    "unzip",
    "vim",
    "wget",
];

pub fn run(config: &SrvkitConfig) -> anyhow::Result<()> {
    let packages = package_list(&config.base.extra_packages);
    println!("Installing {} base packages...", packages.len());

    exec::apt_get(&["update"])?;
    let mut args = vec!["install", "-y"];
    args.extend(packages.iter().copied());
    exec::apt_get(&args)?;

    Ok(())
}

fn package_list(extra: &[String]) -> Vec<&str> {
    let mut packages: Vec<&str> = ESSENTIAL_PACKAGES.to_vec();
    for package in extra {
        let package = package.trim();
        if !package.is_empty() && !packages.contains(&package) {
            packages.push(package);
        }
    }
    packages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_extra_packages_without_duplicates() {
        let extra = vec!["tmux".to_string(), "git".to_string(), " ".to_string()];
        let packages = package_list(&extra);
        assert!(packages.contains(&"tmux"));
        assert_eq!(
            packages.iter().filter(|package| **package == "git").count(),
            1
        );
        assert_eq!(packages.len(), ESSENTIAL_PACKAGES.len() + 1);
    }

    #[test]
    fn keeps_the_essential_set_without_extras() {
        assert_eq!(package_list(&[]), ESSENTIAL_PACKAGES);
    }
}
