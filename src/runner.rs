use std::collections::{BTreeSet, HashSet};
use std::env;
use std::process::Command;

use crate::config::SrvkitConfig;
use crate::tasks::Task;

#[derive(Debug)]
pub struct TaskOutcome {
    pub name: &'static str,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    pub fn failed(&self) -> Vec<&TaskOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.error.is_some())
            .collect()
    }
}

pub fn execute(tasks: &[Task], selection: &BTreeSet<usize>, config: &SrvkitConfig) -> RunReport {
    let mut report = RunReport::default();

    for &index in selection {
        let Some(task) = tasks.get(index) else {
            continue;
        };

        println!("==> Running: {}", task.name);
        let error = match (task.run)(config) {
            Ok(()) => None,
            Err(err) => {
                // A failed task must not stop the rest of the run.
                eprintln!("error: task `{}` failed: {err:#}", task.name);
                Some(format!("{err:#}"))
            }
        };
        println!("==> Finished: {}", task.name);

        report.outcomes.push(TaskOutcome {
            name: task.name,
            error,
        });
    }

    report
}

pub fn print_summary(report: &RunReport) {
    let failed = report.failed();
    if failed.is_empty() {
        println!("Setup complete: {} task(s) succeeded.", report.outcomes.len());
        return;
    }

    println!(
        "Setup finished: {} of {} task(s) failed.",
        failed.len(),
        report.outcomes.len()
    );
    for outcome in failed {
        if let Some(error) = &outcome.error {
            println!("- {}: {error}", outcome.name);
        }
    }
    println!("Failed tasks can be retried with `srvkit run <name>`.");
}

pub fn refresh_login_environment() {
    let Ok(output) = Command::new("sh")
        .args(["-lc", r#"printf %s "$PATH""#])
        .output()
    else {
        return;
    };
    if !output.status.success() {
        return;
    }

    let login_path = String::from_utf8_lossy(&output.stdout);
    let current_path = env::var("PATH").unwrap_or_default();
    let additions = path_additions(&current_path, &login_path);
    if additions.is_empty() {
        return;
    }

    println!("Shell configuration adds PATH entries not active in this session:");
    for entry in &additions {
        println!("- {entry}");
    }
    println!("Start a new login shell to pick them up.");
}

fn path_additions(current: &str, login: &str) -> Vec<String> {
    let known = current
        .split(':')
        .filter(|entry| !entry.is_empty())
        .collect::<HashSet<_>>();

    let mut seen = HashSet::new();
    login
        .split(':')
        .filter(|entry| !entry.is_empty() && !known.contains(entry) && seen.insert(*entry))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(_config: &SrvkitConfig) -> anyhow::Result<()> {
        Ok(())
    }

    fn fails(_config: &SrvkitConfig) -> anyhow::Result<()> {
        anyhow::bail!("boom")
    }

    const RUNNER_TASKS: &[Task] = &[
        Task {
            name: "alpha",
            summary: "first",
            run: ok,
        },
        Task {
            name: "beta",
            summary: "second",
            run: fails,
        },
        Task {
            name: "gamma",
            summary: "third",
            run: ok,
        },
    ];

    #[test]
    fn runs_the_selection_in_ascending_index_order() {
        let selection = BTreeSet::from([2, 0]);
        let report = execute(RUNNER_TASKS, &selection, &SrvkitConfig::default());
        let names = report
            .outcomes
            .iter()
            .map(|outcome| outcome.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["alpha", "gamma"]);
    }

    #[test]
    fn continues_past_a_failing_task() {
        let selection = BTreeSet::from([0, 1, 2]);
        let report = execute(RUNNER_TASKS, &selection, &SrvkitConfig::default());
        assert_eq!(report.outcomes.len(), 3);
        assert!(report.outcomes[0].error.is_none());
        assert!(
            report.outcomes[1]
                .error
                .as_deref()
                .is_some_and(|error| error.contains("boom"))
        );
        assert!(report.outcomes[2].error.is_none());
        assert_eq!(report.failed().len(), 1);
    }

    #[test]
    fn empty_selection_runs_nothing() {
        let report = execute(RUNNER_TASKS, &BTreeSet::new(), &SrvkitConfig::default());
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn a_fresh_run_is_unaffected_by_an_earlier_failure() {
        let config = SrvkitConfig::default();
        let first = execute(RUNNER_TASKS, &BTreeSet::from([1]), &config);
        assert_eq!(first.failed().len(), 1);

        let second = execute(RUNNER_TASKS, &BTreeSet::from([0, 2]), &config);
        assert!(second.failed().is_empty());
        assert_eq!(second.outcomes.len(), 2);
    }

    #[test]
    fn path_additions_reports_only_new_entries() {
        let additions = path_additions(
            "/usr/bin:/bin",
            "/usr/bin:/bin:/opt/tool/bin:/opt/tool/bin",
        );
        assert_eq!(additions, ["/opt/tool/bin"]);
    }

    #[test]
    fn path_additions_is_empty_when_nothing_changed() {
        assert!(path_additions("/usr/bin:/bin", "/bin:/usr/bin").is_empty());
    }
}
