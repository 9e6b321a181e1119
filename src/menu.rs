use std::collections::BTreeSet;
use std::io::{self, Write};

use anyhow::Context;

use crate::tasks::Task;

pub const DONE_COMMAND: &str = "done";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    Selecting,
    Confirmed,
}

#[derive(Debug)]
pub struct Menu<'a> {
    tasks: &'a [Task],
    selected: BTreeSet<usize>,
    notices: Vec<String>,
}

impl<'a> Menu<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self {
            tasks,
            selected: BTreeSet::new(),
            notices: Vec::new(),
        }
    }

    // The confirm row sits one past the last task.
    fn done_index(&self) -> usize {
        self.tasks.len()
    }

    pub fn apply_command(&mut self, input: &str) -> MenuStep {
        self.notices.clear();

        let input = input.trim();
        if input.is_empty() {
            return MenuStep::Selecting;
        }

        if input == DONE_COMMAND
            || input
                .parse::<usize>()
                .is_ok_and(|index| index == self.done_index())
        {
            return MenuStep::Confirmed;
        }

        for token in input.split_whitespace() {
            match token.parse::<usize>() {
                Ok(index) if index < self.tasks.len() => {
                    if !self.selected.remove(&index) {
                        self.selected.insert(index);
                    }
                }
                _ => self
                    .notices
                    .push(format!("invalid selection `{token}`, ignoring")),
            }
        }

        MenuStep::Selecting
    }

    pub fn render_lines(&self) -> Vec<String> {
        let width = self
            .tasks
            .iter()
            .map(|task| task.name.len())
            .max()
            .unwrap_or(0);

        let mut lines = vec![
            format!("Select the tasks to run, then confirm with `{DONE_COMMAND}`:"),
            String::new(),
        ];
        for (index, task) in self.tasks.iter().enumerate() {
            let mark = if self.selected.contains(&index) { 'x' } else { ' ' };
            lines.push(format!(
                " [{mark}] {index:>2}) {:<width$}  {}",
                task.name, task.summary
            ));
        }
        lines.push(format!("     {:>2}) {DONE_COMMAND}", self.done_index()));

        for notice in &self.notices {
            lines.push(format!("warning: {notice}"));
        }

        lines
    }

    fn render(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "\x1B[2J\x1B[1;1H")?;
        for line in self.render_lines() {
            writeln!(stdout, "{line}")?;
        }
        write!(stdout, "> ")?;
        stdout.flush()
    }

    pub fn into_selection(self) -> BTreeSet<usize> {
        self.selected
    }
}

pub fn select_tasks(tasks: &[Task]) -> anyhow::Result<BTreeSet<usize>> {
    let mut menu = Menu::new(tasks);

    loop {
        menu.render().context("failed to draw the task menu")?;

        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            // End of input confirms whatever is selected.
            println!();
            break;
        }

        if menu.apply_command(&line) == MenuStep::Confirmed {
            break;
        }
    }

    Ok(menu.into_selection())
}
