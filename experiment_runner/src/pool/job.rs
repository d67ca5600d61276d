//!
//! The unit of work dispatched to a pool.
//!

use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use super::outcome::JobOutcome;

///
/// The unit of work dispatched to a pool: one process invocation.
///
/// The job owns all its data, so a submitted job never observes later changes of the
/// context it was created from.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// The unique job identifier.
    pub id: String,
    /// The target name.
    pub target: String,
    /// The instance name.
    pub instance: String,
    /// The executable.
    pub program: String,
    /// The executable arguments.
    pub arguments: Vec<String>,
    /// The environment overrides.
    pub environment: BTreeMap<String, String>,
    /// The directories prepended to list variables of the executing host, first entry first.
    pub path_prepends: BTreeMap<String, Vec<String>>,
    /// The directory the process is started in.
    pub working_directory: PathBuf,
    /// The file receiving both standard output and standard error.
    pub output: PathBuf,
}

impl Job {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        id: String,
        target: String,
        instance: String,
        command: &[String],
        working_directory: PathBuf,
        output: PathBuf,
    ) -> anyhow::Result<Self> {
        let (program, arguments) = command
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("Job `{id}` has an empty command"))?;

        Ok(Self {
            id,
            target,
            instance,
            program: program.to_owned(),
            arguments: arguments.to_vec(),
            environment: BTreeMap::new(),
            path_prepends: BTreeMap::new(),
            working_directory,
            output,
        })
    }

    ///
    /// Sets the environment overrides.
    ///
    pub fn with_environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment = environment;
        self
    }

    ///
    /// Sets the directories prepended to list variables such as `PATH`.
    ///
    pub fn with_path_prepends(mut self, path_prepends: BTreeMap<String, Vec<String>>) -> Self {
        self.path_prepends = path_prepends;
        self
    }

    ///
    /// The list variable values composed against `base`, which yields the value a
    /// variable has without the prepends.
    ///
    fn composed_paths<F>(&self, base: F) -> BTreeMap<String, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.path_prepends
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(variable, entries)| {
                let mut value = entries.join(":");
                let base = self
                    .environment
                    .get(variable)
                    .cloned()
                    .or_else(|| base(variable.as_str()))
                    .filter(|base| !base.is_empty());
                if let Some(base) = base {
                    value.push(':');
                    value.push_str(base.as_str());
                }
                (variable.to_owned(), value)
            })
            .collect()
    }

    ///
    /// The shell-quoted command line.
    ///
    pub fn command_line(&self) -> anyhow::Result<String> {
        shlex::try_join(
            std::iter::once(self.program.as_str()).chain(self.arguments.iter().map(String::as_str)),
        )
        .map_err(|error| anyhow::anyhow!("Job `{}` command quoting error: {error}", self.id))
    }

    ///
    /// The shell-quoted command line for a remote shell, including the directory and
    /// the environment.
    ///
    pub fn remote_command_line(&self) -> anyhow::Result<String> {
        let directory = self.working_directory.to_string_lossy();
        let directory = shlex::try_quote(directory.as_ref()).map_err(|error| {
            anyhow::anyhow!("Job `{}` directory quoting error: {error}", self.id)
        })?;

        let quote = |value: &str| {
            shlex::try_quote(value)
                .map(|value| value.into_owned())
                .map_err(|error| {
                    anyhow::anyhow!("Job `{}` environment quoting error: {error}", self.id)
                })
        };

        let paths = self.composed_paths(|_| None);
        let mut words = vec!["env".to_owned()];
        for (key, value) in self.environment.iter() {
            if !paths.contains_key(key.as_str()) {
                words.push(format!("{key}={}", quote(value.as_str())?));
            }
        }
        // The remote shell expands the node's own value after the prepended entries.
        for (variable, value) in paths {
            let value = quote(value.as_str())?;
            match self.environment.get(variable.as_str()) {
                Some(_) => words.push(format!("{variable}={value}")),
                None => words.push(format!("{variable}={value}\"${{{variable}:+:${variable}}}\"")),
            }
        }

        let program = shlex::try_join(
            std::iter::once(self.program.as_str()).chain(self.arguments.iter().map(String::as_str)),
        )
        .map_err(|error| anyhow::anyhow!("Job `{}` command quoting error: {error}", self.id))?;
        words.push(program);
        let command = words.join(" ");

        Ok(format!("cd {directory} && {command}"))
    }

    ///
    /// Executes the job in a local subprocess, blocking until it exits.
    ///
    pub fn execute(&self) -> JobOutcome {
        let mut command = Command::new(self.program.as_str());
        command.args(self.arguments.as_slice());
        command.envs(self.environment.iter());
        command.envs(self.composed_paths(|variable| std::env::var(variable).ok()));
        command.current_dir(self.working_directory.as_path());
        self.execute_with(command, None, chrono::Utc::now())
    }

    ///
    /// Executes the job on `node` over SSH, blocking until it exits.
    ///
    pub fn execute_remote(&self, node: &str) -> JobOutcome {
        let start = chrono::Utc::now();
        let remote_command_line = match self.remote_command_line() {
            Ok(line) => line,
            Err(error) => {
                return JobOutcome::new(self, Some(node.to_owned()), start, Err(error.to_string()))
            }
        };

        let mut command = Command::new("ssh");
        command.args(["-o", "BatchMode=yes", node, remote_command_line.as_str()]);
        self.execute_with(command, Some(node.to_owned()), start)
    }

    fn execute_with(
        &self,
        command: Command,
        node: Option<String>,
        start: chrono::DateTime<chrono::Utc>,
    ) -> JobOutcome {
        let result = self.spawn(command).map_err(|error| format!("{error:#}"));
        JobOutcome::new(self, node, start, result)
    }

    fn spawn(&self, mut command: Command) -> anyhow::Result<()> {
        if let Some(parent) = self.output.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                anyhow::anyhow!("Output directory {parent:?} creating error: {error}")
            })?;
        }
        let stdout = File::create(self.output.as_path()).map_err(|error| {
            anyhow::anyhow!("Output file {:?} creating error: {error}", self.output)
        })?;
        let stderr = stdout.try_clone()?;

        command.stdin(Stdio::null());
        command.stdout(stdout);
        command.stderr(stderr);

        let status = command.status().map_err(|error| {
            anyhow::anyhow!("`{}` subprocess spawning error: {error}", self.program)
        })?;
        if !status.success() {
            anyhow::bail!(
                "`{}` exited with {status}, see {:?}",
                self.program,
                self.output
            );
        }
        Ok(())
    }
}
