use crate::error::{Result, TagReleaseError};
use crate::process::{display_command, CommandRunner};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone)]
enum Response {
    Stdout(String),
    Stderr(String),
}

/// Scripted runner for testing without invoking git
///
/// Responses are keyed by the full command line (`"git tag -l"`). Several
/// responses for the same command are returned in order, the last one
/// repeating. Unscripted commands succeed with empty output. Every call is
/// recorded.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: RefCell<HashMap<String, VecDeque<Response>>>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a runner with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response for `command`
    pub fn respond(&mut self, command: impl Into<String>, stdout: impl Into<String>) -> &mut Self {
        self.push(command.into(), Response::Stdout(stdout.into()))
    }

    /// Script a failing response for `command`
    pub fn fail(&mut self, command: impl Into<String>, stderr: impl Into<String>) -> &mut Self {
        self.push(command.into(), Response::Stderr(stderr.into()))
    }

    fn push(&mut self, command: String, response: Response) -> &mut Self {
        self.responses
            .get_mut()
            .entry(command)
            .or_default()
            .push_back(response);
        self
    }

    /// Command lines run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether `command` was run at least once
    pub fn was_called(&self, command: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command)
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command = display_command(program, args);
        self.calls.borrow_mut().push(command.clone());

        let mut responses = self.responses.borrow_mut();
        let response = match responses.get_mut(&command) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match response {
            Some(Response::Stdout(out)) => Ok(out),
            Some(Response::Stderr(err)) => Err(TagReleaseError::command(command, err)),
            None => Ok(String::new()),
        }
    }
}
