
use std::io::{self, Cursor, Write};

use bashsim::heredoc::{CONTINUATION_PROMPT, PROMPT};
use bashsim::{Turn, TurnStatus};
use fixture::{fail, ok, Captured, Harness};
use pretty_assertions::assert_eq;
use session_store::Entry;
use shell_provider::TranscriptMessage;

fn run_repl(harness: &Harness, script: &str) -> Captured {
    let mut captured = Captured::default();
    harness
        .shell()
        .run_repl(Cursor::new(script.as_bytes()), &mut captured.out, &mut captured.err)
        .expect("repl should not fail on in-memory streams");
    captured
}

#[test]
fn one_shot_prints_output_and_records_entry() {
    let harness = Harness::new(vec![ok("file1.txt\nfile2.txt")]);
    let mut shell = harness.shell();
    let mut captured = Captured::default();

    let status = shell
        .run_command("ls", &[], &mut captured.out, &mut captured.err)
        .expect("run");

    assert_eq!(status, TurnStatus::Completed);
    assert_eq!(captured.out(), "file1.txt\nfile2.txt\n");
    assert_eq!(captured.err(), "");
    assert_eq!(
        harness.reopen().history(),
        &[Entry::new("ls", "file1.txt\nfile2.txt")]
    );
}

#[test]
fn one_shot_generation_failure_reports_and_records_nothing() {
    let harness = Harness::new(vec![fail("quota exceeded")]);
    let mut shell = harness.shell();
    let mut captured = Captured::default();

    let status = shell
        .run_command("ls", &[], &mut captured.out, &mut captured.err)
        .expect("run");

    assert_eq!(status, TurnStatus::GenerationFailed);
    assert_eq!(captured.out(), "");
    assert_eq!(captured.err(), "Error generating response: quota exceeded\n");
    assert!(shell.session().is_empty());
    assert!(!harness.session_path().exists());
}

#[test]
fn positional_args_reach_the_model_but_only_the_command_is_stored() {
    let harness = Harness::new(vec![ok("script.sh hello")]);
    let mut shell = harness.shell();
    let mut captured = Captured::default();
    let args = vec!["script.sh".to_string(), "hello".to_string()];

    shell
        .run_command("echo $0 $1", &args, &mut captured.out, &mut captured.err)
        .expect("run");

    let requests = harness.provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].input,
        Turn::with_positional_args("echo $0 $1", &args).model_input
    );
    assert!(requests[0].input.starts_with("Context: "));
    assert_eq!(
        harness.reopen().history(),
        &[Entry::new("echo $0 $1", "script.sh hello")]
    );
}

#[test]
fn history_is_replayed_on_each_turn_and_across_processes() {
    let harness = Harness::new(vec![ok(""), ok("a.txt\n"), ok("a.txt\nb.txt\n")]);
    let mut captured = Captured::default();

    {
        let mut shell = harness.shell();
        shell
            .run_command("touch a.txt", &[], &mut captured.out, &mut captured.err)
            .expect("first");
        shell
            .run_command("ls", &[], &mut captured.out, &mut captured.err)
            .expect("second");
    }

    let mut shell = harness.shell();
    assert_eq!(shell.session().len(), 2);
    shell
        .run_command("ls", &[], &mut captured.out, &mut captured.err)
        .expect("third");

    let requests = harness.provider.requests();
    assert!(requests[0].history.is_empty());
    assert_eq!(requests[1].history.len(), 2);
    assert_eq!(
        requests[2].history,
        vec![
            TranscriptMessage::Command {
                text: "touch a.txt".to_string()
            },
            TranscriptMessage::Output {
                text: String::new()
            },
            TranscriptMessage::Command {
                text: "ls".to_string()
            },
            TranscriptMessage::Output {
                text: "a.txt\n".to_string()
            },
        ]
    );
    assert_eq!(captured.out(), "a.txt\na.txt\nb.txt\n");
}

#[test]
fn empty_output_adds_no_newline() {
    let harness = Harness::new(vec![ok("")]);
    let mut captured = Captured::default();

    harness
        .shell()
        .run_command("cd /tmp", &[], &mut captured.out, &mut captured.err)
        .expect("run");

    assert_eq!(captured.out(), "");
    assert_eq!(harness.reopen().len(), 1);
}

#[test]
fn save_failure_warns_but_keeps_turn_in_memory() {
    let harness = Harness::new(vec![ok("one\n"), ok("two\n")]);
    let mut shell = harness.shell();
    std::fs::create_dir(harness.session_path()).expect("block session file with a directory");
    let mut captured = Captured::default();

    let status = shell
        .run_command("first", &[], &mut captured.out, &mut captured.err)
        .expect("run");
    assert_eq!(status, TurnStatus::Completed);
    assert_eq!(captured.out(), "one\n");
    assert!(captured
        .err()
        .starts_with("Warning: failed to save session: "));

    shell
        .run_command("second", &[], &mut captured.out, &mut captured.err)
        .expect("run");
    assert_eq!(harness.provider.requests()[1].history.len(), 2);
    assert_eq!(shell.session().len(), 2);
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }
}

#[test]
fn turn_is_recorded_even_when_stdout_is_closed() {
    let harness = Harness::new(vec![ok("file1.txt\n")]);
    let mut shell = harness.shell();
    let mut err = Vec::new();

    let error = shell
        .run_command("touch a.txt", &[], &mut ClosedPipe, &mut err)
        .expect_err("closed stdout surfaces as an error");

    assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(shell.session().len(), 1);
    assert_eq!(
        harness.reopen().history(),
        &[Entry::new("touch a.txt", "file1.txt\n")]
    );
    assert!(err.is_empty());
}

#[test]
fn repl_runs_commands_until_exit() {
    let harness = Harness::new(vec![ok("hi"), ok("/home/user\n")]);

    let captured = run_repl(&harness, "echo hi\n\n   \npwd\nexit\nls\n");

    assert_eq!(
        captured.out(),
        format!("{PROMPT}hi\n{PROMPT}{PROMPT}{PROMPT}/home/user\n{PROMPT}")
    );
    assert_eq!(harness.provider.requests().len(), 2);
    assert_eq!(
        harness.reopen().history(),
        &[Entry::new("echo hi", "hi"), Entry::new("pwd", "/home/user\n")]
    );
}

#[test]
fn repl_ends_on_eof() {
    let harness = Harness::new(Vec::new());

    let captured = run_repl(&harness, "whoami\r\n");

    assert_eq!(captured.out(), format!("{PROMPT}user\n{PROMPT}exit\n"));
    assert_eq!(harness.reopen().history(), &[Entry::new("whoami", "user\n")]);
}

#[test]
fn repl_submits_heredoc_as_one_turn() {
    let harness = Harness::new(vec![ok(""), ok("alpha\nbeta\n")]);

    let captured = run_repl(
        &harness,
        "cat > notes.txt << 'EOF'\nalpha\n\nbeta\nEOF\ncat notes.txt\nexit\n",
    );

    assert_eq!(
        captured.out(),
        format!(
            "{PROMPT}{CONTINUATION_PROMPT}{CONTINUATION_PROMPT}{CONTINUATION_PROMPT}\
             {CONTINUATION_PROMPT}{PROMPT}alpha\nbeta\n{PROMPT}"
        )
    );
    let history = harness.reopen();
    assert_eq!(
        history.history(),
        &[
            Entry::new("cat > notes.txt << 'EOF'\nalpha\n\nbeta\nEOF\n", ""),
            Entry::new("cat notes.txt", "alpha\nbeta\n"),
        ]
    );
}

#[test]
fn repl_discards_unterminated_heredoc_at_eof() {
    let harness = Harness::new(Vec::new());

    run_repl(&harness, "cat << EOF\nbody\n");

    assert!(harness.provider.requests().is_empty());
    assert!(!harness.session_path().exists());
}

#[test]
fn repl_continues_after_generation_failure() {
    let harness = Harness::new(vec![fail("backend down"), ok("ok\n")]);

    let captured = run_repl(&harness, "ls\nls\nexit\n");

    assert_eq!(captured.err(), "Error generating response: backend down\n");
    assert_eq!(captured.out(), format!("{PROMPT}{PROMPT}ok\n{PROMPT}"));
    assert_eq!(harness.reopen().history(), &[Entry::new("ls", "ok\n")]);
}
