use std::process::Command;

fn fib_binary() -> &'static str {
    env!("CARGO_BIN_EXE_langbench-fib")
}

#[test]
fn rejects_wrong_argument_counts() {
    for args in [vec![], vec!["10"], vec!["10", "5", "extra"]] {
        let output = Command::new(fib_binary())
            .args(&args)
            .output()
            .expect("run langbench-fib");

        assert_eq!(output.status.code(), Some(1), "args {args:?}");
        assert!(
            output.stdout.is_empty(),
            "args {args:?} wrote to stdout: {}",
            String::from_utf8_lossy(&output.stdout)
        );
    }
}

#[test]
fn emits_six_lines_with_expected_control_values() {
    let output = Command::new(fib_binary())
        .args(["10", "5"])
        .output()
        .expect("run langbench-fib");
    assert!(output.status.success(), "status: {}", output.status);

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "expected six lines, got: {stdout:?}");

    for line in &lines[..3] {
        let seconds: f64 = line.parse().unwrap_or_else(|_| panic!("bad timing line {line:?}"));
        assert!(seconds >= 0.0, "negative stage time: {line}");
    }

    assert_eq!(lines[3], "55");
    assert_eq!(lines[4], "275");
    // The iterative stage's control value tracks the tail-recursive
    // stage's checksum, not its own accumulation.
    assert_eq!(lines[5], "275");
}

#[test]
fn non_numeric_arguments_degrade_to_zero() {
    let output = Command::new(fib_binary())
        .args(["forty", "5x"])
        .output()
        .expect("run langbench-fib");
    assert!(output.status.success(), "status: {}", output.status);

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(&lines[3..], ["0", "0", "0"]);
}

#[test]
fn zero_repetitions_leave_checksums_at_zero() {
    let output = Command::new(fib_binary())
        .args(["10", "0"])
        .output()
        .expect("run langbench-fib");
    assert!(output.status.success(), "status: {}", output.status);

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[3], "55");
    assert_eq!(lines[4], "0");
    assert_eq!(lines[5], "0");
}
