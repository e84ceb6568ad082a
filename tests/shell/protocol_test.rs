/*!
 * Shell Protocol Tests
 * Full command sessions through the textual interface
 */

use contiguous_allocator::config::{AllocatorConfig, StatFormat};
use contiguous_allocator::memory::MemoryManager;
use contiguous_allocator::shell::{Flow, Shell};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn session(config: &AllocatorConfig, script: &str) -> String {
    let manager = MemoryManager::from_config(config).unwrap();
    let input = Cursor::new(script.to_string());
    let mut shell = Shell::with_config(manager, input, Vec::new(), config);
    shell.run().unwrap();
    let (_, output) = shell.into_parts();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_reference_session() {
    let config = AllocatorConfig::new(10_000).with_prompt("");
    let script = "\
RQ P1 500 F
RQ P2 400 F
RQ P3 300 F
RQ P4 200 F
RQ P5 100 F
RL P2
RL P4
RQ p9 50 B
RL p9
STAT
X
";
    assert_eq!(
        session(&config, script),
        "\
Addresses [0:499] Process P1
Addresses [500:899] Unused
Addresses [900:1199] Process P3
Addresses [1200:1399] Unused
Addresses [1400:1499] Process P5
Addresses [1500:9999] Unused
"
    );
}

#[test]
fn test_compact_command() {
    let config = AllocatorConfig::new(100).with_prompt("");
    let script = "RQ A 10 F\nRQ B 10 F\nRQ C 10 F\nRL A\nRL C\nC\nSTAT\nX\n";
    assert_eq!(
        session(&config, script),
        "Addresses [0:9] Process B\nAddresses [10:99] Unused\n"
    );
}

#[test]
fn test_worst_fit_command() {
    let config = AllocatorConfig::new(100).with_prompt("");
    let script = "RQ A 10 F\nRQ B 10 F\nRL A\nRQ W 5 W\nSTAT\n";
    assert_eq!(
        session(&config, script),
        "\
Addresses [0:9] Unused
Addresses [10:19] Process B
Addresses [20:24] Process W
Addresses [25:99] Unused
"
    );
}

#[test]
fn test_json_stat() {
    let config = AllocatorConfig::new(10)
        .with_prompt("")
        .with_stat_format(StatFormat::Json);
    let out = session(&config, "RQ P1 4 F\nSTAT\nX\n");
    let parsed: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(parsed[0]["owner"]["pid"], "P1");
    assert_eq!(parsed[1]["start"], 4);
    assert_eq!(parsed[1]["owner"]["kind"], "free");
}

#[test]
fn test_execute_reports_exit() {
    let manager = MemoryManager::with_capacity(10).unwrap();
    let mut shell = Shell::new(manager, Cursor::new(String::new()), Vec::new());
    assert_eq!(shell.execute("STAT").unwrap(), Flow::Continue);
    assert_eq!(shell.execute("RQ P1 3 B").unwrap(), Flow::Continue);
    assert_eq!(shell.execute("X").unwrap(), Flow::Exit);
    assert_eq!(shell.manager().lookup("P1").map(|r| r.size()), Some(3));
}
