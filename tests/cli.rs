use assert_cmd::Command;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::{fs, path::PathBuf};

type MyResult<T> = Result<T, Box<dyn std::error::Error>>;

const PRG: &str = "bspentityalias";

fn run(args: &[&str], expected_file: &str) -> MyResult<()> {
    let expected = fs::read_to_string(expected_file)?;
    let output = Command::cargo_bin(PRG)?.args(args).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");
    assert_eq!(stdout, expected);

    Ok(())
}

fn fail(args: &[&str], expected_error: &str) -> MyResult<()> {
    let output = Command::cargo_bin(PRG)?.args(args).output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).expect("invalid UTF-8");
    assert!(
        stderr.ends_with(&format!("{}\n", expected_error)),
        "unexpected stderr: {}",
        stderr
    );

    Ok(())
}

fn scratch_dir(name: &str) -> MyResult<PathBuf> {
    let dir = std::env::temp_dir().join(format!("{}-{}-{}", PRG, name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir_all(&dir)?;

    Ok(dir)
}

#[test]
fn aliases_beside_map() -> MyResult<()> {
    run(
        &["tests/inputs/maps/test.bsp", "-o", "-"],
        "tests/expected/test.ent",
    )
}

#[test]
fn explicit_aliases() -> MyResult<()> {
    run(
        &[
            "tests/inputs/maps/aliases.def",
            "tests/inputs/maps/test.bsp",
            "--output",
            "-",
        ],
        "tests/expected/test.ent",
    )
}

#[test]
fn aliases_with_byte_order_mark() -> MyResult<()> {
    run(
        &["tests/inputs/bom.def", "tests/inputs/maps/test.bsp", "-o", "-"],
        "tests/expected/test.ent",
    )
}

#[test]
fn empty_aliases_leave_entities_unchanged() -> MyResult<()> {
    let output = Command::cargo_bin(PRG)?
        .args(&["tests/inputs/empty.def", "tests/inputs/maps/test.bsp", "-o", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");
    assert!(stdout.contains("\t\"classname\" \"light_spot\"\n\t\"origin\" \"0 0 64\"\n\t\"light\" \"200\"\n}\n"));

    let stderr = String::from_utf8(output.stderr).expect("invalid UTF-8");
    assert!(stderr.contains("tests/inputs/empty.def defines no aliases"));
    assert!(stderr.contains("Loaded 0 alias definitions."));

    Ok(())
}

#[test]
fn json_with_renamed_classnames() -> MyResult<()> {
    let expected: Value =
        serde_json::from_str(&fs::read_to_string("tests/expected/test.json")?).unwrap();
    let output = Command::cargo_bin(PRG)?
        .args(&[
            "tests/inputs/maps/test.bsp",
            "-o",
            "-",
            "--format",
            "json",
            "--rename-classname",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");
    let value: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(value, expected);

    Ok(())
}

#[test]
fn writes_sidecar_next_to_map() -> MyResult<()> {
    let dir = scratch_dir("sidecar")?;
    let map = dir.join("test.bsp");
    fs::copy("tests/inputs/maps/test.bsp", &map)?;
    fs::copy("tests/inputs/maps/aliases.def", dir.join("aliases.def"))?;

    let output = Command::cargo_bin(PRG)?
        .arg(map.to_str().unwrap())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).expect("invalid UTF-8");
    assert!(stderr.contains("Loaded 2 alias definitions."));
    assert!(stderr.contains("aliasing light_spot -> light_spot..."));
    assert!(stderr.contains("finished"));

    assert_eq!(
        fs::read_to_string(dir.join("test.bsp.ent"))?,
        fs::read_to_string("tests/expected/test.ent")?
    );

    fs::remove_dir_all(&dir)?;

    Ok(())
}

#[test]
fn quiet_logs_nothing() -> MyResult<()> {
    let output = Command::cargo_bin(PRG)?
        .args(&["-q", "tests/inputs/maps/test.bsp", "-o", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    Ok(())
}

#[test]
fn missing_map() -> MyResult<()> {
    fail(
        &["tests/inputs/maps/nothing.bsp"],
        "File \"tests/inputs/maps/nothing.bsp\" does not exist",
    )
}

#[test]
fn missing_aliases() -> MyResult<()> {
    fail(
        &["nothing.def", "tests/inputs/maps/test.bsp", "-o", "-"],
        "Alias definition file \"nothing.def\" does not exist (checked relative to current dir & relative to tests/inputs/maps/test.bsp's directory)",
    )
}

#[test]
fn duplicate_alias() -> MyResult<()> {
    fail(
        &["tests/inputs/duplicate.def", "tests/inputs/maps/test.bsp", "-o", "-"],
        "tests/inputs/duplicate.def(3,0): alias `light` already defined earlier in file",
    )
}

#[test]
fn no_entity_lump() -> MyResult<()> {
    fail(
        &["tests/inputs/maps/nolump.bsp", "-o", "-"],
        "tests/inputs/maps/nolump.bsp: can't find start of entity lump",
    )
}

#[test]
fn too_many_files() -> MyResult<()> {
    let output = Command::cargo_bin(PRG)?
        .args(&["a.def", "b.bsp", "c.bsp"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    Ok(())
}
