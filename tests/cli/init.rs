use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .voxrc.json

    ----- stderr -----
    ");

    let config: serde_json::Value = serde_json::from_str(&test.read_file(".voxrc.json")?)?;
    assert_eq!(config["includes"], serde_json::json!(["**/*.vox"]));
    assert_eq!(config["outputExtension"], "lua");
    assert_eq!(config["forbiddenWords"], serde_json::json!([]));

    Ok(())
}

#[test]
fn test_init_existing_config() -> Result<()> {
    let test = CliTest::with_file(".voxrc.json", "{}")?;

    let out = run(test.init_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains(".voxrc.json already exists"));
    assert_eq!(test.read_file(".voxrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_used_by_translate() -> Result<()> {
    let test = CliTest::with_file("main.vox", "imprimir(1)\n")?;
    run(test.init_command())?;

    let mut cmd = test.translate_command();
    cmd.arg("main.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert_eq!(test.read_file("main.lua")?, "print(1)\n");

    Ok(())
}
