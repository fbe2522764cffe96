use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::with_file("main.vox", "si x entonces imprimir(x) fin\n")?;
    test.write_file("ui/boton.vox", "boton.texto = \"OK\"\n")?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 2 files - no errors found

    ----- stderr -----
    ");

    // Nothing is written.
    assert!(!test.root().join("main.lua").exists());
    assert!(!test.root().join("ui/boton.lua").exists());

    Ok(())
}

#[test]
fn test_check_reports_every_failure() -> Result<()> {
    let test = CliTest::with_file("a_bien.vox", "imprimir(1)\n")?;
    test.write_file("b_aridad.vox", "x = 1\ny = Color3_nuevo(1, 2, 3, 4)\n")?;
    test.write_file("c_prohibido.vox", "local m = require(modulo)\n")?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(4));
    assert_eq!(
        out.stdout,
        "error[semantic]: error processing line 2: Color3_nuevo accepts at most 3 arguments, found 4: 1, 2, 3, 4
  --> b_aridad.vox:2:5
  |
2 | y = Color3_nuevo(1, 2, 3, 4)
  |     ^

error[forbidden-word]: forbidden word 'require' found on line 1 of c_prohibido.vox
  --> c_prohibido.vox:1:11
  |
1 | local m = require(modulo)
  |           ^

\u{2718} 2 failed (3 files checked)
"
    );

    Ok(())
}

#[test]
fn test_check_semantic_only_exits_with_translation_status() -> Result<()> {
    let test = CliTest::with_file("a.vox", "Color3_nuevo(1, 2, 3, 4)\n")?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(2));

    Ok(())
}

#[test]
fn test_check_respects_config_patterns() -> Result<()> {
    let test = CliTest::with_file("src/main.vox", "imprimir(1)\n")?;
    test.write_file("src/viejo/roto.vox", "getfenv()\n")?;
    test.write_file("notas.txt", "loadstring\n")?;
    test.write_file(".voxrc.json", r#"{ "ignores": ["**/viejo/**"] }"#)?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "\u{2713} Checked 1 file - no errors found\n");

    Ok(())
}

#[test]
fn test_check_explicit_paths() -> Result<()> {
    let test = CliTest::with_file("src/main.vox", "imprimir(1)\n")?;
    test.write_file("otros/roto.vox", "getfenv()\n")?;

    let mut cmd = test.check_command();
    cmd.arg("src");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));

    let mut cmd = test.check_command();
    cmd.arg("otros/roto.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(4));
    assert!(out.stdout.contains("--> otros/roto.vox:1:1"));

    Ok(())
}

#[test]
fn test_check_missing_path() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.check_command();
    cmd.arg("no_existe");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error[usage]: path not found"));
    assert!(out.stdout.contains("--> no_existe"));

    Ok(())
}
