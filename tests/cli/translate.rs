use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const SCRIPT: &str = r#"local jugadores = obtener_servicio("jugadores")

si jugadores.jugador_local entonces
    imprimir("hola")
sino
    tarea_espera(1)
fin
"#;

const EXPECTED: &str = r#"local jugadores = game:GetService("Players")

if jugadores.LocalPlayer then
    print("hola")
else
    task.wait(1)
end
"#;

#[test]
fn test_translate_writes_output_next_to_input() -> Result<()> {
    let test = CliTest::with_file("main.vox", SCRIPT)?;

    let mut cmd = test.translate_command();
    cmd.arg("main.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "\u{2713} Translated main.vox -> main.lua\n");
    assert_eq!(test.read_file("main.lua")?, EXPECTED);
    // The source is never modified.
    assert_eq!(test.read_file("main.vox")?, SCRIPT);

    Ok(())
}

#[test]
fn test_translate_to_stdout() -> Result<()> {
    let test = CliTest::with_file("main.vox", SCRIPT)?;

    let mut cmd = test.translate_command();
    cmd.args(["main.vox", "--stdout"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, EXPECTED);
    assert!(!test.root().join("main.lua").exists());

    Ok(())
}

#[test]
fn test_translate_explicit_output() -> Result<()> {
    let test = CliTest::with_file("scripts/boton.vox", "boton.tocado:conectar(f)\n")?;

    let mut cmd = test.translate_command();
    cmd.args(["scripts/boton.vox", "boton.lua"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert_eq!(test.read_file("boton.lua")?, "boton.Touched:Connect(f)\n");

    Ok(())
}

#[test]
fn test_translate_missing_input() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.translate_command();
    cmd.arg("nada.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("error[usage]: input file not found"));

    Ok(())
}

#[test]
fn test_translate_refuses_to_overwrite_input() -> Result<()> {
    let test = CliTest::with_file("main.lua", "imprimir(1)\n")?;

    let mut cmd = test.translate_command();
    cmd.arg("main.lua");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));
    assert_eq!(test.read_file("main.lua")?, "imprimir(1)\n");

    Ok(())
}

#[test]
fn test_translate_semantic_error() -> Result<()> {
    let test = CliTest::with_file(
        "colores.vox",
        "local a = 1\nlocal c = Color3_nuevo(1, 0, 0, 0.5)\n",
    )?;

    let mut cmd = test.translate_command();
    cmd.arg("colores.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(2));
    assert_eq!(out.stdout, "");
    assert_eq!(
        out.stderr,
        "error[semantic]: error processing line 2: Color3_nuevo accepts at most 3 arguments, found 4: 1, 0, 0, 0.5
  --> colores.vox:2:11
  |
2 | local c = Color3_nuevo(1, 0, 0, 0.5)
  |           ^

"
    );
    assert!(!test.root().join("colores.lua").exists());

    Ok(())
}

#[test]
fn test_translate_forbidden_word() -> Result<()> {
    let test = CliTest::with_file("malo.vox", "imprimir(\"ok\")\nlocal f = loadstring(codigo)\n")?;

    let mut cmd = test.translate_command();
    cmd.arg("malo.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(4));
    assert!(
        out.stderr
            .contains("error[forbidden-word]: forbidden word 'loadstring' found on line 2 of malo.vox")
    );
    assert!(out.stderr.contains("--> malo.vox:2:11"));
    assert!(!test.root().join("malo.lua").exists());

    Ok(())
}

#[test]
fn test_translate_uses_config() -> Result<()> {
    let test = CliTest::with_file("main.vox", "mostrar(x)\nteletransportar(j)\n")?;
    test.write_file(
        ".voxrc.json",
        r#"{
            "outputExtension": "luau",
            "rules": { "keywords": { "mostrar": "print" } }
        }"#,
    )?;

    let mut cmd = test.translate_command();
    cmd.arg("main.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(0));
    assert_eq!(test.read_file("main.luau")?, "print(x)\nteletransportar(j)\n");

    Ok(())
}

#[test]
fn test_config_forbidden_words_extend_defaults() -> Result<()> {
    let test = CliTest::with_file("main.vox", "teletransportar(j)\n")?;
    test.write_file(".voxrc.json", r#"{ "forbiddenWords": ["teletransportar"] }"#)?;

    let mut cmd = test.translate_command();
    cmd.arg("main.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(4));

    Ok(())
}

#[test]
fn test_invalid_config_is_unexpected_error() -> Result<()> {
    let test = CliTest::with_file("main.vox", "imprimir(1)\n")?;
    test.write_file(".voxrc.json", "{ not json")?;

    let mut cmd = test.translate_command();
    cmd.arg("main.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(3));
    assert!(out.stderr.contains("Failed to parse config file"));

    Ok(())
}

#[test]
fn test_invalid_rule_override_names_config_file() -> Result<()> {
    let test = CliTest::with_file("main.vox", "imprimir(1)\n")?;
    test.write_file(
        ".voxrc.json",
        r#"{ "rules": { "keywords": { "sino si": "elseif" } } }"#,
    )?;

    let mut cmd = test.translate_command();
    cmd.arg("main.vox");
    let out = run(cmd)?;

    assert_eq!(out.code, Some(3));
    let config_path = test.root().join(".voxrc.json");
    assert!(out
        .stderr
        .contains(&format!("Failed to build rules from {}", config_path.display())));
    assert!(out.stderr.contains("sino si"));
    assert!(!test.root().join("main.lua").exists());

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Usage:"));

    Ok(())
}

#[test]
fn test_unknown_argument_is_usage_error() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.translate_command();
    cmd.args(["a.vox", "--bogus"]);
    let out = run(cmd)?;

    assert_eq!(out.code, Some(1));

    Ok(())
}
