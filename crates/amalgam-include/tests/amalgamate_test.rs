//! End-to-end amalgamation of a small multi-directory C project
//!
//! Lays out a project with `src/`, `includes/`, a platform subdirectory and
//! a `project/` tree, then checks the single-file output and the run report.

use amalgam_core::{AmalgamateConfig, MacroDefinition};
use amalgam_include::{Driver, PathResolver};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(root, "includes/types.h", "#pragma once\ntypedef float f32;\n");
    write(
        root,
        "includes/vec2.h",
        "#include \"types.h\"\ntypedef struct { f32 x, y; } Vec2;\n",
    );
    write(
        root,
        "includes/window.h",
        "#include \"types.h\"\r\n#include \"vec2.h\"\r\nvoid window_open(Vec2 size);\r\n",
    );
    write(root, "src/vec2.c", "#include \"vec2.h\"\nVec2 vec2_zero;");
    write(
        root,
        "src/window.c",
        "#include \"window.h\"\n#include \"src/linux/native.c\" // platform\n#include <stdlib.h>\nvoid window_open(Vec2 size) {}\n",
    );
    write(root, "src/linux/native.c", "#include \"window.h\"\nstatic int native;\n");
    write(
        root,
        "project/main.c",
        "#include \"window.h\"\nint main(void) { window_open(vec2_zero); }\n",
    );

    temp
}

#[test]
fn test_amalgamate_project() {
    let temp = create_project();
    let root = temp.path();

    let mut config = AmalgamateConfig {
        include_dirs: vec![PathBuf::from("includes")],
        inputs: vec![
            PathBuf::from("src/vec2.c"),
            PathBuf::from("src/window.c"),
            PathBuf::from("project/main.c"),
        ],
        ..Default::default()
    };
    config.define(MacroDefinition::parse("MINO_LINUX"));
    config.define(MacroDefinition::parse("MINO_TITLE=demo"));

    let driver = Driver::new(config, PathResolver::new(root)).unwrap();
    let mut out = Vec::new();
    let report = driver.run(&mut out).unwrap();

    let expected = "\
#pragma once
typedef float f32;
typedef struct { f32 x, y; } Vec2;
Vec2 vec2_zero;
void window_open(Vec2 size);
static int native;
#include <stdlib.h>
void window_open(Vec2 size) {}
int main(void) { window_open(vec2_zero); }
";
    assert_eq!(String::from_utf8(out).unwrap(), expected);

    let files: Vec<_> = report
        .files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        files,
        [
            "src/vec2.c",
            "includes/vec2.h",
            "includes/types.h",
            "src/window.c",
            "includes/window.h",
            "src/linux/native.c",
            "project/main.c",
        ]
        .iter()
        .map(PathBuf::from)
        .collect::<Vec<_>>()
    );

    let macros: Vec<_> = report.macro_report().collect();
    assert_eq!(macros, ["\t\"MINO_LINUX\": \"1\"", "\t\"MINO_TITLE\": \"demo\""]);
}

#[test]
fn test_amalgamate_to_file_sink() {
    let temp = create_project();
    let root = temp.path();
    let output = root.join("build/mino.c");
    fs::create_dir_all(output.parent().unwrap()).unwrap();

    let config = AmalgamateConfig {
        output: Some(output.clone()),
        include_dirs: vec![PathBuf::from("includes")],
        inputs: vec![PathBuf::from("src/vec2.c")],
        ..Default::default()
    };
    let driver = Driver::new(config, PathResolver::new(root)).unwrap();
    let file = fs::File::create(&output).unwrap();
    driver.run(std::io::BufWriter::new(file)).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "#pragma once\ntypedef float f32;\ntypedef struct { f32 x, y; } Vec2;\nVec2 vec2_zero;\n"
    );
}
