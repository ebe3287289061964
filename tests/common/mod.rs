#![allow(dead_code)]

use globreload::fs::mock::MockFileSystem;

pub const ROOT: &str = "/project";

/// Small project with one glob-importing entry and two plain modules.
///
/// ```text
/// /project/src/main.js          imports ./pages/*.js via import.meta.glob
/// /project/src/util.js          plain module
/// /project/src/pages/home.js    plain module
/// ```
pub fn project_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file(
        "/project/src/main.js",
        "const pages = import.meta.glob('./pages/*.js');\nexport default pages;\n",
    );
    fs.add_file("/project/src/util.js", "export const add = (a, b) => a + b;\n");
    fs.add_file("/project/src/pages/home.js", "export default 'home';\n");
    fs
}

pub fn id(rel: &str) -> String {
    format!("{ROOT}/{rel}")
}
