#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use docpack_engine::{BuildLayout, Invocation, ToolError, ToolOutput, ToolRunner};

/// Stands in for cargo and the renderer.
///
/// Records every call. Cargo calls leave a fake artifact where cargo would put
/// it; renderer calls write one canned image per `#page[` in the script, named by
/// the output pattern.
#[derive(Default)]
pub struct FakeRunner {
    pub calls: RefCell<Vec<Invocation>>,
    /// Program name whose calls fail
    pub fail: Option<String>,
    /// Render this many images fewer than requested
    pub drop_images: usize,
}

impl FakeRunner {
    pub fn failing(program: &str) -> Self {
        Self {
            fail: Some(program.to_string()),
            ..Self::default()
        }
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.program.clone())
            .collect()
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
        self.calls.borrow_mut().push(invocation.clone());

        if self.fail.as_deref() == Some(invocation.program.as_str()) {
            return Err(ToolError::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::other("fake failure"),
            });
        }

        match invocation.program.as_str() {
            "cargo" => {
                let target = &invocation.args[3];
                let dir = invocation.cwd.join("target").join(target).join("release");
                fs::create_dir_all(&dir).unwrap();
                fs::write(dir.join("board_n_pieces_plugin.wasm"), b"\0asm").unwrap();
            }
            _ => {
                let pattern = invocation.args.last().unwrap();
                let script = invocation.stdin.as_deref().unwrap_or_default();
                let pages = script.matches("#page[").count();
                for n in 1..=pages.saturating_sub(self.drop_images) {
                    let path = invocation.cwd.join(pattern.replace("{n}", &n.to_string()));
                    fs::write(path, format!("<svg>{n}</svg>")).unwrap();
                }
            }
        }

        Ok(ToolOutput::default())
    }
}

pub fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

pub const README: &str = "\
> Generated on release, edit src/README.md instead.

# Board n Pieces

```example
#board(starting-position)
```

Directives set up the page:

```example
%set page(fill: gray)
#board(position)
```
";

pub const CHANGELOG: &str = "# Changelog\n\n## 0.1.0\n\n- Initial release\n";

/// A package with a library, plugin dir, license and changelog.
pub fn create_project(root: &Path) -> BuildLayout {
    write(root, "src/lib.typ", "#let board(p) = p");
    write(root, "src/board/render.typ", "// render");
    write(root, "src/tests/board.typ", "// test only");
    write(root, "src/.exclude", "# Not shipped\ntests/\n");
    write(root, "src/README.md", README);
    write(root, "LICENSE", "MIT");
    write(root, "CHANGELOG.md", CHANGELOG);
    fs::create_dir_all(root.join("plugin")).unwrap();
    BuildLayout::rooted_at(root)
}
