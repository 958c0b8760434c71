//! A full package build: clean output dir, copied library, compiled plugin and a
//! README whose examples are replaced by rendered images.
//!
//! Every step is fatal on error. The output dir is cleared at the start of each
//! run, so an interrupted build is fixed by running it again.

use std::path::{Component, Path, PathBuf};

use relative_path::{RelativePath, RelativePathBuf};
use thiserror::Error;

use crate::{
    assemble::DocumentAssembler,
    compose::ScriptComposer,
    document::Document,
    io::{self, ExcludeList, IoError},
    linker::ImageLinker,
    scan::{ExampleSyntax, ExtractError, Extraction, extract_examples},
    tools::{Invocation, ToolError, ToolRunner},
};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Renderer finished but did not produce {path}")]
    MissingImage { path: PathBuf },
    #[error("Refusing to clear {target}: it contains {input}")]
    TargetOverlapsInput { target: PathBuf, input: PathBuf },
}

/// Where everything lives. All paths are absolute or relative to the working dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    pub library_dir: PathBuf,
    pub plugin_dir: PathBuf,
    pub target_dir: PathBuf,
    pub license: PathBuf,
    pub changelog: PathBuf,
    /// README file name, both in the library dir and in the output
    pub readme: String,
    /// Exclude list file name inside the library dir
    pub exclude_file: String,
}

impl BuildLayout {
    /// Default layout of a package rooted at `root`.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            library_dir: root.join("src"),
            plugin_dir: root.join("plugin"),
            target_dir: root.join("target"),
            license: root.join("LICENSE"),
            changelog: root.join("CHANGELOG.md"),
            readme: "README.md".to_string(),
            exclude_file: ".exclude".to_string(),
        }
    }

    pub fn source_readme(&self) -> PathBuf {
        self.library_dir.join(&self.readme)
    }

    pub fn target_readme(&self) -> PathBuf {
        self.target_dir.join(&self.readme)
    }

    /// Fails if clearing the target dir would delete one of the build inputs.
    pub fn check_target(&self) -> Result<(), BuildError> {
        let target = resolve(&self.target_dir);
        for input in [
            &self.library_dir,
            &self.plugin_dir,
            &self.license,
            &self.changelog,
        ] {
            if resolve(input).starts_with(&target) {
                return Err(BuildError::TargetOverlapsInput {
                    target: self.target_dir.clone(),
                    input: input.clone(),
                });
            }
        }
        Ok(())
    }
}

// Canonical path if it exists, otherwise absolute with `.` and `..` folded away
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}

/// How to compile the plugin and which file to ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginBuild {
    pub target: String,
    pub artifact: String,
    pub output: String,
}

impl PluginBuild {
    pub fn invocation(&self, plugin_dir: &Path) -> Invocation {
        Invocation::new("cargo", plugin_dir).args([
            "build",
            "--release",
            "--target",
            self.target.as_str(),
            "--quiet",
        ])
    }

    pub fn artifact_path(&self, plugin_dir: &Path) -> PathBuf {
        plugin_dir
            .join("target")
            .join(&self.target)
            .join("release")
            .join(&self.artifact)
    }
}

/// Everything needed to turn the source README into the published one.
#[derive(Debug, Clone)]
pub struct DocsBuild {
    pub syntax: ExampleSyntax,
    pub linker: ImageLinker,
    pub composer: ScriptComposer,
    pub assembler: DocumentAssembler,
    /// Renderer program and leading arguments
    pub renderer: Vec<String>,
}

impl Default for DocsBuild {
    fn default() -> Self {
        Self {
            syntax: ExampleSyntax::default(),
            linker: ImageLinker::default(),
            composer: ScriptComposer::default(),
            assembler: DocumentAssembler::default(),
            renderer: vec!["typst".to_string(), "compile".to_string()],
        }
    }
}

/// A README that has been scanned and whose examples are composed into one script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDocs {
    pub extraction: Extraction,
    pub script: String,
}

impl DocsBuild {
    pub fn prepare(&self, readme: &Document) -> Result<PreparedDocs, ExtractError> {
        let extraction = extract_examples(readme, &self.syntax, &self.linker)?;
        let script = self.composer.compose(&extraction.examples);
        Ok(PreparedDocs { extraction, script })
    }

    /// Renderer call producing every example image in one go, run from `out_dir`.
    pub fn render_invocation(&self, script: &str, out_dir: &Path) -> Result<Invocation, ToolError> {
        Ok(Invocation::from_command(&self.renderer, out_dir, "renderer")?
            .arg("-")
            .arg(self.linker.pattern())
            .stdin(script))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub copied_files: Vec<RelativePathBuf>,
    pub plugin: Option<PathBuf>,
    pub examples: usize,
    pub readme: PathBuf,
}

pub struct Builder<'a, R: ToolRunner + ?Sized> {
    layout: BuildLayout,
    plugin: Option<PluginBuild>,
    docs: DocsBuild,
    runner: &'a R,
}

impl<'a, R: ToolRunner + ?Sized> Builder<'a, R> {
    pub fn new(
        layout: BuildLayout,
        plugin: Option<PluginBuild>,
        docs: DocsBuild,
        runner: &'a R,
    ) -> Self {
        Self {
            layout,
            plugin,
            docs,
            runner,
        }
    }

    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    pub fn run(&self) -> Result<BuildReport, BuildError> {
        self.layout.check_target()?;
        io::reset_dir(&self.layout.target_dir)?;

        let copied_files = self.copy_library()?;
        let plugin = match &self.plugin {
            Some(plugin) => Some(self.build_plugin(plugin)?),
            None => None,
        };
        let (readme, examples) = self.build_readme()?;

        Ok(BuildReport {
            copied_files,
            plugin,
            examples,
            readme,
        })
    }

    pub fn copy_library(&self) -> Result<Vec<RelativePathBuf>, BuildError> {
        log::info!("Copying library...");
        let layout = &self.layout;

        let mut exclude = ExcludeList::read(&layout.library_dir.join(&layout.exclude_file))?;
        exclude.push_literal(RelativePath::new(&layout.exclude_file));
        // Regenerated by build_readme
        exclude.push_literal(RelativePath::new(&layout.readme));

        let copied = io::copy_tree(&layout.library_dir, &layout.target_dir, &exclude)?;
        log::debug!("Copied {} library files", copied.len());

        io::copy_file(&layout.license, &layout.target_dir.join("LICENSE"))?;
        Ok(copied)
    }

    pub fn build_plugin(&self, plugin: &PluginBuild) -> Result<PathBuf, BuildError> {
        log::info!("Building plugin...");
        let plugin_dir = &self.layout.plugin_dir;

        self.runner.run(&plugin.invocation(plugin_dir))?;

        let destination = self.layout.target_dir.join(&plugin.output);
        io::copy_file(&plugin.artifact_path(plugin_dir), &destination)?;
        Ok(destination)
    }

    /// Writes the published README and returns its path and the number of examples.
    pub fn build_readme(&self) -> Result<(PathBuf, usize), BuildError> {
        log::info!("Building README...");
        let layout = &self.layout;

        let readme = Document::read(&layout.source_readme())?;
        let prepared = self.docs.prepare(&readme)?;
        let count = prepared.extraction.examples.len();
        log::debug!("Found {count} examples");

        if count > 0 {
            self.render_examples(&prepared.script, count)?;
        }

        let changelog = Document::read(&layout.changelog)?;
        let text = self
            .docs
            .assembler
            .assemble(&prepared.extraction.output_lines, &changelog);

        let destination = layout.target_readme();
        io::write_file(&destination, &text)?;
        Ok((destination, count))
    }

    fn render_examples(&self, script: &str, count: usize) -> Result<(), BuildError> {
        let target_dir = &self.layout.target_dir;
        let linker = &self.docs.linker;

        if let Some(dir) = linker.directory() {
            io::create_dir(&dir.to_path(target_dir))?;
        }

        self.runner
            .run(&self.docs.render_invocation(script, target_dir)?)?;

        for index in 1..=count {
            let path = linker.path(index).to_path(target_dir);
            if !path.exists() {
                return Err(BuildError::MissingImage { path });
            }
        }
        Ok(())
    }
}
